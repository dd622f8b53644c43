//! # tarot-flow
//!
//! Reading flow coordinator for a tarot reading app.
//!
//! ## Design Principles
//!
//! 1. **Shared, immutable content**: The deck and the spread table are
//!    built once per process and shared read-only through `Arc`.
//!
//! 2. **Values, not observables**: A `Hand` is replaced wholesale on every
//!    reveal. `im-rs` keeps those copies O(1).
//!
//! 3. **Injected persistence**: The info-screen gate takes its store and
//!    clock as constructor parameters; there is no ambient global state.
//!
//! ## Modules
//!
//! - `core`: Shuffle RNG and configuration
//! - `cards`: Card records and the deck store
//! - `reading`: Spread table, hands, drawing and reveal state
//! - `gate`: Daily info-screen gate with its clocks and stores
//! - `navigation`: Info / detail / parent routing
//! - `account`: Login bookkeeping and the first-login event
//! - `flow`: One-call wiring of everything above

pub mod account;
pub mod cards;
pub mod core;
pub mod flow;
pub mod gate;
pub mod navigation;
pub mod reading;

// Re-export commonly used types
pub use crate::core::{ConfigError, FlowConfig, ShuffleRng};

pub use crate::cards::{Card, CardId, Deck, DeckError, Suit};

pub use crate::reading::{
    Hand, HandDrawer, HandSlot, ParentScreen, ReadingError, ReadingSession, ReadingTypeKey,
    Spread, SpreadTable,
};

pub use crate::gate::{
    Clock, InfoScreenGate, InfoScreenStore, JsonFileStore, LocalClock, ManualClock, MemoryStore,
    StoreError,
};

pub use crate::navigation::{Destination, ReadingRouter};

pub use crate::account::{
    AccountError, AccountRecord, AccountStore, LoginBookkeeper, LoginNotifier, LoginOutcome,
    UserId,
};

pub use crate::flow::{FlowError, ReadingFlow};
