//! Daily info-screen gate: clocks, record stores and the gate itself.
//!
//! ## Key Types
//!
//! - `Clock`: Today's date (`LocalClock` for devices, `ManualClock` for tests)
//! - `InfoScreenStore`: get / set / delete / delete-all of last-shown dates
//! - `MemoryStore` / `JsonFileStore`: In-process and per-installation stores
//! - `InfoScreenGate`: "show info today?" and "mark shown"

pub mod clock;
pub mod info;
pub mod store;

pub use clock::{Clock, LocalClock, ManualClock};
pub use info::InfoScreenGate;
pub use store::{InfoScreenStore, JsonFileStore, MemoryStore, StoreError};
