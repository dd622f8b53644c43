//! Readings: spread lookup, hands and the per-session owner.
//!
//! ## Key Types
//!
//! - `ReadingTypeKey`: Label of the requested spread
//! - `SpreadTable`: Label → hand size and parent screen
//! - `Hand` / `HandSlot`: Drawn cards with reveal flags (copy-on-write)
//! - `HandDrawer`: Uniform sampling without replacement
//! - `ReadingSession`: Idempotent draw, reveals and reset for one reading

pub mod hand;
pub mod session;
pub mod spread;

pub use hand::{Hand, HandSlot};
pub use session::{HandDrawer, ReadingError, ReadingSession};
pub use spread::{ParentScreen, ReadingTypeKey, Spread, SpreadTable, SpreadTableBuilder, DEFAULT_CARD_COUNT};
