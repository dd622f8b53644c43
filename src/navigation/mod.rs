//! Navigation routing for reading flows.
//!
//! The router consumes the info-screen gate: a reading opens on its info
//! screen at most once per day, and back navigation from a reading goes
//! to its parent screen.

pub mod router;

pub use router::{Destination, ReadingRouter};

// Re-exported for convenience
pub use crate::reading::ParentScreen;
