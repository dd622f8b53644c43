//! Card system: definitions and the deck store.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier of a card within a deck
//! - `Suit`: Major Arcana or one of the four minor suits
//! - `Card`: Immutable card record
//! - `Deck`: Ordered, process-wide card collection

pub mod deck;
pub mod definition;

pub use deck::{Deck, DeckError};
pub use definition::{Card, CardId, Suit};
