//! Card definitions - static card data.
//!
//! A `Card` is immutable once the deck is loaded. Per-reading state
//! (position in a spread, revealed or not) lives in `reading::HandSlot`.

use serde::{Deserialize, Serialize};

/// Unique identifier of a card within a deck (e.g. `"major-00"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Suit / type classification of a card.
///
/// `Major` covers the 22 trump cards; the other four are the minor suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Major,
    Wands,
    Cups,
    Swords,
    Pentacles,
}

impl Suit {
    /// The four minor suits, in deck order.
    pub const MINOR: [Suit; 4] = [Suit::Wands, Suit::Cups, Suit::Swords, Suit::Pentacles];

    /// Is this the Major Arcana?
    #[must_use]
    pub const fn is_major(self) -> bool {
        matches!(self, Suit::Major)
    }
}

/// Static card record.
///
/// ## Example
///
/// ```
/// use tarot_flow::cards::{Card, Suit};
///
/// let fool = Card::new("major-00", "The Fool", Suit::Major)
///     .with_display_name("Deli")
///     .with_image("cards/major_00.png");
///
/// assert_eq!(fool.display_name, "Deli");
/// assert!(fool.suit.is_major());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier.
    pub id: CardId,

    /// Canonical card name.
    pub name: String,

    /// Suit / type classification.
    pub suit: Suit,

    /// Name shown to the user. Defaults to `name` when absent in the source.
    #[serde(default)]
    pub display_name: String,

    /// Image resource reference.
    #[serde(default)]
    pub image: Option<String>,
}

impl Card {
    /// Create a card whose display name equals its name.
    #[must_use]
    pub fn new(id: impl Into<CardId>, name: impl Into<String>, suit: Suit) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            display_name: name.clone(),
            name,
            suit,
            image: None,
        }
    }

    /// Set the display name (builder pattern).
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Set the image reference (builder pattern).
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
