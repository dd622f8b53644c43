//! The card deck store.
//!
//! A `Deck` is the ordered sequence of every card available to readings.
//! It is loaded once per process and shared read-only (`Arc<Deck>`)
//! across all sessions.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use log::info;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use super::definition::{Card, CardId, Suit};

/// Errors from building or loading a deck.
///
/// Any of these is fatal for drawing: there is no fallback to an empty deck.
#[derive(Debug, Error)]
pub enum DeckError {
    /// The deck source could not be read.
    #[error("could not read deck from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The deck source is not a valid card mapping.
    #[error("could not parse deck: {0}")]
    Parse(#[from] serde_json::Error),

    /// The deck has no cards.
    #[error("deck contains no cards")]
    Empty,

    /// Two records share the same identity.
    #[error("duplicate card id {0}")]
    DuplicateCard(CardId),

    /// A record in list form has no id.
    #[error("card record {index} has no id")]
    MissingId { index: usize },

    /// A record in map form names a different id than its key.
    #[error("card record under key {key} has id {id}")]
    IdMismatch { key: CardId, id: CardId },
}

/// On-disk card record. `id` may be omitted in map form, where the key
/// is the id.
#[derive(Debug, Deserialize)]
struct CardRecord {
    #[serde(default)]
    id: Option<CardId>,
    name: String,
    suit: Suit,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    image: Option<String>,
}

impl CardRecord {
    fn into_card(self, id: CardId) -> Card {
        Card {
            id,
            display_name: self.display_name.unwrap_or_else(|| self.name.clone()),
            name: self.name,
            suit: self.suit,
            image: self.image,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DeckSource {
    List(Vec<CardRecord>),
    // Ordered by id for a stable deck order.
    Map(std::collections::BTreeMap<CardId, CardRecord>),
}

/// Ordered, immutable collection of cards.
///
/// ## Example
///
/// ```
/// use tarot_flow::cards::{Card, Deck, Suit};
///
/// let deck = Deck::new(vec![
///     Card::new("major-00", "The Fool", Suit::Major),
///     Card::new("cups-01", "Ace of Cups", Suit::Cups),
/// ]).unwrap();
///
/// assert_eq!(deck.len(), 2);
/// assert_eq!(deck.get(&"cups-01".into()).unwrap().name, "Ace of Cups");
/// ```
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
    index: FxHashMap<CardId, usize>,
}

impl Deck {
    /// Build a deck, rejecting empty input and duplicate ids.
    pub fn new(cards: Vec<Card>) -> Result<Self, DeckError> {
        if cards.is_empty() {
            return Err(DeckError::Empty);
        }

        let mut index = FxHashMap::default();
        for (i, card) in cards.iter().enumerate() {
            if index.insert(card.id.clone(), i).is_some() {
                return Err(DeckError::DuplicateCard(card.id.clone()));
            }
        }

        Ok(Self { cards, index })
    }

    /// Parse a deck from JSON.
    ///
    /// Accepts either an array of records or an object mapping id to
    /// record.
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        let cards = match serde_json::from_str::<DeckSource>(json)? {
            DeckSource::List(records) => records
                .into_iter()
                .enumerate()
                .map(|(index, mut record)| {
                    let id = record.id.take().ok_or(DeckError::MissingId { index })?;
                    Ok(record.into_card(id))
                })
                .collect::<Result<Vec<_>, DeckError>>()?,
            DeckSource::Map(records) => records
                .into_iter()
                .map(|(key, mut record)| match record.id.take() {
                    Some(id) if id != key => Err(DeckError::IdMismatch { key, id }),
                    _ => Ok(record.into_card(key)),
                })
                .collect::<Result<Vec<_>, DeckError>>()?,
        };
        Self::new(cards)
    }

    /// Load a deck from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DeckError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let deck = Self::from_json(&json)?;
        info!("Loaded {} cards from {}", deck.len(), path.display());
        Ok(deck)
    }

    /// The built-in 78-card tarot deck, built once per process.
    #[must_use]
    pub fn standard() -> Arc<Deck> {
        static STANDARD: OnceLock<Arc<Deck>> = OnceLock::new();
        Arc::clone(STANDARD.get_or_init(|| Arc::new(build_standard())))
    }

    /// Get a card by id.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.index.get(id).map(|&i| &self.cards[i])
    }

    /// Check if a card id is in the deck.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.index.contains_key(id)
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false for a constructed deck.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in deck order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Iterate over cards in deck order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Find cards of a given suit.
    pub fn find_by_suit(&self, suit: Suit) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |c| c.suit == suit)
    }
}

const MAJOR_ARCANA: [(&str, &str); 22] = [
    ("The Fool", "Deli"),
    ("The Magician", "Büyücü"),
    ("The High Priestess", "Başrahibe"),
    ("The Empress", "İmparatoriçe"),
    ("The Emperor", "İmparator"),
    ("The Hierophant", "Başrahip"),
    ("The Lovers", "Aşıklar"),
    ("The Chariot", "Savaş Arabası"),
    ("Strength", "Güç"),
    ("The Hermit", "Ermiş"),
    ("Wheel of Fortune", "Kader Çarkı"),
    ("Justice", "Adalet"),
    ("The Hanged Man", "Asılan Adam"),
    ("Death", "Ölüm"),
    ("Temperance", "Denge"),
    ("The Devil", "Şeytan"),
    ("The Tower", "Yıkılan Kule"),
    ("The Star", "Yıldız"),
    ("The Moon", "Ay"),
    ("The Sun", "Güneş"),
    ("Judgement", "Mahkeme"),
    ("The World", "Dünya"),
];

const MINOR_RANKS: [(&str, &str); 14] = [
    ("Ace", "As"),
    ("Two", "İkili"),
    ("Three", "Üçlü"),
    ("Four", "Dörtlü"),
    ("Five", "Beşli"),
    ("Six", "Altılı"),
    ("Seven", "Yedili"),
    ("Eight", "Sekizli"),
    ("Nine", "Dokuzlu"),
    ("Ten", "Onlu"),
    ("Page", "Uşak"),
    ("Knight", "Şövalye"),
    ("Queen", "Kraliçe"),
    ("King", "Kral"),
];

fn suit_names(suit: Suit) -> (&'static str, &'static str, &'static str) {
    // (id prefix, English plural, Turkish)
    match suit {
        Suit::Major => ("major", "Major Arcana", "Büyük Arkana"),
        Suit::Wands => ("wands", "Wands", "Asa"),
        Suit::Cups => ("cups", "Cups", "Kupa"),
        Suit::Swords => ("swords", "Swords", "Kılıç"),
        Suit::Pentacles => ("pentacles", "Pentacles", "Tılsım"),
    }
}

fn build_standard() -> Deck {
    let mut cards = Vec::with_capacity(78);

    let (major, _, _) = suit_names(Suit::Major);
    for (n, (name, display)) in MAJOR_ARCANA.iter().enumerate() {
        cards.push(
            Card::new(format!("{major}-{n:02}"), *name, Suit::Major)
                .with_display_name(*display)
                .with_image(format!("cards/{major}_{n:02}.png")),
        );
    }

    for suit in Suit::MINOR {
        let (prefix, english, turkish) = suit_names(suit);
        for (i, (rank, rank_tr)) in MINOR_RANKS.iter().enumerate() {
            let n = i + 1;
            cards.push(
                Card::new(format!("{prefix}-{n:02}"), format!("{rank} of {english}"), suit)
                    .with_display_name(format!("{turkish} {rank_tr}"))
                    .with_image(format!("cards/{prefix}_{n:02}.png")),
            );
        }
    }

    let index = cards
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id.clone(), i))
        .collect();
    Deck { cards, index }
}
