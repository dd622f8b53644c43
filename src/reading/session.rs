//! Hand drawing and the per-session reading owner.
//!
//! [`HandDrawer`] samples a hand without replacement. [`ReadingSession`]
//! owns at most one hand at a time: drawing is idempotent until the
//! session is reset, and reveals replace the held hand wholesale.

use std::sync::Arc;

use log::debug;
use thiserror::Error;

use super::hand::Hand;
use super::spread::{ReadingTypeKey, SpreadTable};
use crate::cards::Deck;
use crate::core::ShuffleRng;

/// Errors from drawing a hand.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadingError {
    /// The spread wants more cards than the deck holds.
    #[error("reading {reading} needs {requested} cards but the deck has {available}")]
    NotEnoughCards {
        reading: ReadingTypeKey,
        requested: usize,
        available: usize,
    },
}

/// Stateless hand sampler.
pub struct HandDrawer;

impl HandDrawer {
    /// Draw a face-down hand for `reading`.
    ///
    /// Shuffles the whole deck uniformly and takes the first
    /// `table.card_count(reading)` cards.
    pub fn draw(
        deck: &Deck,
        table: &SpreadTable,
        reading: &ReadingTypeKey,
        rng: &mut ShuffleRng,
    ) -> Result<Hand, ReadingError> {
        let count = table.card_count(reading);
        if count > deck.len() {
            return Err(ReadingError::NotEnoughCards {
                reading: reading.clone(),
                requested: count,
                available: deck.len(),
            });
        }

        let mut order: Vec<usize> = (0..deck.len()).collect();
        rng.shuffle(&mut order);

        let cards = deck.cards();
        let hand = Hand::from_cards(order.into_iter().take(count).map(|i| cards[i].clone()));
        debug!("Drew {} cards for {}: {:?}", hand.len(), reading, hand.card_ids());
        Ok(hand)
    }
}

/// Single-owner state for one reading.
///
/// ## Example
///
/// ```
/// use tarot_flow::cards::Deck;
/// use tarot_flow::core::ShuffleRng;
/// use tarot_flow::reading::{ReadingSession, SpreadTable};
///
/// let mut session = ReadingSession::new(Deck::standard(), SpreadTable::standard(), ShuffleRng::new(7));
///
/// let first = session.draw(&"İLİŞKİ AÇILIMI".into()).unwrap().clone();
/// assert_eq!(first.len(), 3);
///
/// // Drawing again keeps the existing hand
/// assert_eq!(session.draw(&"İLİŞKİ AÇILIMI".into()).unwrap(), &first);
///
/// session.reveal_card(0);
/// assert!(session.hand().unwrap().is_revealed(0));
/// ```
#[derive(Clone, Debug)]
pub struct ReadingSession {
    deck: Arc<Deck>,
    table: Arc<SpreadTable>,
    rng: ShuffleRng,
    reading: Option<ReadingTypeKey>,
    hand: Option<Hand>,
}

impl ReadingSession {
    /// Create a session with no hand drawn.
    #[must_use]
    pub fn new(deck: Arc<Deck>, table: Arc<SpreadTable>, rng: ShuffleRng) -> Self {
        Self {
            deck,
            table,
            rng,
            reading: None,
            hand: None,
        }
    }

    /// Draw the session's hand, or return the one already drawn.
    ///
    /// Once a hand exists, later calls return it unchanged whatever
    /// `reading` they pass, until [`ReadingSession::reset`].
    pub fn draw(&mut self, reading: &ReadingTypeKey) -> Result<&Hand, ReadingError> {
        if self.hand.is_none() {
            let hand = HandDrawer::draw(&self.deck, &self.table, reading, &mut self.rng)?;
            self.reading = Some(reading.clone());
            self.hand = Some(hand);
        } else if self.reading.as_ref() != Some(reading) {
            debug!(
                "Ignoring draw for {}: session already holds {:?}",
                reading, self.reading
            );
        }
        Ok(self.hand.get_or_insert_with(Hand::default))
    }

    /// Has a hand been drawn since creation or the last reset?
    #[must_use]
    pub fn is_drawn(&self) -> bool {
        self.hand.is_some()
    }

    /// The current hand, if drawn.
    #[must_use]
    pub fn hand(&self) -> Option<&Hand> {
        self.hand.as_ref()
    }

    /// Reading type of the current hand, if drawn.
    #[must_use]
    pub fn reading(&self) -> Option<&ReadingTypeKey> {
        self.reading.as_ref()
    }

    /// Reveal one card. A no-op before drawing or for out-of-range indices.
    pub fn reveal_card(&mut self, index: usize) {
        self.replace_hand(|hand| hand.reveal_card(index));
    }

    /// Reveal one card by signed index; negative indices are a no-op.
    pub fn reveal_card_signed(&mut self, index: i64) {
        self.replace_hand(|hand| hand.reveal_card_signed(index));
    }

    /// Reveal every card. A no-op before drawing.
    pub fn reveal_all(&mut self) {
        self.replace_hand(Hand::reveal_all);
    }

    /// Drop the hand and allow a new draw.
    pub fn reset(&mut self) {
        if let Some(reading) = self.reading.take() {
            debug!("Reset reading session for {}", reading);
        }
        self.hand = None;
    }

    fn replace_hand(&mut self, f: impl FnOnce(&Hand) -> Hand) {
        if let Some(hand) = &self.hand {
            self.hand = Some(f(hand));
        }
    }
}
