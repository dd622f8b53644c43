//! Hands: the cards drawn for one reading, with per-card reveal state.
//!
//! A `Hand` is an immutable value. Reveal operations return a new hand
//! and leave the original untouched; `im::Vector` makes the copy O(1)
//! with structural sharing, so holders never alias mutable state.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};

/// One position in a hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandSlot {
    /// 0-based position, fixed when the hand is drawn.
    pub position: usize,
    pub card: Card,
    /// Monotonic: false until revealed, then true for the hand's lifetime.
    pub revealed: bool,
}

/// Ordered, duplicate-free cards for one reading.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    slots: Vector<HandSlot>,
}

impl Hand {
    /// Build a face-down hand; positions follow iteration order.
    ///
    /// Uniqueness of card identities is the drawer's responsibility.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let slots = cards
            .into_iter()
            .enumerate()
            .map(|(position, card)| HandSlot {
                position,
                card,
                revealed: false,
            })
            .collect();
        Self { slots }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the hand has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Get a slot by position.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&HandSlot> {
        self.slots.get(index)
    }

    /// Iterate slots in position order.
    pub fn iter(&self) -> impl Iterator<Item = &HandSlot> {
        self.slots.iter()
    }

    /// Card ids in position order.
    #[must_use]
    pub fn card_ids(&self) -> Vec<&CardId> {
        self.slots.iter().map(|s| &s.card.id).collect()
    }

    /// Is the card at `index` revealed? `false` when out of range.
    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|s| s.revealed)
    }

    /// Number of revealed cards.
    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.slots.iter().filter(|s| s.revealed).count()
    }

    /// Are all cards revealed? Vacuously true for an empty hand.
    #[must_use]
    pub fn is_fully_revealed(&self) -> bool {
        self.slots.iter().all(|s| s.revealed)
    }

    /// Return a hand with the card at `index` revealed.
    ///
    /// Out-of-range indices are a no-op.
    #[must_use]
    pub fn reveal_card(&self, index: usize) -> Hand {
        match self.slots.get(index) {
            Some(slot) if !slot.revealed => {
                let mut slots = self.slots.clone();
                slots.set(
                    index,
                    HandSlot {
                        revealed: true,
                        ..slot.clone()
                    },
                );
                Hand { slots }
            }
            _ => self.clone(),
        }
    }

    /// Like [`Hand::reveal_card`], for callers holding a signed index.
    ///
    /// Negative indices are a no-op.
    #[must_use]
    pub fn reveal_card_signed(&self, index: i64) -> Hand {
        match usize::try_from(index) {
            Ok(i) => self.reveal_card(i),
            Err(_) => self.clone(),
        }
    }

    /// Return a hand with every card revealed.
    #[must_use]
    pub fn reveal_all(&self) -> Hand {
        if self.is_fully_revealed() {
            return self.clone();
        }
        let slots = self
            .slots
            .iter()
            .map(|s| HandSlot {
                revealed: true,
                ..s.clone()
            })
            .collect();
        Hand { slots }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    fn hand(n: usize) -> Hand {
        Hand::from_cards((0..n).map(|i| Card::new(format!("c{i}"), format!("Card {i}"), Suit::Cups)))
    }

    #[test]
    fn test_from_cards_positions() {
        let hand = hand(4);
        assert_eq!(hand.len(), 4);
        for (i, slot) in hand.iter().enumerate() {
            assert_eq!(slot.position, i);
            assert!(!slot.revealed);
        }
        assert_eq!(hand.revealed_count(), 0);
    }

    #[test]
    fn test_reveal_card_only_touches_index() {
        let original = hand(3);
        let revealed = original.reveal_card(1);

        assert!(!revealed.is_revealed(0));
        assert!(revealed.is_revealed(1));
        assert!(!revealed.is_revealed(2));

        // Original value is unchanged
        assert_eq!(original.revealed_count(), 0);
    }

    #[test]
    fn test_reveal_card_idempotent() {
        let once = hand(3).reveal_card(2);
        let twice = once.reveal_card(2);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_reveal_out_of_range_is_noop() {
        let hand = hand(3);

        assert_eq!(hand.reveal_card(hand.len()), hand);
        assert_eq!(hand.reveal_card(usize::MAX), hand);
        assert_eq!(hand.reveal_card_signed(-1), hand);
        assert_eq!(hand.reveal_card_signed(3), hand);
        assert_eq!(hand.reveal_card_signed(0).revealed_count(), 1);
    }

    #[test]
    fn test_reveal_all() {
        let hand = hand(5).reveal_card(0).reveal_all();
        assert!(hand.is_fully_revealed());
        assert_eq!(hand.revealed_count(), 5);

        assert_eq!(hand.reveal_all(), hand);
    }

    #[test]
    fn test_reveal_is_monotonic() {
        let mut hand = hand(4);
        for i in [2, 0, 2, 3, 1, 0] {
            let before: Vec<bool> = hand.iter().map(|s| s.revealed).collect();
            hand = hand.reveal_card(i);
            for (was, slot) in before.iter().zip(hand.iter()) {
                assert!(!was || slot.revealed);
            }
        }
        assert!(hand.is_fully_revealed());
    }

    #[test]
    fn test_empty_hand() {
        let hand = Hand::default();
        assert!(hand.is_empty());
        assert!(hand.is_fully_revealed());
        assert_eq!(hand.reveal_card(0), hand);
    }
}
