//! Hand drawing and reveal tests.
//!
//! These tests verify the hand invariants across the whole spread table:
//! - Hand size matches the table (unknown labels draw one card)
//! - No repeated card identities within a hand
//! - Positions are contiguous from 0
//! - Reveal flags only ever go from false to true

use proptest::prelude::*;
use rustc_hash::FxHashSet;

use tarot_flow::cards::Deck;
use tarot_flow::core::ShuffleRng;
use tarot_flow::reading::{Hand, HandDrawer, ReadingSession, ReadingTypeKey, SpreadTable};

fn assert_well_formed(hand: &Hand) {
    let ids: FxHashSet<_> = hand.card_ids().into_iter().collect();
    assert_eq!(ids.len(), hand.len(), "duplicate card in hand");

    for (i, slot) in hand.iter().enumerate() {
        assert_eq!(slot.position, i);
    }
}

// =============================================================================
// Scenario Tests
// =============================================================================

/// Test the documented reading type sizes.
#[test]
fn test_reading_type_scenarios() {
    let deck = Deck::standard();
    let table = SpreadTable::standard();
    let mut rng = ShuffleRng::new(2024);

    for (label, expected) in [
        ("İLİŞKİ AÇILIMI", 3),
        ("DETAYLI İLİŞKİ AÇILIMI", 9),
        ("FİNANSAL DURUM", 6),
        ("XYZ", 1),
    ] {
        let hand = HandDrawer::draw(&deck, &table, &label.into(), &mut rng).unwrap();
        assert_eq!(hand.len(), expected, "label {label}");
        assert_well_formed(&hand);
        assert_eq!(hand.revealed_count(), 0);
    }
}

/// Test every spread in the standard table.
#[test]
fn test_every_standard_spread() {
    let deck = Deck::standard();
    let table = SpreadTable::standard();
    let mut rng = ShuffleRng::new(1);

    for spread in table.iter() {
        let hand = HandDrawer::draw(&deck, &table, &spread.label, &mut rng).unwrap();
        assert_eq!(hand.len(), spread.card_count);
        assert_well_formed(&hand);
    }
}

/// Test that repeated draws are not stuck on one hand.
#[test]
fn test_repeated_draws_vary() {
    let deck = Deck::standard();
    let table = SpreadTable::standard();
    let mut rng = ShuffleRng::new(8);
    let key = ReadingTypeKey::new("GÜNLÜK KART");

    let firsts: FxHashSet<_> = (0..50)
        .map(|_| {
            let hand = HandDrawer::draw(&deck, &table, &key, &mut rng).unwrap();
            hand.slot(0).unwrap().card.id.clone()
        })
        .collect();

    // 50 single-card draws from 78 cards land on many distinct cards
    assert!(firsts.len() > 20, "only {} distinct cards", firsts.len());
}

/// Test that the full session lifecycle behaves: draw, reveal, redraw after reset.
#[test]
fn test_session_lifecycle() {
    let mut session = ReadingSession::new(Deck::standard(), SpreadTable::standard(), ShuffleRng::new(3));
    let key = ReadingTypeKey::new("DETAYLI İLİŞKİ AÇILIMI");

    let drawn = session.draw(&key).unwrap().clone();
    assert_eq!(drawn.len(), 9);

    for i in 0..drawn.len() {
        session.reveal_card(i);
        assert_eq!(session.hand().unwrap().revealed_count(), i + 1);
    }
    assert!(session.hand().unwrap().is_fully_revealed());

    // Still the same cards
    assert_eq!(session.hand().unwrap().card_ids(), drawn.card_ids());

    session.reset();
    let redrawn = session.draw(&key).unwrap();
    assert_eq!(redrawn.revealed_count(), 0);
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    /// Any seed and any standard or unknown label yields a well-formed hand.
    #[test]
    fn prop_draw_well_formed(seed in any::<u64>(), pick in 0usize..12) {
        let table = SpreadTable::standard();
        let labels: Vec<ReadingTypeKey> = table
            .iter()
            .map(|s| s.label.clone())
            .chain(std::iter::once(ReadingTypeKey::new("XYZ")))
            .collect();
        let key = &labels[pick % labels.len()];

        let mut rng = ShuffleRng::new(seed);
        let hand = HandDrawer::draw(&Deck::standard(), &table, key, &mut rng).unwrap();

        prop_assert_eq!(hand.len(), table.card_count(key));
        let ids: FxHashSet<_> = hand.card_ids().into_iter().collect();
        prop_assert_eq!(ids.len(), hand.len());
        for (i, slot) in hand.iter().enumerate() {
            prop_assert_eq!(slot.position, i);
            prop_assert!(!slot.revealed);
        }
    }

    /// Revealing an index sets exactly that flag; out-of-range is a no-op.
    #[test]
    fn prop_reveal_single(seed in any::<u64>(), index in -3i64..14) {
        let mut rng = ShuffleRng::new(seed);
        let hand = HandDrawer::draw(
            &Deck::standard(),
            &SpreadTable::standard(),
            &"KELTİK HAÇI".into(),
            &mut rng,
        )
        .unwrap();

        let revealed = hand.reveal_card_signed(index);
        for (i, slot) in revealed.iter().enumerate() {
            prop_assert_eq!(slot.revealed, i as i64 == index);
        }
        prop_assert_eq!(revealed.reveal_card_signed(index), revealed.clone());
    }

    /// Any sequence of reveals keeps earlier flags set.
    #[test]
    fn prop_reveal_monotonic(seed in any::<u64>(), ops in proptest::collection::vec(0usize..12, 0..20)) {
        let mut rng = ShuffleRng::new(seed);
        let mut hand = HandDrawer::draw(
            &Deck::standard(),
            &SpreadTable::standard(),
            &"AŞK AÇILIMI".into(),
            &mut rng,
        )
        .unwrap();

        for op in ops {
            let next = hand.reveal_card(op);
            for (before, after) in hand.iter().zip(next.iter()) {
                prop_assert!(!before.revealed || after.revealed);
                prop_assert_eq!(&before.card, &after.card);
            }
            hand = next;
        }
    }
}
