//! The daily info-screen gate.
//!
//! Per reading type: `NOT_SHOWN_TODAY --mark_shown--> SHOWN_TODAY`.
//! Rollover at local midnight is computed lazily on the next
//! `should_show`, never by a timer.

use log::{debug, warn};

use super::clock::Clock;
use super::store::{InfoScreenStore, StoreError};
use crate::reading::ReadingTypeKey;

/// Decides whether a reading type's info screen is due today.
///
/// ## Example
///
/// ```
/// use chrono::NaiveDate;
/// use tarot_flow::gate::{InfoScreenGate, ManualClock, MemoryStore};
///
/// let clock = ManualClock::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
/// let mut gate = InfoScreenGate::new(MemoryStore::new(), clock);
/// let key = "AŞK AÇILIMI".into();
///
/// assert!(gate.should_show(&key));
/// gate.mark_shown(&key).unwrap();
/// assert!(!gate.should_show(&key));
///
/// gate.clock().advance_days(1);
/// assert!(gate.should_show(&key));
/// ```
#[derive(Debug)]
pub struct InfoScreenGate<S, C> {
    store: S,
    clock: C,
}

impl<S: InfoScreenStore, C: Clock> InfoScreenGate<S, C> {
    /// Gate over `store`, judging "today" by `clock`.
    #[must_use]
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Should the info screen be shown for `key` today?
    ///
    /// True iff there is no record or the record is from an earlier day.
    /// An unreadable record counts as no record.
    #[must_use]
    pub fn should_show(&self, key: &ReadingTypeKey) -> bool {
        let today = self.clock.today();
        match self.store.get(key) {
            Ok(Some(last_shown)) => last_shown < today,
            Ok(None) => true,
            Err(e) => {
                warn!("Could not read info-screen record for {}: {}", key, e);
                true
            }
        }
    }

    /// Record that the info screen for `key` was shown today.
    pub fn mark_shown(&mut self, key: &ReadingTypeKey) -> Result<(), StoreError> {
        let today = self.clock.today();
        self.store.set(key, today)?;
        debug!("Marked info screen shown for {} on {}", key, today);
        Ok(())
    }

    /// Forget the record for `key` only.
    pub fn clear(&mut self, key: &ReadingTypeKey) -> Result<(), StoreError> {
        self.store.delete(key)
    }

    /// Forget every record.
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.store.delete_all()
    }

    /// The backing record store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The clock deciding "today".
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Consume the gate, returning the store (e.g. to reopen it elsewhere).
    pub fn into_store(self) -> S {
        self.store
    }
}
