//! Routing between a reading's info screen, its detail screen and its
//! parent screen.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::gate::{Clock, InfoScreenGate, InfoScreenStore, StoreError};
use crate::reading::{ParentScreen, ReadingTypeKey, SpreadTable};

/// Where the UI should navigate next.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    /// Introductory screen for a reading type, shown at most once a day.
    Info(ReadingTypeKey),
    /// The reading itself.
    Detail(ReadingTypeKey),
    /// The list screen a reading belongs to.
    Parent(ParentScreen),
}

/// Chooses destinations from the info-screen gate and the spread table.
///
/// ## Example
///
/// ```
/// use chrono::NaiveDate;
/// use tarot_flow::gate::{InfoScreenGate, ManualClock, MemoryStore};
/// use tarot_flow::navigation::{Destination, ReadingRouter};
/// use tarot_flow::reading::{ParentScreen, SpreadTable};
///
/// let clock = ManualClock::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
/// let gate = InfoScreenGate::new(MemoryStore::new(), clock);
/// let mut router = ReadingRouter::new(gate, SpreadTable::standard());
/// let key = "KARİYER AÇILIMI".into();
///
/// assert_eq!(router.open(&key), Destination::Info(key.clone()));
/// assert_eq!(router.proceed_from_info(&key).unwrap(), Destination::Detail(key.clone()));
/// assert_eq!(router.open(&key), Destination::Detail(key.clone()));
/// assert_eq!(router.back_from_detail(&key), Destination::Parent(ParentScreen::Career));
/// ```
#[derive(Debug)]
pub struct ReadingRouter<S, C> {
    gate: InfoScreenGate<S, C>,
    table: Arc<SpreadTable>,
}

impl<S: InfoScreenStore, C: Clock> ReadingRouter<S, C> {
    #[must_use]
    pub fn new(gate: InfoScreenGate<S, C>, table: Arc<SpreadTable>) -> Self {
        Self { gate, table }
    }

    /// First screen for a reading: Info if due today, otherwise Detail.
    #[must_use]
    pub fn open(&self, reading: &ReadingTypeKey) -> Destination {
        let destination = if self.gate.should_show(reading) {
            Destination::Info(reading.clone())
        } else {
            Destination::Detail(reading.clone())
        };
        debug!("Open {} -> {:?}", reading, destination);
        destination
    }

    /// The user left the info screen for the reading.
    ///
    /// Records the info screen as shown, then routes to Detail. A failed
    /// write is returned to the caller; the record stays as it was.
    pub fn proceed_from_info(&mut self, reading: &ReadingTypeKey) -> Result<Destination, StoreError> {
        self.gate.mark_shown(reading)?;
        Ok(Destination::Detail(reading.clone()))
    }

    /// Back navigation from a reading's detail screen. Never goes to Info.
    #[must_use]
    pub fn back_from_detail(&self, reading: &ReadingTypeKey) -> Destination {
        Destination::Parent(self.parent_of(reading))
    }

    /// Parent screen of a reading type; unmapped types go home.
    #[must_use]
    pub fn parent_of(&self, reading: &ReadingTypeKey) -> ParentScreen {
        self.table.parent(reading)
    }

    pub fn gate(&self) -> &InfoScreenGate<S, C> {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut InfoScreenGate<S, C> {
        &mut self.gate
    }

    pub fn table(&self) -> &SpreadTable {
        &self.table
    }
}
