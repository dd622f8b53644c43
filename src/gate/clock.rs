//! Calendar-day clocks for the info-screen gate.

use std::cell::Cell;

use chrono::{Days, Local, NaiveDate};

/// Source of "today" at calendar-day granularity.
pub trait Clock {
    /// Today's date in the clock's time zone.
    fn today(&self) -> NaiveDate;
}

/// Device-local wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Settable clock for tests and previews.
#[derive(Debug)]
pub struct ManualClock {
    today: Cell<NaiveDate>,
}

impl ManualClock {
    /// Clock fixed at `today` until moved.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Cell::new(today),
        }
    }

    /// Jump to a specific date.
    pub fn set(&self, date: NaiveDate) {
        self.today.set(date);
    }

    /// Move forward by `days`. Saturates at the last representable date.
    pub fn advance_days(&self, days: u64) {
        let current = self.today.get();
        self.today
            .set(current.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX));
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(date(2024, 12, 31));
        assert_eq!(clock.today(), date(2024, 12, 31));

        clock.advance_days(1);
        assert_eq!(clock.today(), date(2025, 1, 1));

        clock.set(date(2020, 2, 29));
        assert_eq!((&clock).today(), date(2020, 2, 29));
    }

    #[test]
    fn test_advance_saturates() {
        let clock = ManualClock::new(NaiveDate::MAX);
        clock.advance_days(10);
        assert_eq!(clock.today(), NaiveDate::MAX);
    }

    #[test]
    fn test_local_clock_is_near_utc() {
        let utc = chrono::Utc::now().date_naive();
        let local = LocalClock.today();
        let diff = (local - utc).num_days().abs();
        assert!(diff <= 1);
    }
}
