//! Retroactive-edit guard and the business-day clock it reads.

use chrono::{Local, NaiveDate};

use crate::error::{EngineError, EngineResult};

/// Source of the current business day.
///
/// The roster service holds a single clock for the whole process so every
/// request is judged against the same notion of "today".
pub trait BusinessClock: Send + Sync {
    /// Returns the current business day.
    fn today(&self) -> NaiveDate;
}

/// Reads the business day from the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl BusinessClock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl BusinessClock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Fails with [`EngineError::RetroactiveEdit`] if `date` is strictly before
/// `today`. Today itself is allowed.
///
/// # Examples
///
/// ```
/// use justtip::validation::assert_not_past;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// assert!(assert_not_past(today, today).is_ok());
/// assert!(assert_not_past(today.pred_opt().unwrap(), today).is_err());
/// ```
pub fn assert_not_past(date: NaiveDate, today: NaiveDate) -> EngineResult<()> {
    if date < today {
        return Err(EngineError::RetroactiveEdit { date, today });
    }
    Ok(())
}
