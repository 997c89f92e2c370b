//! The seven-day window used by rosters and payouts.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of days in a roster or payout window.
pub const DAYS_IN_WEEK: u64 = 7;

/// A seven-day window starting on an arbitrary date.
///
/// The window is inclusive of both ends: `[start_date, start_date + 6]`.
///
/// # Example
///
/// ```
/// use justtip::models::Week;
/// use chrono::NaiveDate;
///
/// let week = Week::starting(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
/// assert_eq!(week.end_date(), NaiveDate::from_ymd_opt(2026, 1, 18).unwrap());
/// assert!(week.contains(NaiveDate::from_ymd_opt(2026, 1, 18).unwrap()));
/// assert!(!week.contains(NaiveDate::from_ymd_opt(2026, 1, 19).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    /// The first day of the window.
    pub start_date: NaiveDate,
}

impl Week {
    /// Creates the window starting on `start_date`.
    pub fn starting(start_date: NaiveDate) -> Self {
        Self { start_date }
    }

    /// Returns the last day of the window (inclusive).
    pub fn end_date(&self) -> NaiveDate {
        self.start_date
            .checked_add_days(Days::new(DAYS_IN_WEEK - 1))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Checks whether `date` falls within the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date()
    }

    /// Returns every day of the window in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.start_date
            .iter_days()
            .take_while(|d| *d <= self.end_date())
            .collect()
    }
}
