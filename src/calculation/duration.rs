//! Shift duration arithmetic.
//!
//! A shift is described by a start/end time-of-day pair on a single
//! business day. When the end time is earlier than the start time the shift
//! is treated as ending on the following day.

use chrono::NaiveTime;
use rust_decimal::Decimal;

const SECONDS_PER_HOUR: i64 = 60 * 60;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Returns the whole seconds between `start` and `end`, wrapping past midnight.
///
/// Totals over several shifts should add these up and convert once with
/// [`hours_from_seconds`].
pub fn shift_seconds(start: NaiveTime, end: NaiveTime) -> i64 {
    let seconds = end.signed_duration_since(start).num_seconds();
    if seconds < 0 {
        seconds + SECONDS_PER_DAY
    } else {
        seconds
    }
}

/// Converts a second count to normalized hours.
///
/// ```
/// use justtip::calculation::hours_from_seconds;
/// use rust_decimal::Decimal;
///
/// assert_eq!(hours_from_seconds(3 * 20 * 60), Decimal::ONE);
/// ```
pub fn hours_from_seconds(seconds: i64) -> Decimal {
    (Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR)).normalize()
}

/// Returns the hours between `start` and `end`, wrapping past midnight.
///
/// - `end >= start`: `end - start`
/// - `end < start`: `(end + 24h) - start`
///
/// Equal times yield zero hours; callers that need a positive-width shift
/// validate the range separately.
///
/// # Examples
///
/// ```
/// use justtip::calculation::shift_hours;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let half_ten = NaiveTime::from_hms_opt(10, 30, 0).unwrap();
/// assert_eq!(shift_hours(nine, half_ten), Decimal::new(15, 1));
///
/// let ten_pm = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
/// let six_am = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
/// assert_eq!(shift_hours(ten_pm, six_am), Decimal::from(8));
/// ```
pub fn shift_hours(start: NaiveTime, end: NaiveTime) -> Decimal {
    hours_from_seconds(shift_seconds(start, end))
}
