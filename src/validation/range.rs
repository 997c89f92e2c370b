//! Time range validation for shift requests.

use chrono::NaiveTime;

use crate::error::{EngineError, EngineResult};

/// Fails with [`EngineError::InvalidRange`] unless `start` is strictly
/// before `end`.
///
/// Equal times are rejected. This runs independently of overlap checks,
/// even against an empty calendar.
///
/// # Examples
///
/// ```
/// use justtip::validation::validate_range;
/// use chrono::NaiveTime;
///
/// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let five = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
/// assert!(validate_range(nine, five).is_ok());
/// assert!(validate_range(nine, nine).is_err());
/// ```
pub fn validate_range(start: NaiveTime, end: NaiveTime) -> EngineResult<()> {
    if start >= end {
        return Err(EngineError::InvalidRange { start, end });
    }
    Ok(())
}
