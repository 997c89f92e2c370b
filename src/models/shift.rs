//! Shift model and related types.
//!
//! A shift is stored without the employee's name; [`ShiftView`] is the
//! read-time decoration that carries it.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::calculation::shift_seconds;

use super::EmployeeId;

/// Identifier of a shift in the shift store.
pub type ShiftId = u32;

/// A scheduled work interval for one employee on one business day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    /// Unique identifier for the shift, assigned by the store.
    pub id: ShiftId,
    /// The employee working the shift.
    pub employee_id: EmployeeId,
    /// The business day the shift belongs to.
    pub date: NaiveDate,
    /// The start time of the shift.
    #[serde(with = "time_of_day")]
    pub start_time: NaiveTime,
    /// The end time of the shift. Earlier than `start_time` means the
    /// shift ends on the following day.
    #[serde(with = "time_of_day")]
    pub end_time: NaiveTime,
}

impl Shift {
    /// Returns the worked time in whole seconds, wrapping past midnight
    /// when the end time is earlier than the start time.
    ///
    /// # Examples
    ///
    /// ```
    /// use justtip::models::Shift;
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let shift = Shift {
    ///     id: 1,
    ///     employee_id: 1,
    ///     date: NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
    ///     start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(2, 0, 0).unwrap(),
    /// };
    /// assert_eq!(shift.duration_seconds(), 4 * 60 * 60);
    /// ```
    pub fn duration_seconds(&self) -> i64 {
        shift_seconds(self.start_time, self.end_time)
    }

    /// Decorates the shift with the employee's display name.
    pub fn with_employee_name(self, employee_name: impl Into<String>) -> ShiftView {
        ShiftView {
            id: self.id,
            employee_id: self.employee_id,
            employee_name: employee_name.into(),
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

/// A shift that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShift {
    /// The employee working the shift.
    pub employee_id: EmployeeId,
    /// The business day the shift belongs to.
    pub date: NaiveDate,
    /// The start time of the shift.
    pub start_time: NaiveTime,
    /// The end time of the shift.
    pub end_time: NaiveTime,
}

impl NewShift {
    /// Attaches a store-assigned id.
    pub fn into_shift(self, id: ShiftId) -> Shift {
        Shift {
            id,
            employee_id: self.employee_id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

/// A shift enriched with the employee's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftView {
    /// Unique identifier for the shift.
    pub id: ShiftId,
    /// The employee working the shift.
    pub employee_id: EmployeeId,
    /// The employee's display name at read time.
    pub employee_name: String,
    /// The business day the shift belongs to.
    pub date: NaiveDate,
    /// The start time of the shift.
    #[serde(with = "time_of_day")]
    pub start_time: NaiveTime,
    /// The end time of the shift.
    #[serde(with = "time_of_day")]
    pub end_time: NaiveTime,
}

impl ShiftView {
    /// Returns the worked time in whole seconds.
    pub fn duration_seconds(&self) -> i64 {
        shift_seconds(self.start_time, self.end_time)
    }
}

/// Serde adapter for times of day.
///
/// Serializes as `HH:MM` and accepts either `HH:MM` or `HH:MM:SS` on input.
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const SHORT: &str = "%H:%M";
    const LONG: &str = "%H:%M:%S";

    /// Serializes a time as `HH:MM`.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(SHORT))
    }

    /// Deserializes a time from `HH:MM` or `HH:MM:SS`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(D::Error::custom)
    }

    /// Parses a time of day, accepting `HH:MM` or `HH:MM:SS`.
    pub fn parse(raw: &str) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(raw, SHORT)
            .or_else(|_| NaiveTime::parse_from_str(raw, LONG))
            .map_err(|_| format!("invalid time of day '{}', expected HH:MM or HH:MM:SS", raw))
    }
}
