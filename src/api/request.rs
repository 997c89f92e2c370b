//! Request types for the JustTip API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! roster and tip endpoints.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{EmployeeId, NewShift, time_of_day};

/// Request body for `POST /api/roster/shifts` and `PUT /api/roster/shifts/{id}`.
///
/// Times accept `HH:MM` or `HH:MM:SS`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRequest {
    /// The employee to roster.
    pub employee_id: EmployeeId,
    /// The business day of the shift.
    pub date: NaiveDate,
    /// When the shift starts.
    #[serde(with = "time_of_day")]
    pub start_time: NaiveTime,
    /// When the shift ends.
    #[serde(with = "time_of_day")]
    pub end_time: NaiveTime,
}

impl From<ShiftRequest> for NewShift {
    fn from(req: ShiftRequest) -> Self {
        NewShift {
            employee_id: req.employee_id,
            date: req.date,
            start_time: req.start_time,
            end_time: req.end_time,
        }
    }
}

/// Query string for `GET /api/roster`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartDateQuery {
    /// First day of the roster window.
    pub start_date: NaiveDate,
}

/// Query string for the `/api/tips/*` read endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekStartQuery {
    /// First day of the tip week.
    pub week_start: NaiveDate,
}
