//! Weekly roster view types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeId, ShiftView};

/// The shifts of one employee within a roster week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRoster {
    /// The employee.
    pub employee_id: EmployeeId,
    /// The employee's display name at read time.
    pub employee_name: String,
    /// Hours across all of the employee's shifts in the week.
    pub total_hours: Decimal,
    /// The employee's shifts, ordered by date then start time.
    pub shifts: Vec<ShiftView>,
}

/// All shifts scheduled in a seven-day window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRoster {
    /// The first day of the window.
    pub week_start: NaiveDate,
    /// The last day of the window (inclusive).
    pub week_end: NaiveDate,
    /// Every shift in the window, ordered by date then start time.
    pub shifts: Vec<ShiftView>,
    /// The same shifts grouped by employee, sorted by employee name.
    pub employees: Vec<EmployeeRoster>,
}
