//! Weekly payout result types.
//!
//! These are derived views: they are recomputed from shifts and tip pools
//! on every request and never persisted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// One employee's share of the week's tip pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayout {
    /// The employee the payout belongs to.
    pub employee_id: EmployeeId,
    /// The employee's display name at calculation time.
    pub employee_name: String,
    /// Hours worked across the week.
    pub total_hours: Decimal,
    /// The weekly payout, rounded once to two decimal places.
    pub payout_amount: Decimal,
}

/// The result of allocating a week's tip pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPayout {
    /// The first day of the window.
    pub week_start: NaiveDate,
    /// The last day of the window (inclusive).
    pub week_end: NaiveDate,
    /// Sum of every pool in the window, including days nobody worked.
    pub total_weekly_tips: Decimal,
    /// Sum of every shift's hours in the window.
    pub total_weekly_hours: Decimal,
    /// Per-employee payouts, sorted by name.
    pub employee_payouts: Vec<EmployeePayout>,
}

#[cfg(test)]
impl WeeklyPayout {
    pub(crate) fn payout_for(&self, employee_name: &str) -> Option<&EmployeePayout> {
        self.employee_payouts
            .iter()
            .find(|p| p.employee_name == employee_name)
    }
}
