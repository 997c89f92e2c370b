//! Daily tip pool model and the report produced when saving pools.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The total gratuity collected for one business day.
///
/// At most one pool exists per date; writing a date again replaces its
/// amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTipPool {
    /// The business day.
    pub date: NaiveDate,
    /// The pooled amount, non-negative with cent precision.
    pub amount: Decimal,
}

impl DailyTipPool {
    /// Creates a new daily pool.
    pub fn new(date: NaiveDate, amount: Decimal) -> Self {
        Self { date, amount }
    }
}

/// One pool that could not be saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipSaveFailure {
    /// The business day of the rejected entry.
    pub date: NaiveDate,
    /// Why the entry was rejected.
    pub error: String,
}

/// Outcome of saving a batch of daily pools.
///
/// Each entry is an independent upsert, so a batch may partially succeed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTipsReport {
    /// Dates whose pool was written.
    pub saved: Vec<NaiveDate>,
    /// Entries that were rejected, in input order.
    pub failed: Vec<TipSaveFailure>,
}

impl SaveTipsReport {
    /// Returns true if every entry was saved.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
