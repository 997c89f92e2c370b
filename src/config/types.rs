//! Configuration types.
//!
//! These structures are deserialized from the YAML files in a
//! configuration directory.

use serde::Deserialize;

use crate::calculation::PayoutRounding;
use crate::models::{Employee, EmployeeId};

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Socket address the API listens on (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

/// Payout calculation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayoutSettings {
    /// How weekly totals are rounded to cents.
    #[serde(default)]
    pub rounding: PayoutRounding,
}

/// Contents of `settings.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Payout calculation settings.
    #[serde(default)]
    pub payout: PayoutSettings,
}

/// One entry of `employees.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeEntry {
    /// Unique employee id.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
}

impl From<EmployeeEntry> for Employee {
    fn from(entry: EmployeeEntry) -> Self {
        Employee::new(entry.id, entry.name)
    }
}

/// Contents of `employees.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeDirectory {
    /// Every employee that shifts may reference.
    pub employees: Vec<EmployeeEntry>,
}
