//! Employee model.

use serde::{Deserialize, Serialize};

/// Identifier of an employee in the employee store.
pub type EmployeeId = u32;

/// Represents a worker who can be rostered onto shifts.
///
/// Only the display name may change once the employee is referenced by
/// shifts; the id is the stable join key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// The display name shown on rosters and payouts.
    pub name: String,
}

impl Employee {
    /// Creates a new employee.
    pub fn new(id: EmployeeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
