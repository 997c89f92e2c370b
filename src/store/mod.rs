//! Storage interfaces consumed by the services.
//!
//! The services only talk to these traits. [`memory`] provides in-process
//! implementations; a database-backed store implements the same traits.

pub mod memory;

mod locks;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::EngineError;
use crate::models::{DailyTipPool, Employee, EmployeeId, NewShift, Shift, ShiftId};

pub use locks::ShiftLocks;
pub use memory::{InMemoryEmployeeStore, InMemoryShiftStore, InMemoryTipPoolStore};

/// Errors reported by a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The write would double-book an employee; another writer got there first.
    #[error("write conflicts with existing shift {existing_shift_id}")]
    Conflict {
        /// The shift that already occupies the interval.
        existing_shift_id: ShiftId,
    },

    /// The record to replace or remove does not exist.
    #[error("shift {0} does not exist")]
    Missing(ShiftId),

    /// The store could not be reached or failed internally.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A type alias for Results that return StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Converts a failed write on `(employee_id, date)` into an engine error.
    ///
    /// A constraint violation at this point means another writer committed
    /// after validation passed, which is retryable.
    pub fn into_write_error(self, employee_id: EmployeeId, date: NaiveDate) -> EngineError {
        match self {
            StoreError::Conflict { .. } => EngineError::ConcurrencyConflict { employee_id, date },
            other => other.into(),
        }
    }
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Missing(shift_id) => EngineError::ShiftNotFound { shift_id },
            other => EngineError::Storage {
                message: other.to_string(),
            },
        }
    }
}

/// Read-only employee lookup.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Returns the employee with `id`, if any.
    async fn get_by_id(&self, id: EmployeeId) -> StoreResult<Option<Employee>>;

    /// Returns every employee.
    async fn list(&self) -> StoreResult<Vec<Employee>>;
}

/// Shift persistence.
///
/// Implementations must reject an `insert` or `replace` that would overlap
/// another shift of the same employee on the same date with
/// [`StoreError::Conflict`], atomically with the write.
#[async_trait]
pub trait ShiftStore: Send + Sync {
    /// Returns shifts with `start <= date <= end`, ordered by date, start
    /// time, then id.
    async fn shifts_in_range(&self, start: NaiveDate, end: NaiveDate) -> StoreResult<Vec<Shift>>;

    /// Returns the shift with `id`, if any.
    async fn shift_by_id(&self, id: ShiftId) -> StoreResult<Option<Shift>>;

    /// Returns every shift of `employee_id` on `date`.
    async fn shifts_for_employee_on(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> StoreResult<Vec<Shift>>;

    /// Persists a new shift and returns it with its assigned id.
    async fn insert(&self, shift: NewShift) -> StoreResult<Shift>;

    /// Replaces the stored shift that has the same id.
    async fn replace(&self, shift: Shift) -> StoreResult<()>;

    /// Removes the shift with `id`.
    async fn remove(&self, id: ShiftId) -> StoreResult<()>;
}

/// Daily tip pool persistence.
#[async_trait]
pub trait TipPoolStore: Send + Sync {
    /// Writes the pool for `date`, replacing any existing amount.
    async fn upsert(&self, date: NaiveDate, amount: Decimal) -> StoreResult<()>;

    /// Returns pools with `start <= date <= end`, ordered by date.
    async fn pools_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<DailyTipPool>>;
}
