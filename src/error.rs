//! Error types for the JustTip engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while scheduling shifts, saving
//! tip pools or loading configuration.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{EmployeeId, ShiftId};

/// The main error type for the JustTip engine.
///
/// Every validation failure carries the offending values so a caller can
/// correct the request without a second round trip.
///
/// # Example
///
/// ```
/// use justtip::error::EngineError;
///
/// let error = EngineError::ShiftNotFound { shift_id: 42 };
/// assert_eq!(error.to_string(), "Shift 42 not found");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The start time is not strictly before the end time.
    #[error("Invalid time range: start {start} must be before end {end}")]
    InvalidRange {
        /// The requested start time.
        start: NaiveTime,
        /// The requested end time.
        end: NaiveTime,
    },

    /// The mutation targets a date before the current business day.
    #[error("Cannot create, update, or delete shifts for past date {date} (today is {today})")]
    RetroactiveEdit {
        /// The date the mutation targeted.
        date: NaiveDate,
        /// The business day the guard compared against.
        today: NaiveDate,
    },

    /// The referenced employee does not exist.
    #[error("Employee {employee_id} not found")]
    EmployeeNotFound {
        /// The unknown employee id.
        employee_id: EmployeeId,
    },

    /// The referenced shift does not exist.
    #[error("Shift {shift_id} not found")]
    ShiftNotFound {
        /// The unknown shift id.
        shift_id: ShiftId,
    },

    /// The candidate interval intersects an existing shift of the same employee.
    #[error(
        "Employee {employee_id} already has a shift on {date} that overlaps {start}-{end}"
    )]
    OverlapConflict {
        /// The employee being scheduled.
        employee_id: EmployeeId,
        /// The business day of the candidate shift.
        date: NaiveDate,
        /// The candidate start time.
        start: NaiveTime,
        /// The candidate end time.
        end: NaiveTime,
    },

    /// Another writer committed a conflicting shift after validation passed.
    #[error("Concurrent write conflict for employee {employee_id} on {date}; re-validate and retry")]
    ConcurrencyConflict {
        /// The employee whose calendar was contended.
        employee_id: EmployeeId,
        /// The contended business day.
        date: NaiveDate,
    },

    /// A daily tip amount was out of range or finer than cents.
    #[error(
        "Invalid tip amount {amount} for {date}: amount must be between 0 and 1000000000.00 with at most 2 decimal places"
    )]
    InvalidTipAmount {
        /// The day of the rejected pool.
        date: NaiveDate,
        /// The rejected amount.
        amount: Decimal,
    },

    /// The backing store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

impl EngineError {
    /// Returns true if the caller may re-validate and retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EngineError::ConcurrencyConflict { .. })
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
