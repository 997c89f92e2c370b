//! Core data models for the JustTip engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod payout;
mod roster;
mod shift;
mod tip_pool;
mod week;

pub use employee::{Employee, EmployeeId};
pub use payout::{EmployeePayout, WeeklyPayout};
pub use roster::{EmployeeRoster, WeeklyRoster};
pub use shift::{NewShift, Shift, ShiftId, ShiftView, time_of_day};
pub use tip_pool::{DailyTipPool, SaveTipsReport, TipSaveFailure};
pub use week::Week;
