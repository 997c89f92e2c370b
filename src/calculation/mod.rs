//! Calculation logic for the JustTip engine.
//!
//! This module contains shift duration arithmetic (with overnight
//! wraparound) and the weekly tip-pool allocation engine. Everything here
//! is a pure function of its inputs.

mod duration;
mod payout;

pub use duration::{hours_from_seconds, shift_hours, shift_seconds};
pub use payout::{
    PAYOUT_DECIMAL_PLACES, PayoutRounding, UNKNOWN_EMPLOYEE_NAME, calculate_weekly_payout,
};
