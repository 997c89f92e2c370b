//! Application services.
//!
//! [`RosterService`] owns every shift mutation; [`TipService`] owns tip
//! pools and the weekly payout. The two share stores but no mutable state.

mod roster;
mod tips;

pub use roster::RosterService;
pub use tips::{MAX_DAILY_TIP_AMOUNT, TIP_DECIMAL_PLACES, TipService};
