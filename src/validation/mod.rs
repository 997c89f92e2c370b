//! Validation predicates for shift mutations.
//!
//! Each check is a small pure function so the roster service can compose
//! them in order: range, retroactive guard, then overlap.

mod overlap;
mod range;
mod retroactive;

pub use overlap::{has_overlap, intervals_overlap};
pub use range::validate_range;
pub use retroactive::{BusinessClock, FixedClock, SystemClock, assert_not_past};
