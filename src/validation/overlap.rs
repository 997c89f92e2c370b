//! Overlap detection over half-open time intervals.

use chrono::NaiveTime;

use crate::models::{NewShift, Shift, ShiftId};

/// Returns true if `[start, end)` and `[other_start, other_end)` intersect
/// with positive width.
///
/// Back-to-back intervals do not overlap; containment and equality do.
///
/// # Examples
///
/// ```
/// use justtip::validation::intervals_overlap;
/// use chrono::NaiveTime;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// assert!(!intervals_overlap(t(9, 0), t(10, 30), t(10, 30), t(12, 0)));
/// assert!(intervals_overlap(t(9, 0), t(10, 30), t(10, 29), t(12, 0)));
/// ```
pub fn intervals_overlap(
    start: NaiveTime,
    end: NaiveTime,
    other_start: NaiveTime,
    other_end: NaiveTime,
) -> bool {
    start < other_end && end > other_start
}

/// Returns true if `candidate` conflicts with any shift in `existing` for
/// the same employee on the same date.
///
/// `exclude_shift_id` removes a shift from the comparison set; update flows
/// pass the id of the shift being edited so it does not conflict with its
/// own prior record.
pub fn has_overlap(
    candidate: &NewShift,
    existing: &[Shift],
    exclude_shift_id: Option<ShiftId>,
) -> bool {
    existing
        .iter()
        .filter(|s| s.employee_id == candidate.employee_id && s.date == candidate.date)
        .filter(|s| Some(s.id) != exclude_shift_id)
        .any(|s| {
            intervals_overlap(
                candidate.start_time,
                candidate.end_time,
                s.start_time,
                s.end_time,
            )
        })
}
