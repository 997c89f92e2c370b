//! Weekly tip-pool allocation.
//!
//! Each day's pool is split across the employees who worked that day in
//! proportion to their hours. Daily shares accumulate at full precision
//! into a weekly total per employee, which is rounded once at the end.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::hours_from_seconds;
use crate::models::{DailyTipPool, EmployeeId, EmployeePayout, Shift, Week, WeeklyPayout};

/// Number of decimal places payouts are rounded to.
pub const PAYOUT_DECIMAL_PLACES: u32 = 2;

/// Name shown for shifts whose employee cannot be resolved.
pub const UNKNOWN_EMPLOYEE_NAME: &str = "Unknown";

/// How a weekly payout total is rounded to cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutRounding {
    /// Round half to even (banker's rounding): 0.125 becomes 0.12.
    #[default]
    HalfEven,
    /// Round half away from zero: 0.125 becomes 0.13.
    HalfUp,
}

impl PayoutRounding {
    /// Rounds `amount` to cents using this strategy.
    ///
    /// The result always carries exactly two decimal places.
    ///
    /// # Examples
    ///
    /// ```
    /// use justtip::calculation::PayoutRounding;
    /// use rust_decimal::Decimal;
    ///
    /// let amount = Decimal::new(125, 3); // 0.125
    /// assert_eq!(PayoutRounding::HalfEven.round(amount).to_string(), "0.12");
    /// assert_eq!(PayoutRounding::HalfUp.round(amount).to_string(), "0.13");
    /// ```
    pub fn round(self, amount: Decimal) -> Decimal {
        let strategy = match self {
            PayoutRounding::HalfEven => RoundingStrategy::MidpointNearestEven,
            PayoutRounding::HalfUp => RoundingStrategy::MidpointAwayFromZero,
        };
        let mut rounded = amount.round_dp_with_strategy(PAYOUT_DECIMAL_PLACES, strategy);
        rounded.rescale(PAYOUT_DECIMAL_PLACES);
        rounded
    }
}

#[derive(Debug, Default)]
struct Accumulator {
    seconds: i64,
    payout: Decimal,
}

/// Adds `amount` to `total`, saturating at [`Decimal::MAX`].
fn saturating_add(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or_else(|| {
        warn!(%total, %amount, "Tip total overflowed; saturating");
        Decimal::MAX
    })
}

/// Returns `daily_tips * worked / day_seconds`.
///
/// Multiplies first so shares stay exact. A product too large for
/// `Decimal` falls back to scaling by the worked fraction, which is at most
/// one.
fn daily_share(daily_tips: Decimal, worked: i64, day_seconds: i64) -> Decimal {
    let worked = Decimal::from(worked);
    let day_seconds = Decimal::from(day_seconds);
    daily_tips
        .checked_mul(worked)
        .and_then(|product| product.checked_div(day_seconds))
        .or_else(|| worked.checked_div(day_seconds)?.checked_mul(daily_tips))
        .unwrap_or_else(|| {
            warn!(%daily_tips, %worked, %day_seconds, "Daily share overflowed; allocating zero");
            Decimal::ZERO
        })
}

/// Allocates a week's tip pools across the employees who worked it.
///
/// For each day that has at least one shift:
/// 1. `daily_hours` is the sum of that day's shift hours; a day with zero
///    hours is skipped
/// 2. `hourly_rate = daily_tips / daily_hours`, where a missing pool counts as zero
/// 3. each employee earns `hourly_rate * employee_daily_hours`
///
/// Worked time is summed in whole seconds and converted to hours once, so
/// totals over minute-granular shifts are exact. A share is computed as
/// `daily_tips * employee_seconds / daily_seconds`, which equals step 3.
///
/// Pools on days without shifts count toward `total_weekly_tips` but are
/// not allocated to anyone. Each employee's weekly total is rounded once;
/// cent remainders are not redistributed. Sums too large for `Decimal`
/// saturate at [`Decimal::MAX`] instead of failing.
///
/// Shifts and pools outside `week` are ignored. Employees are grouped by
/// id and named through `employee_names`, with
/// [`UNKNOWN_EMPLOYEE_NAME`] for ids that are missing. The result is sorted
/// by name (ordinal, case-sensitive), then by id.
///
/// The function is pure: identical inputs always produce identical output.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use justtip::calculation::{calculate_weekly_payout, PayoutRounding};
/// use justtip::models::{DailyTipPool, Shift, Week};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let friday = NaiveDate::from_ymd_opt(2026, 1, 16).unwrap();
/// let at = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
/// let shifts = vec![
///     Shift { id: 1, employee_id: 1, date: friday, start_time: at(9), end_time: at(12) },
///     Shift { id: 2, employee_id: 2, date: friday, start_time: at(12), end_time: at(18) },
/// ];
/// let pools = vec![DailyTipPool::new(friday, Decimal::from(90))];
/// let names = HashMap::from([(1, "Alice".to_string()), (2, "Bob".to_string())]);
///
/// let payout = calculate_weekly_payout(
///     Week::starting(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()),
///     &shifts,
///     &pools,
///     &names,
///     PayoutRounding::HalfEven,
/// );
/// let alice = &payout.employee_payouts[0];
/// let bob = &payout.employee_payouts[1];
/// assert_eq!(alice.payout_amount, Decimal::from(30));
/// assert_eq!(bob.payout_amount, Decimal::from(60));
/// assert_eq!(payout.total_weekly_hours, Decimal::from(9));
/// ```
pub fn calculate_weekly_payout(
    week: Week,
    shifts: &[Shift],
    pools: &[DailyTipPool],
    employee_names: &HashMap<EmployeeId, String>,
    rounding: PayoutRounding,
) -> WeeklyPayout {
    let tips_by_date: BTreeMap<NaiveDate, Decimal> = pools
        .iter()
        .filter(|p| week.contains(p.date))
        .map(|p| (p.date, p.amount))
        .collect();

    let mut shifts_by_date: BTreeMap<NaiveDate, Vec<&Shift>> = BTreeMap::new();
    for shift in shifts.iter().filter(|s| week.contains(s.date)) {
        shifts_by_date.entry(shift.date).or_default().push(shift);
    }

    let total_weekly_tips = tips_by_date
        .values()
        .fold(Decimal::ZERO, |total, &amount| saturating_add(total, amount));
    let total_weekly_seconds: i64 = shifts_by_date
        .values()
        .flatten()
        .map(|s| s.duration_seconds())
        .sum();

    let mut weekly: BTreeMap<EmployeeId, Accumulator> = BTreeMap::new();

    for (date, day_shifts) in &shifts_by_date {
        let daily_tips = tips_by_date.get(date).copied().unwrap_or(Decimal::ZERO);

        let mut seconds_by_employee: BTreeMap<EmployeeId, i64> = BTreeMap::new();
        for shift in day_shifts {
            *seconds_by_employee.entry(shift.employee_id).or_default() += shift.duration_seconds();
        }

        let day_seconds: i64 = seconds_by_employee.values().sum();
        if day_seconds == 0 {
            continue;
        }

        for (employee_id, worked) in seconds_by_employee {
            let entry = weekly.entry(employee_id).or_default();
            entry.seconds += worked;
            entry.payout = saturating_add(entry.payout, daily_share(daily_tips, worked, day_seconds));
        }
    }

    let mut employee_payouts: Vec<EmployeePayout> = weekly
        .into_iter()
        .map(|(employee_id, acc)| EmployeePayout {
            employee_id,
            employee_name: employee_names
                .get(&employee_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_EMPLOYEE_NAME.to_string()),
            total_hours: hours_from_seconds(acc.seconds),
            payout_amount: rounding.round(acc.payout),
        })
        .collect();

    employee_payouts.sort_by(|a, b| {
        a.employee_name
            .cmp(&b.employee_name)
            .then(a.employee_id.cmp(&b.employee_id))
    });

    WeeklyPayout {
        week_start: week.start_date,
        week_end: week.end_date(),
        total_weekly_tips,
        total_weekly_hours: hours_from_seconds(total_weekly_seconds),
        employee_payouts,
    }
}
