//! Tip pools and weekly payouts.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::calculation::{PayoutRounding, calculate_weekly_payout};
use crate::error::{EngineError, EngineResult};
use crate::models::{DailyTipPool, EmployeeId, SaveTipsReport, TipSaveFailure, Week, WeeklyPayout};
use crate::store::{EmployeeStore, ShiftStore, TipPoolStore};

/// Largest daily tip amount accepted: 1,000,000,000.00.
pub const MAX_DAILY_TIP_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Decimal places a daily tip amount may carry.
pub const TIP_DECIMAL_PLACES: u32 = 2;

/// Saves daily tip pools and computes weekly payouts.
pub struct TipService {
    shifts: Arc<dyn ShiftStore>,
    pools: Arc<dyn TipPoolStore>,
    employees: Arc<dyn EmployeeStore>,
    rounding: PayoutRounding,
}

impl TipService {
    /// Creates a tip service that rounds weekly totals with `rounding`.
    pub fn new(
        shifts: Arc<dyn ShiftStore>,
        pools: Arc<dyn TipPoolStore>,
        employees: Arc<dyn EmployeeStore>,
        rounding: PayoutRounding,
    ) -> Self {
        Self {
            shifts,
            pools,
            employees,
            rounding,
        }
    }

    /// Upserts each pool independently.
    ///
    /// An amount that is negative, above [`MAX_DAILY_TIP_AMOUNT`] or carries
    /// more than [`TIP_DECIMAL_PLACES`] decimal places is rejected with
    /// [`EngineError::InvalidTipAmount`]. A rejection or a store failure
    /// affects only that entry. The
    /// report lists saved dates and rejected entries in input order.
    pub async fn save_daily_tips(&self, entries: Vec<DailyTipPool>) -> SaveTipsReport {
        let mut report = SaveTipsReport::default();

        for entry in entries {
            match self.save_one(&entry).await {
                Ok(()) => report.saved.push(entry.date),
                Err(err) => {
                    warn!(date = %entry.date, amount = %entry.amount, error = %err, "Rejected tip pool");
                    report.failed.push(TipSaveFailure {
                        date: entry.date,
                        error: err.to_string(),
                    });
                }
            }
        }

        info!(
            saved = report.saved.len(),
            failed = report.failed.len(),
            "Saved daily tip pools"
        );
        report
    }

    async fn save_one(&self, entry: &DailyTipPool) -> EngineResult<()> {
        if entry.amount < Decimal::ZERO
            || entry.amount > MAX_DAILY_TIP_AMOUNT
            || entry.amount.scale() > TIP_DECIMAL_PLACES
        {
            return Err(EngineError::InvalidTipAmount {
                date: entry.date,
                amount: entry.amount,
            });
        }
        self.pools.upsert(entry.date, entry.amount).await?;
        Ok(())
    }

    /// Returns the pools recorded in `[week_start, week_start + 6]`, ordered by date.
    pub async fn get_daily_tips(&self, week_start: NaiveDate) -> EngineResult<Vec<DailyTipPool>> {
        let week = Week::starting(week_start);
        Ok(self
            .pools
            .pools_in_range(week.start_date, week.end_date())
            .await?)
    }

    /// Allocates the week's pools across the employees who worked it.
    pub async fn calculate_weekly_payout(&self, week_start: NaiveDate) -> EngineResult<WeeklyPayout> {
        let week = Week::starting(week_start);
        let shifts = self
            .shifts
            .shifts_in_range(week.start_date, week.end_date())
            .await?;
        let pools = self
            .pools
            .pools_in_range(week.start_date, week.end_date())
            .await?;
        let names: HashMap<EmployeeId, String> = self
            .employees
            .list()
            .await?
            .into_iter()
            .map(|e| (e.id, e.name))
            .collect();

        let payout = calculate_weekly_payout(week, &shifts, &pools, &names, self.rounding);

        info!(
            week_start = %payout.week_start,
            total_tips = %payout.total_weekly_tips,
            total_hours = %payout.total_weekly_hours,
            employees = payout.employee_payouts.len(),
            "Calculated weekly payout"
        );
        Ok(payout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::str::FromStr;

    use crate::models::{Employee, NewShift};
    use crate::store::{InMemoryEmployeeStore, InMemoryShiftStore, InMemoryTipPoolStore};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    struct Fixture {
        service: TipService,
        shifts: Arc<InMemoryShiftStore>,
        pools: Arc<InMemoryTipPoolStore>,
    }

    fn fixture(rounding: PayoutRounding) -> Fixture {
        let shifts = Arc::new(InMemoryShiftStore::new());
        let pools = Arc::new(InMemoryTipPoolStore::new());
        let employees = Arc::new(InMemoryEmployeeStore::new([
            Employee::new(1, "Alice"),
            Employee::new(2, "Bob"),
            Employee::new(3, "Carol"),
        ]));
        let service = TipService::new(shifts.clone(), pools.clone(), employees, rounding);
        Fixture {
            service,
            shifts,
            pools,
        }
    }

    async fn book(f: &Fixture, employee_id: EmployeeId, date: NaiveDate, start: u32, end: u32) {
        f.shifts
            .insert(NewShift {
                employee_id,
                date,
                start_time: t(start),
                end_time: t(end),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_save_reports_partial_success() {
        let f = fixture(PayoutRounding::HalfEven);

        let report = f
            .service
            .save_daily_tips(vec![
                DailyTipPool::new(day(12), dec("100.00")),
                DailyTipPool::new(day(13), dec("-5.00")),
                DailyTipPool::new(day(14), dec("0")),
            ])
            .await;

        assert_eq!(report.saved, vec![day(12), day(14)]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].date, day(13));
        assert!(!report.is_complete());
        assert!(f.pools.pools_in_range(day(13), day(13)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_replaces_existing_pool() {
        let f = fixture(PayoutRounding::HalfEven);
        f.service
            .save_daily_tips(vec![DailyTipPool::new(day(12), dec("80"))])
            .await;
        let report = f
            .service
            .save_daily_tips(vec![DailyTipPool::new(day(12), dec("120.50"))])
            .await;

        assert!(report.is_complete());
        assert_eq!(
            f.service.get_daily_tips(day(12)).await.unwrap(),
            vec![DailyTipPool::new(day(12), dec("120.50"))]
        );
    }

    #[tokio::test]
    async fn test_get_daily_tips_is_windowed() {
        let f = fixture(PayoutRounding::HalfEven);
        f.service
            .save_daily_tips(vec![
                DailyTipPool::new(day(11), dec("1")),
                DailyTipPool::new(day(14), dec("2")),
                DailyTipPool::new(day(12), dec("3")),
                DailyTipPool::new(day(19), dec("4")),
            ])
            .await;

        let dates: Vec<NaiveDate> = f
            .service
            .get_daily_tips(day(12))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.date)
            .collect();

        assert_eq!(dates, vec![day(12), day(14)]);
    }

    #[tokio::test]
    async fn test_weekly_payout_from_stores() {
        let f = fixture(PayoutRounding::HalfEven);
        book(&f, 1, day(16), 9, 12).await;
        book(&f, 2, day(16), 12, 18).await;
        book(&f, 3, day(20), 9, 17).await;
        f.service
            .save_daily_tips(vec![DailyTipPool::new(day(16), dec("90"))])
            .await;

        let payout = f.service.calculate_weekly_payout(day(12)).await.unwrap();

        assert_eq!(payout.week_end, day(18));
        assert_eq!(payout.total_weekly_tips, dec("90"));
        assert_eq!(payout.total_weekly_hours, dec("9"));
        assert_eq!(payout.payout_for("Alice").unwrap().payout_amount, dec("30.00"));
        assert_eq!(payout.payout_for("Bob").unwrap().payout_amount, dec("60.00"));
        assert!(payout.payout_for("Carol").is_none());
    }

    #[tokio::test]
    async fn test_weekly_payout_uses_configured_rounding() {
        // 0.25 split over 2h of 4h gives 0.125 each
        for (rounding, expected) in [
            (PayoutRounding::HalfEven, "0.12"),
            (PayoutRounding::HalfUp, "0.13"),
        ] {
            let f = fixture(rounding);
            book(&f, 1, day(13), 9, 11).await;
            book(&f, 2, day(13), 11, 13).await;
            f.service
                .save_daily_tips(vec![DailyTipPool::new(day(13), dec("0.25"))])
                .await;

            let payout = f.service.calculate_weekly_payout(day(12)).await.unwrap();

            assert_eq!(payout.payout_for("Alice").unwrap().payout_amount.to_string(), expected);
        }
    }

    #[tokio::test]
    async fn test_weekly_payout_is_idempotent() {
        let f = fixture(PayoutRounding::HalfEven);
        book(&f, 1, day(12), 9, 17).await;
        book(&f, 2, day(12), 10, 14).await;
        f.service
            .save_daily_tips(vec![DailyTipPool::new(day(12), dec("100"))])
            .await;

        let first = f.service.calculate_weekly_payout(day(12)).await.unwrap();
        let second = f.service.calculate_weekly_payout(day(12)).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_save_rejects_more_than_two_decimal_places() {
        let f = fixture(PayoutRounding::HalfEven);

        let report = f
            .service
            .save_daily_tips(vec![
                DailyTipPool::new(day(12), dec("10.005")),
                DailyTipPool::new(day(13), dec("10.50")),
            ])
            .await;

        assert_eq!(report.saved, vec![day(13)]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].date, day(12));
        assert!(report.failed[0].error.contains("10.005"));
        assert!(f.pools.pools_in_range(day(12), day(12)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_rejects_amount_above_maximum() {
        let f = fixture(PayoutRounding::HalfEven);

        let report = f
            .service
            .save_daily_tips(vec![
                DailyTipPool::new(day(12), Decimal::MAX),
                DailyTipPool::new(day(13), MAX_DAILY_TIP_AMOUNT + dec("0.01")),
                DailyTipPool::new(day(14), MAX_DAILY_TIP_AMOUNT),
            ])
            .await;

        assert_eq!(report.saved, vec![day(14)]);
        let failed: Vec<NaiveDate> = report.failed.iter().map(|failure| failure.date).collect();
        assert_eq!(failed, vec![day(12), day(13)]);
    }

    #[tokio::test]
    async fn test_weekly_payout_with_maximum_pools_completes() {
        let f = fixture(PayoutRounding::HalfEven);
        for d in 12..=18 {
            book(&f, 1, day(d), 9, 10).await;
            book(&f, 2, day(d), 9, 12).await;
        }
        let pools = (12..=18)
            .map(|d| DailyTipPool::new(day(d), MAX_DAILY_TIP_AMOUNT))
            .collect();
        assert!(f.service.save_daily_tips(pools).await.is_complete());

        let payout = f.service.calculate_weekly_payout(day(12)).await.unwrap();

        assert_eq!(payout.total_weekly_tips, dec("7000000000"));
        assert_eq!(payout.payout_for("Alice").unwrap().payout_amount, dec("1750000000.00"));
        assert_eq!(payout.payout_for("Bob").unwrap().payout_amount, dec("5250000000.00"));
    }
}
