//! Performance benchmarks for weekly payout allocation.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::collections::HashMap;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use justtip::api::{AppState, create_router};
use justtip::calculation::{PayoutRounding, calculate_weekly_payout};
use justtip::models::{DailyTipPool, Employee, NewShift, Shift, Week};
use justtip::validation::FixedClock;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn week_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()
}

/// Two shifts per employee per day, staggered so no employee overlaps itself.
fn create_week(employee_count: u32) -> (Vec<Shift>, Vec<DailyTipPool>, HashMap<u32, String>) {
    let week = Week::starting(week_start());
    let at = |h: u32, m: u32| NaiveTime::from_hms_opt(h, m, 0).unwrap();

    let mut shifts = Vec::new();
    let mut next_id = 1;
    for date in week.days() {
        for employee_id in 1..=employee_count {
            let offset = employee_id % 4;
            for (start, end) in [(at(7 + offset, 0), at(11 + offset, 30)), (at(15, 0), at(18 + offset, 15))] {
                shifts.push(Shift {
                    id: next_id,
                    employee_id,
                    date,
                    start_time: start,
                    end_time: end,
                });
                next_id += 1;
            }
        }
    }

    let pools = week
        .days()
        .into_iter()
        .enumerate()
        .map(|(i, date)| DailyTipPool::new(date, Decimal::new(45_075 + i as i64 * 1_013, 2)))
        .collect();

    let names = (1..=employee_count)
        .map(|id| (id, format!("Employee {:03}", id)))
        .collect();

    (shifts, pools, names)
}

/// Benchmark: the pure allocation over growing rosters.
fn bench_allocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("weekly_allocation");

    for employees in [5u32, 50, 500] {
        let (shifts, pools, names) = create_week(employees);
        group.throughput(Throughput::Elements(shifts.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(employees), &employees, |b, _| {
            b.iter(|| {
                black_box(calculate_weekly_payout(
                    Week::starting(week_start()),
                    black_box(&shifts),
                    black_box(&pools),
                    &names,
                    PayoutRounding::HalfEven,
                ))
            })
        });
    }

    group.finish();
}

/// Benchmark: GET /api/tips/payout over a populated in-memory state.
fn bench_payout_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (shifts, pools, names) = create_week(20);

    let state = AppState::in_memory(
        names.iter().map(|(id, name)| Employee::new(*id, name.clone())),
        Arc::new(FixedClock(week_start())),
        PayoutRounding::HalfEven,
    );
    rt.block_on(async {
        for shift in &shifts {
            state
                .roster()
                .create_shift(NewShift {
                    employee_id: shift.employee_id,
                    date: shift.date,
                    start_time: shift.start_time,
                    end_time: shift.end_time,
                })
                .await
                .expect("seed shift");
        }
        state.tips().save_daily_tips(pools).await;
    });
    let router = create_router(state);
    let uri = format!("/api/tips/payout?weekStart={}", week_start());

    c.bench_function("payout_endpoint_20_employees", |b| {
        b.to_async(&rt).iter(|| async {
            let response = router
                .clone()
                .oneshot(Request::builder().uri(uri.as_str()).body(Body::empty()).unwrap())
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(benches, bench_allocation, bench_payout_endpoint);
criterion_main!(benches);
