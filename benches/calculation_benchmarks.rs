//! Performance benchmarks for the Time Calculation Engine.
//!
//! This benchmark suite verifies that the calculation engine meets
//! performance targets:
//! - Single day calculation: < 10μs mean
//! - Month evaluation over 22 days: < 50μs mean
//! - 12-month cascade: < 5ms mean
//! - Batch of 100 employees over 3 months: < 100ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::NaiveDate;
use std::collections::HashMap;

use timecalc_engine::calculation::{
    calculate_day, evaluate_month, recalculate_batch, recalculate_months, MonthDataSource,
    MonthInput, MonthRef, MonthlyResultStore,
};
use timecalc_engine::error::EngineResult;
use timecalc_engine::models::{
    AbsenceSummary, BookingCategory, BookingDirection, BookingEvent, BookingSource, BreakRule,
    BreakRuleKind, CreditType, DailyResult, DayContext, DayPlan, MonthlyEvaluationRules,
    MonthlyResult, NoBookingPolicy, RoundingConfig, RoundingMode, ToleranceWindow,
};

/// Creates a full-time day plan with tolerance, rounding and break rules.
fn bench_plan() -> DayPlan {
    DayPlan {
        target_minutes: 480,
        come_tolerance: Some(ToleranceWindow {
            scheduled: 480,
            early_grace: 30,
            late_grace: 10,
        }),
        go_tolerance: None,
        come_rounding: None,
        go_rounding: Some(RoundingConfig {
            increment: 5,
            mode: RoundingMode::Down,
        }),
        break_rules: vec![
            BreakRule {
                name: "lunch".to_string(),
                kind: BreakRuleKind::FixedWindow,
                window_start: Some(720),
                window_end: Some(750),
                duration_minutes: 30,
                threshold_minutes: None,
                paid: false,
                auto_deduct: true,
            },
            BreakRule {
                name: "minimum_break".to_string(),
                kind: BreakRuleKind::MinimumThreshold,
                window_start: None,
                window_end: None,
                duration_minutes: 45,
                threshold_minutes: Some(540),
                paid: false,
                auto_deduct: true,
            },
        ],
        min_work_minutes: None,
        max_net_minutes: Some(600),
        no_booking_policy: NoBookingPolicy::Error,
    }
}

/// Creates a work day's events for a given date.
fn bench_events(date: NaiveDate) -> Vec<BookingEvent> {
    let event = |minute, direction| BookingEvent {
        employee_id: "emp_bench_001".to_string(),
        date,
        minute,
        direction,
        category: BookingCategory::Work,
        source: BookingSource::Terminal,
    };
    vec![
        event(460, BookingDirection::In),
        event(1033, BookingDirection::Out),
    ]
}

/// Creates a month of daily results through the daily calculator.
fn bench_month(days: u32) -> Vec<DailyResult> {
    let context = DayContext {
        day_plan: Some(bench_plan()),
        ..DayContext::default()
    };
    (1..=days)
        .map(|day| {
            let date = NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
            calculate_day("emp_bench_001", date, &bench_events(date), &context)
        })
        .collect()
}

struct BenchSource {
    rules: MonthlyEvaluationRules,
}

impl MonthDataSource for BenchSource {
    fn month_input(&self, employee_id: &str, month: MonthRef) -> EngineResult<MonthInput> {
        let context = DayContext {
            day_plan: Some(bench_plan()),
            ..DayContext::default()
        };
        let daily_results = (1..=22u32)
            .map(|day| {
                let date = NaiveDate::from_ymd_opt(month.year, month.month, day.min(28)).unwrap();
                calculate_day(employee_id, date, &bench_events(date), &context)
            })
            .collect();
        Ok(MonthInput {
            daily_results,
            absences: AbsenceSummary::default(),
            rules: self.rules.clone(),
        })
    }
}

#[derive(Default)]
struct BenchStore {
    results: HashMap<(String, MonthRef), MonthlyResult>,
}

impl MonthlyResultStore for BenchStore {
    fn load(&self, employee_id: &str, month: MonthRef) -> EngineResult<Option<MonthlyResult>> {
        Ok(self.results.get(&(employee_id.to_string(), month)).cloned())
    }

    fn store(&mut self, result: &MonthlyResult) -> EngineResult<()> {
        self.results.insert(
            (
                result.employee_id.clone(),
                MonthRef::new(result.year, result.month),
            ),
            result.clone(),
        );
        Ok(())
    }
}

fn bench_daily_calculation(c: &mut Criterion) {
    let context = DayContext {
        day_plan: Some(bench_plan()),
        ..DayContext::default()
    };
    let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let events = bench_events(date);

    c.bench_function("daily_calculation", |b| {
        b.iter(|| {
            calculate_day(
                black_box("emp_bench_001"),
                black_box(date),
                black_box(&events),
                black_box(&context),
            )
        })
    });
}

fn bench_month_evaluation(c: &mut Criterion) {
    let days = bench_month(22);
    let rules = MonthlyEvaluationRules::uncapped(CreditType::CompleteCarryover);

    c.bench_function("month_evaluation_22_days", |b| {
        b.iter(|| {
            evaluate_month(
                black_box("emp_bench_001"),
                2025,
                3,
                black_box(&days),
                &AbsenceSummary::default(),
                black_box(120),
                &rules,
            )
        })
    });
}

fn bench_cascade(c: &mut Criterion) {
    let source = BenchSource {
        rules: MonthlyEvaluationRules::uncapped(CreditType::CompleteCarryover),
    };

    c.bench_function("cascade_12_months", |b| {
        b.iter(|| {
            let mut store = BenchStore::default();
            recalculate_months(
                black_box("emp_bench_001"),
                MonthRef::new(2025, 1),
                MonthRef::new(2025, 12),
                &source,
                &mut store,
            )
            .unwrap()
        })
    });
}

fn bench_batch(c: &mut Criterion) {
    let source = BenchSource {
        rules: MonthlyEvaluationRules::uncapped(CreditType::CompleteCarryover),
    };

    let mut group = c.benchmark_group("batch_recalculation");
    for employee_count in [10usize, 100] {
        let employees: Vec<String> = (0..employee_count)
            .map(|i| format!("emp_{:04}", i))
            .collect();
        group.throughput(Throughput::Elements(employee_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(employee_count),
            &employees,
            |b, employees| {
                b.iter(|| {
                    let mut store = BenchStore::default();
                    recalculate_batch(
                        black_box(employees),
                        MonthRef::new(2025, 1),
                        MonthRef::new(2025, 3),
                        &source,
                        &mut store,
                    )
                    .unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_daily_calculation,
    bench_month_evaluation,
    bench_cascade,
    bench_batch
);
criterion_main!(benches);
