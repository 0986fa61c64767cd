//! Daily calculation orchestration.
//!
//! This module ties the booking pairer, the tolerance/rounding engine and
//! the break deduction engine together into the calculation of one
//! employee-day. The calculator is a total function: on any fatal condition
//! it still returns a best-effort [`DailyResult`] carrying the triggering
//! codes, so downstream aggregation always has a value to sum.

use chrono::NaiveDate;
use tracing::trace;

use crate::models::{
    BookingCategory, BookingDirection, BookingEvent, DailyResult, DayContext, HolidayCategory,
    NoBookingPolicy, ResultCode,
};

use super::breaks::calculate_break_deduction;
use super::pairing::pair_bookings;
use super::tolerance::adjust_work_pair;

/// Resolves the day's target minutes.
///
/// Priority: employee-level override, then the absence day's alternate
/// target, then the day plan default. Without a day plan the target is 0.
fn resolve_target(context: &DayContext) -> i32 {
    context
        .target_override
        .or_else(|| context.absence.as_ref().and_then(|a| a.alternate_target))
        .or_else(|| context.day_plan.as_ref().map(|p| p.target_minutes))
        .unwrap_or(0)
}

/// Splits raised codes into the result's error and warning lists.
///
/// The fixed classification table decides; only `NO_BOOKINGS` is routed by
/// the day plan's no-booking policy (and possibly dropped).
fn partition_codes(
    codes: Vec<ResultCode>,
    no_booking_policy: NoBookingPolicy,
    result: &mut DailyResult,
) {
    fn push(list: &mut Vec<ResultCode>, code: ResultCode) {
        if !list.contains(&code) {
            list.push(code);
        }
    }
    for code in codes {
        if code == ResultCode::NoBookings {
            match no_booking_policy {
                NoBookingPolicy::Error => push(&mut result.errors, code),
                NoBookingPolicy::Warning => push(&mut result.warnings, code),
                NoBookingPolicy::Ignore => {}
            }
            continue;
        }
        if code.is_error() {
            push(&mut result.errors, code);
        } else {
            push(&mut result.warnings, code);
        }
    }
}

/// Calculates one employee-day.
///
/// Orchestration: resolve the target, short-circuit holidays and credited
/// absences, pair the bookings, adjust work pairs by tolerance and
/// rounding, sum gross time, deduct breaks, then derive net, overtime and
/// undertime. See [`calculate_break_deduction`] for the deduction
/// semantics.
///
/// Recalculation is idempotent: identical inputs produce an identical
/// result, which replaces any previously stored result in full.
///
/// # Example
///
/// ```
/// use timecalc_engine::calculation::calculate_day;
/// use timecalc_engine::models::{
///     BookingCategory, BookingDirection, BookingEvent, BookingSource, DayContext, DayPlan,
///     NoBookingPolicy,
/// };
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let event = |minute, direction| BookingEvent {
///     employee_id: "emp_001".to_string(),
///     date,
///     minute,
///     direction,
///     category: BookingCategory::Work,
///     source: BookingSource::Terminal,
/// };
/// let context = DayContext {
///     day_plan: Some(DayPlan {
///         target_minutes: 480,
///         come_tolerance: None,
///         go_tolerance: None,
///         come_rounding: None,
///         go_rounding: None,
///         break_rules: vec![],
///         min_work_minutes: None,
///         max_net_minutes: None,
///         no_booking_policy: NoBookingPolicy::Error,
///     }),
///     ..DayContext::default()
/// };
///
/// let result = calculate_day(
///     "emp_001",
///     date,
///     &[
///         event(480, BookingDirection::In),
///         event(1020, BookingDirection::Out),
///     ],
///     &context,
/// );
/// assert_eq!(result.net_minutes, 540);
/// assert_eq!(result.overtime_minutes, 60);
/// ```
pub fn calculate_day(
    employee_id: &str,
    date: NaiveDate,
    events: &[BookingEvent],
    context: &DayContext,
) -> DailyResult {
    trace!(employee_id, %date, bookings = events.len(), "calculating day");

    let target = resolve_target(context);
    let mut result = DailyResult::empty(employee_id, date);
    result.booking_count = events.len() as u32;

    // Holidays credit the target without running the pairer.
    if let Some(holiday) = &context.holiday {
        let credit = match holiday.category {
            HolidayCategory::Full => target,
            HolidayCategory::Half => (target + 1) / 2,
        };
        result.target_minutes = credit;
        result.net_minutes = credit;
        return result;
    }

    // Approved full-day absences credit the (possibly alternate) target.
    if let Some(absence) = &context.absence {
        if absence.credited {
            result.target_minutes = target;
            result.net_minutes = target;
            return result;
        }
    }

    let Some(plan) = &context.day_plan else {
        // No matching day plan: silent for an empty day, an error once
        // bookings exist. The best-effort calculation pairs the bookings
        // raw, with no plan-dependent adjustments.
        if events.is_empty() && context.carry_in.is_none() {
            return result;
        }
        let pairing = pair_bookings(events, context.carry_in.as_ref());
        let gross: i32 = pairing
            .pairs
            .iter()
            .filter(|p| p.category != BookingCategory::Break)
            .map(|p| p.duration_minutes())
            .sum();
        result.gross_minutes = gross;
        result.net_minutes = gross;
        result.overtime_minutes = gross;
        (result.first_come, result.last_go) = raw_come_go(events);
        let mut codes = vec![ResultCode::NoMatchingShift];
        codes.extend(pairing.codes);
        partition_codes(codes, NoBookingPolicy::Error, &mut result);
        return result;
    };

    result.target_minutes = target;

    if events.is_empty() && context.carry_in.is_none() {
        result.undertime_minutes = target;
        let codes = if plan.is_work_day() && target > 0 {
            vec![ResultCode::NoBookings]
        } else {
            Vec::new()
        };
        partition_codes(codes, plan.no_booking_policy, &mut result);
        return result;
    }

    let mut pairing = pair_bookings(events, context.carry_in.as_ref());
    let mut codes = pairing.codes.clone();

    for pair in &mut pairing.pairs {
        codes.extend(adjust_work_pair(pair, plan));
    }

    let work_pairs: Vec<_> = pairing
        .pairs
        .iter()
        .filter(|p| p.category == BookingCategory::Work)
        .cloned()
        .collect();
    let break_pairs: Vec<_> = pairing
        .pairs
        .iter()
        .filter(|p| p.category == BookingCategory::Break)
        .cloned()
        .collect();

    let gross: i32 = pairing
        .pairs
        .iter()
        .filter(|p| p.category != BookingCategory::Break)
        .map(|p| p.duration_minutes())
        .sum();

    let deduction =
        calculate_break_deduction(&work_pairs, &break_pairs, &plan.break_rules, gross);
    codes.extend(deduction.warnings.iter().copied());

    let mut net = gross - deduction.deducted_minutes;
    if let Some(cap) = plan.max_net_minutes {
        net = net.min(cap);
    }
    net = net.max(0);

    result.gross_minutes = gross;
    result.net_minutes = net;
    result.break_minutes = deduction.total_minutes();
    result.overtime_minutes = (net - target).max(0);
    result.undertime_minutes = (target - net).max(0);
    (result.first_come, result.last_go) = raw_come_go(events);

    if plan.is_work_day() {
        for event in &pairing.unpaired {
            if event.category != BookingCategory::Work {
                continue;
            }
            let code = match event.direction {
                // A stray go means the come is missing, and vice versa.
                BookingDirection::Out => ResultCode::MissingCome,
                BookingDirection::In => ResultCode::MissingGo,
            };
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        // A carry-in pair that never closed is a missing go for today.
        let unclosed_carry = pairing
            .pairs
            .iter()
            .any(|p| p.cross_midnight && !p.is_complete());
        if unclosed_carry && !codes.contains(&ResultCode::MissingGo) {
            codes.push(ResultCode::MissingGo);
        }
    }

    if let Some(min) = plan.min_work_minutes {
        if net > 0 && net < min {
            codes.push(ResultCode::BelowMinWorkTime);
        }
    }

    partition_codes(codes, plan.no_booking_policy, &mut result);
    result
}

/// The raw first work come and last work go of the day's events.
fn raw_come_go(events: &[BookingEvent]) -> (Option<i32>, Option<i32>) {
    let first_come = events
        .iter()
        .filter(|e| e.category == BookingCategory::Work && e.direction == BookingDirection::In)
        .map(|e| e.minute)
        .min();
    let last_go = events
        .iter()
        .filter(|e| e.category == BookingCategory::Work && e.direction == BookingDirection::Out)
        .map(|e| e.minute)
        .max();
    (first_come, last_go)
}
