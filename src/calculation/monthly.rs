//! Monthly aggregation and flextime credit evaluation.
//!
//! This module sums a month's daily results and applies the flextime credit
//! state machine: depending on the credit type, monthly overtime is carried
//! over completely, only above a threshold, not at all, or passed through
//! without evaluation. Monthly and annual caps bound the resulting balance.
//!
//! The evaluator is a pure function with no access to storage; looking up
//! the previous month's balance is the caller's responsibility.

use tracing::debug;

use crate::models::{
    AbsenceSummary, CreditType, DailyResult, MonthlyEvaluationRules, MonthlyResult, ResultCode,
};

/// Aggregates one employee-month and evaluates its flextime credit.
///
/// Totals are straight sums over the daily results; `work_days` counts days
/// with recorded presence and `error_days` counts days whose result carries
/// at least one error code. The credit state machine operates on the summed
/// overtime and undertime together with `previous_carryover`:
///
/// | Credit type | Balance at month end |
/// |---|---|
/// | `NoEvaluation` | `previous + overtime - undertime`, uncapped |
/// | `CompleteCarryover` | `previous + min(overtime, monthly_cap) - undertime`, capped |
/// | `AfterThreshold` | overtime below the threshold is forfeited, else as `CompleteCarryover` |
/// | `NoCarryover` | `0` |
///
/// A binding monthly cap raises [`ResultCode::MonthlyCapReached`]; a binding
/// annual cap raises [`ResultCode::FlextimeCapped`]; a threshold forfeiture
/// raises [`ResultCode::BelowThreshold`]; the monthly reset raises
/// [`ResultCode::NoCarryover`].
///
/// The produced [`MonthlyResult`] replaces any stored result for the month
/// in full and is created with `closed = false`.
///
/// # Example
///
/// ```
/// use timecalc_engine::calculation::evaluate_month;
/// use timecalc_engine::models::{AbsenceSummary, CreditType, MonthlyEvaluationRules};
///
/// let rules = MonthlyEvaluationRules::uncapped(CreditType::CompleteCarryover);
/// let result = evaluate_month("emp_001", 2025, 3, &[], &AbsenceSummary::default(), 120, &rules);
/// assert_eq!(result.flextime_start, 120);
/// assert_eq!(result.flextime_end, 120);
/// ```
pub fn evaluate_month(
    employee_id: &str,
    year: i32,
    month: u32,
    daily_results: &[DailyResult],
    absences: &AbsenceSummary,
    previous_carryover: i32,
    rules: &MonthlyEvaluationRules,
) -> MonthlyResult {
    debug!(employee_id, year, month, days = daily_results.len(), "evaluating month");

    let mut result = MonthlyResult {
        employee_id: employee_id.to_string(),
        year,
        month,
        gross_minutes: 0,
        net_minutes: 0,
        target_minutes: 0,
        overtime_minutes: 0,
        undertime_minutes: 0,
        break_minutes: 0,
        work_days: 0,
        error_days: 0,
        absences: *absences,
        flextime_start: previous_carryover,
        flextime_change: 0,
        flextime_end: 0,
        warnings: Vec::new(),
        closed: false,
    };

    for day in daily_results {
        result.gross_minutes += day.gross_minutes;
        result.net_minutes += day.net_minutes;
        result.target_minutes += day.target_minutes;
        result.overtime_minutes += day.overtime_minutes;
        result.undertime_minutes += day.undertime_minutes;
        result.break_minutes += day.break_minutes;
        if day.gross_minutes > 0 {
            result.work_days += 1;
        }
        if day.has_error() {
            result.error_days += 1;
        }
    }

    let overtime = result.overtime_minutes;
    let undertime = result.undertime_minutes;
    let mut warnings = Vec::new();

    let mut end = match rules.credit_type {
        CreditType::NoEvaluation => previous_carryover + overtime - undertime,
        CreditType::CompleteCarryover => {
            credit_with_caps(overtime, undertime, previous_carryover, rules, &mut warnings)
        }
        CreditType::AfterThreshold => {
            let threshold = rules.flextime_threshold.unwrap_or(0);
            if overtime < threshold {
                warnings.push(ResultCode::BelowThreshold);
                previous_carryover - undertime
            } else {
                credit_with_caps(overtime, undertime, previous_carryover, rules, &mut warnings)
            }
        }
        CreditType::NoCarryover => {
            warnings.push(ResultCode::NoCarryover);
            0
        }
    };

    // The negative floor binds every evaluated credit type; NoEvaluation is
    // exempt from caps altogether.
    if rules.credit_type != CreditType::NoEvaluation {
        if let Some(floor) = rules.lower_annual_cap {
            if end < floor {
                end = floor;
                push_unique(&mut warnings, ResultCode::FlextimeCapped);
            }
        }
    }

    result.flextime_end = end;
    result.flextime_change = end - previous_carryover;
    result.warnings = warnings;
    result
}

/// Credits overtime under the monthly cap and the upper annual cap.
fn credit_with_caps(
    overtime: i32,
    undertime: i32,
    previous_carryover: i32,
    rules: &MonthlyEvaluationRules,
    warnings: &mut Vec<ResultCode>,
) -> i32 {
    let credited = match rules.monthly_cap {
        Some(cap) if overtime > cap => {
            warnings.push(ResultCode::MonthlyCapReached);
            cap
        }
        _ => overtime,
    };

    let mut end = previous_carryover + credited - undertime;
    if let Some(cap) = rules.upper_annual_cap {
        if end > cap {
            end = cap;
            push_unique(warnings, ResultCode::FlextimeCapped);
        }
    }
    end
}

fn push_unique(warnings: &mut Vec<ResultCode>, code: ResultCode) {
    if !warnings.contains(&code) {
        warnings.push(code);
    }
}
