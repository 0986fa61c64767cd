//! Break deduction logic.
//!
//! This module computes the break minutes to subtract from gross work time,
//! dispatching per break-rule kind: fixed-window overlap, variable
//! (conditional on no manual break) and minimum-threshold with proportional
//! partial deduction.
//!
//! Gross time is the sum of work-pair durations and already excludes gaps
//! from manually booked breaks, so the deduction returned here covers only
//! the *automatic* deductions. The summed manual break time is the baseline
//! the rules check against and is reported separately so callers can
//! publish the day's total break time.

use serde::{Deserialize, Serialize};

use crate::models::{BookingPair, BreakRule, BreakRuleKind, ResultCode};

/// The outcome of evaluating a day's break rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakDeduction {
    /// Automatic break minutes to subtract from gross time.
    pub deducted_minutes: i32,
    /// Summed duration of manually booked break pairs.
    pub manual_minutes: i32,
    /// Warnings raised while evaluating the rules.
    pub warnings: Vec<ResultCode>,
}

impl BreakDeduction {
    /// Total break time of the day: recorded plus deducted.
    pub fn total_minutes(&self) -> i32 {
        self.deducted_minutes + self.manual_minutes
    }

    fn warn(&mut self, code: ResultCode) {
        if !self.warnings.contains(&code) {
            self.warnings.push(code);
        }
    }
}

/// The interval a work pair occupies within the current day.
///
/// A cross-midnight pair's come belongs to the previous day, so its portion
/// of today starts at midnight.
fn day_interval(pair: &BookingPair) -> Option<(i32, i32)> {
    let go = pair.go_minute?;
    if pair.cross_midnight {
        Some((0, go))
    } else {
        Some((pair.come_minute?, go))
    }
}

/// Overlap in minutes between all work pairs and a `[start, end)` window.
fn window_overlap(work_pairs: &[BookingPair], start: i32, end: i32) -> i32 {
    work_pairs
        .iter()
        .filter_map(day_interval)
        .map(|(from, to)| (to.min(end) - from.max(start)).max(0))
        .sum()
}

/// Evaluates the day plan's break rules against the day's pairs.
///
/// Rules are applied in list order:
///
/// - **Fixed-window** rules deduct `min(duration, overlap)` where the
///   overlap is summed across all work pairs, regardless of manual break
///   bookings. No overlap means no deduction and no warning.
/// - **Variable** rules deduct their duration only when the day has zero
///   manual break pairs; any manual break skips the rule silently.
/// - **Minimum-threshold** rules trigger once gross presence exceeds their
///   threshold. The requirement is `min(duration, gross - threshold)`; a
///   proportionally reduced partial requirement raises
///   [`ResultCode::ShortBreak`]. When manual breaks exist the rule never
///   deducts; it only raises [`ResultCode::ShortBreak`] if the break time
///   recorded and deducted so far does not cover the requirement. Without
///   manual breaks the automatic deduction is topped up to the requirement.
///
/// Paid rules credit their break and never deduct. Rules with
/// `auto_deduct = false` raise [`ResultCode::ShortBreak`] instead of
/// deducting when their requirement is uncovered. Any positive automatic
/// deduction raises [`ResultCode::AutoBreak`] once; a day where applicable
/// rules went entirely without recorded or deducted break time raises
/// [`ResultCode::NoBreak`].
///
/// # Example
///
/// ```
/// use timecalc_engine::calculation::calculate_break_deduction;
/// use timecalc_engine::models::{BookingCategory, BookingPair, BreakRule, BreakRuleKind};
///
/// let lunch = BreakRule {
///     name: "lunch".to_string(),
///     kind: BreakRuleKind::FixedWindow,
///     window_start: Some(720),
///     window_end: Some(750),
///     duration_minutes: 30,
///     threshold_minutes: None,
///     paid: false,
///     auto_deduct: true,
/// };
/// let work = vec![BookingPair::from_minutes(BookingCategory::Work, 480, 1020)];
///
/// let deduction = calculate_break_deduction(&work, &[], &[lunch], 540);
/// assert_eq!(deduction.deducted_minutes, 30);
/// ```
pub fn calculate_break_deduction(
    work_pairs: &[BookingPair],
    break_pairs: &[BookingPair],
    rules: &[BreakRule],
    gross_minutes: i32,
) -> BreakDeduction {
    let manual_minutes: i32 = break_pairs
        .iter()
        .filter(|p| p.is_complete())
        .map(BookingPair::duration_minutes)
        .sum();
    let has_manual_break = !break_pairs.is_empty();

    let mut deduction = BreakDeduction {
        deducted_minutes: 0,
        manual_minutes,
        warnings: Vec::new(),
    };
    let mut any_required = false;

    for rule in rules {
        match rule.kind {
            BreakRuleKind::FixedWindow => {
                let (Some(start), Some(end)) = (rule.window_start, rule.window_end) else {
                    continue;
                };
                let overlap = window_overlap(work_pairs, start, end);
                let required = rule.duration_minutes.min(overlap);
                if required <= 0 || rule.paid {
                    continue;
                }
                any_required = true;
                if rule.auto_deduct {
                    deduction.deducted_minutes += required;
                } else if manual_minutes < required {
                    deduction.warn(ResultCode::ShortBreak);
                }
            }
            BreakRuleKind::Variable => {
                if has_manual_break || rule.paid {
                    continue;
                }
                any_required = true;
                if rule.auto_deduct {
                    deduction.deducted_minutes += rule.duration_minutes;
                } else {
                    deduction.warn(ResultCode::ShortBreak);
                }
            }
            BreakRuleKind::MinimumThreshold => {
                let Some(threshold) = rule.threshold_minutes else {
                    continue;
                };
                if gross_minutes <= threshold || rule.paid {
                    continue;
                }
                let required = rule.duration_minutes.min(gross_minutes - threshold);
                any_required = true;

                let covered = manual_minutes + deduction.deducted_minutes;
                if covered >= required {
                    continue;
                }
                if has_manual_break || !rule.auto_deduct {
                    // Recorded breaks are never corrected upward.
                    deduction.warn(ResultCode::ShortBreak);
                } else {
                    deduction.deducted_minutes += required - covered;
                    if required < rule.duration_minutes {
                        deduction.warn(ResultCode::ShortBreak);
                    }
                }
            }
        }
    }

    if deduction.deducted_minutes > 0 {
        deduction.warn(ResultCode::AutoBreak);
    }
    if any_required && deduction.total_minutes() == 0 {
        deduction.warn(ResultCode::NoBreak);
    }

    deduction
}
