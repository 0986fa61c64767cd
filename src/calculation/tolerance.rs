//! Tolerance and rounding transforms for paired come/go minutes.
//!
//! Both transforms are pure `minute -> minute` functions parameterized by
//! the day plan. Their composition order is fixed: tolerance first, rounding
//! second. Rounding an already-tolerance-adjusted value can shift it across
//! a tolerance boundary only once, so the order must not be swapped.

use crate::models::{BookingCategory, BookingPair, DayPlan, ResultCode, RoundingConfig, RoundingMode, ToleranceWindow};

/// Applies the come tolerance window to a minute of day.
///
/// A come inside `[scheduled - early_grace, scheduled + late_grace]` counts
/// as the scheduled start. Outside the window the minute is returned
/// unchanged together with [`ResultCode::EarlyCome`] or
/// [`ResultCode::LateCome`].
///
/// Applying the transform twice is a no-op: a clamped value lies inside its
/// own window.
///
/// # Example
///
/// ```
/// use timecalc_engine::calculation::apply_come_tolerance;
/// use timecalc_engine::models::ToleranceWindow;
///
/// let window = ToleranceWindow { scheduled: 480, early_grace: 15, late_grace: 5 };
/// assert_eq!(apply_come_tolerance(470, &window), (480, None));
/// assert_eq!(apply_come_tolerance(484, &window), (480, None));
/// ```
pub fn apply_come_tolerance(minute: i32, window: &ToleranceWindow) -> (i32, Option<ResultCode>) {
    if minute < window.scheduled - window.early_grace {
        (minute, Some(ResultCode::EarlyCome))
    } else if minute > window.scheduled + window.late_grace {
        (minute, Some(ResultCode::LateCome))
    } else {
        (window.scheduled, None)
    }
}

/// Applies the go tolerance window to a minute of day.
///
/// Symmetric to [`apply_come_tolerance`], emitting [`ResultCode::EarlyGo`]
/// or [`ResultCode::LateGo`] outside the window.
pub fn apply_go_tolerance(minute: i32, window: &ToleranceWindow) -> (i32, Option<ResultCode>) {
    if minute < window.scheduled - window.early_grace {
        (minute, Some(ResultCode::EarlyGo))
    } else if minute > window.scheduled + window.late_grace {
        (minute, Some(ResultCode::LateGo))
    } else {
        (window.scheduled, None)
    }
}

/// Snaps a minute value to the configured rounding increment.
///
/// Values already on an increment boundary are returned unchanged under
/// every mode; increments `<= 1` are a no-op. The transform is monotonic.
///
/// # Example
///
/// ```
/// use timecalc_engine::calculation::apply_rounding;
/// use timecalc_engine::models::{RoundingConfig, RoundingMode};
///
/// let quarter_up = RoundingConfig { increment: 15, mode: RoundingMode::Up };
/// assert_eq!(apply_rounding(482, &quarter_up), 495);
/// assert_eq!(apply_rounding(480, &quarter_up), 480);
/// ```
pub fn apply_rounding(minute: i32, config: &RoundingConfig) -> i32 {
    let increment = config.increment;
    if increment <= 1 {
        return minute;
    }

    let remainder = minute.rem_euclid(increment);
    if remainder == 0 {
        return minute;
    }

    let down = minute - remainder;
    match config.mode {
        RoundingMode::Down => down,
        RoundingMode::Up => down + increment,
        RoundingMode::Nearest => {
            if remainder * 2 >= increment {
                down + increment
            } else {
                down
            }
        }
    }
}

/// Adjusts a work pair's effective come/go minutes per the day plan.
///
/// Tolerance is applied first, rounding second; the raw events inside the
/// pair stay untouched. Pairs of other categories and missing sides are
/// left alone. A cross-midnight come belongs to the previous day's schedule
/// and is not adjusted.
///
/// Returns the warnings raised by the tolerance checks.
pub fn adjust_work_pair(pair: &mut BookingPair, plan: &DayPlan) -> Vec<ResultCode> {
    let mut warnings = Vec::new();
    if pair.category != BookingCategory::Work {
        return warnings;
    }

    if !pair.cross_midnight {
        if let Some(come) = pair.come_minute {
            let mut adjusted = come;
            if let Some(window) = &plan.come_tolerance {
                let (value, warning) = apply_come_tolerance(adjusted, window);
                adjusted = value;
                if let Some(code) = warning {
                    warnings.push(code);
                }
            }
            if let Some(rounding) = &plan.come_rounding {
                adjusted = apply_rounding(adjusted, rounding);
            }
            pair.come_minute = Some(adjusted);
        }
    }

    if let Some(go) = pair.go_minute {
        let mut adjusted = go;
        if let Some(window) = &plan.go_tolerance {
            let (value, warning) = apply_go_tolerance(adjusted, window);
            adjusted = value;
            if let Some(code) = warning {
                warnings.push(code);
            }
        }
        if let Some(rounding) = &plan.go_rounding {
            adjusted = apply_rounding(adjusted, rounding);
        }
        pair.go_minute = Some(adjusted);
    }

    warnings
}
