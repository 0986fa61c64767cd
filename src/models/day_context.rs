//! Day plan and day context models.
//!
//! This module contains the configuration context supplied by the caller for
//! a single employee-day: the day plan (target minutes, tolerance, rounding
//! and break rules), absence and holiday information, and the optional
//! cross-midnight continuation.
//!
//! All optional bounds are explicit [`Option`]s: a zero minute of day is a
//! valid value and must stay distinguishable from "unset".

use serde::{Deserialize, Serialize};

use super::booking::CarryIn;
use crate::error::{EngineError, EngineResult};

/// A grace window around a scheduled come or go time.
///
/// Times inside `[scheduled - early_grace, scheduled + late_grace]` are
/// clamped to `scheduled`; times outside the window stay unchanged and raise
/// an early/late warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToleranceWindow {
    /// The scheduled minute of day the window is anchored on.
    pub scheduled: i32,
    /// Minutes before `scheduled` still treated as on time.
    pub early_grace: i32,
    /// Minutes after `scheduled` still treated as on time.
    pub late_grace: i32,
}

/// The direction a rounded value snaps in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Always snap up to the next increment boundary.
    Up,
    /// Always snap down to the previous increment boundary.
    Down,
    /// Snap to the nearest boundary; ties round up.
    Nearest,
}

/// A rounding increment and policy for come/go minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingConfig {
    /// The increment in minutes (e.g. 5, 10, 15). Values `<= 1` are a no-op.
    pub increment: i32,
    /// The snapping policy.
    pub mode: RoundingMode,
}

/// The kind of a break rule, selecting its deduction policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakRuleKind {
    /// Deducted for any work time overlapping the rule's window.
    FixedWindow,
    /// Deducted only when the day has no manually booked break.
    Variable,
    /// Deducted once gross presence exceeds the rule's threshold.
    MinimumThreshold,
}

/// A single break deduction rule from the day plan.
///
/// Structural invariants are checked by [`BreakRule::validate`]:
/// fixed-window rules need both window bounds, minimum-threshold rules need
/// a threshold, and every rule needs a positive duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakRule {
    /// A short name for diagnostics (e.g. "lunch", "minimum_break").
    pub name: String,
    /// The deduction policy of this rule.
    pub kind: BreakRuleKind,
    /// Window start, minute of day, inclusive. Fixed-window rules only.
    pub window_start: Option<i32>,
    /// Window end, minute of day, exclusive. Fixed-window rules only.
    pub window_end: Option<i32>,
    /// The break duration in minutes the rule deducts or requires.
    pub duration_minutes: i32,
    /// Gross presence in minutes that triggers the rule.
    /// Minimum-threshold rules only.
    pub threshold_minutes: Option<i32>,
    /// Paid breaks are credited and never deducted.
    #[serde(default)]
    pub paid: bool,
    /// When `false`, the rule only checks and warns instead of deducting.
    #[serde(default = "default_auto_deduct")]
    pub auto_deduct: bool,
}

fn default_auto_deduct() -> bool {
    true
}

impl BreakRule {
    /// Checks the rule against its structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBreakRule`] naming the violated
    /// invariant.
    pub fn validate(&self) -> EngineResult<()> {
        let fail = |message: String| {
            Err(EngineError::InvalidBreakRule {
                name: self.name.clone(),
                message,
            })
        };

        if self.duration_minutes <= 0 {
            return fail(format!(
                "duration must be positive, got {}",
                self.duration_minutes
            ));
        }

        match self.kind {
            BreakRuleKind::FixedWindow => match (self.window_start, self.window_end) {
                (Some(start), Some(end)) if start < end => Ok(()),
                (Some(start), Some(end)) => {
                    fail(format!("window start {} must precede end {}", start, end))
                }
                _ => fail("fixed-window rule requires both window bounds".to_string()),
            },
            BreakRuleKind::MinimumThreshold => {
                if self.threshold_minutes.is_none() {
                    fail("minimum-threshold rule requires a threshold".to_string())
                } else {
                    Ok(())
                }
            }
            BreakRuleKind::Variable => Ok(()),
        }
    }
}

/// How a missing-bookings work day is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NoBookingPolicy {
    /// Raise `NO_BOOKINGS` as an error.
    #[default]
    Error,
    /// Raise `NO_BOOKINGS` as a warning.
    Warning,
    /// Do not raise `NO_BOOKINGS`.
    Ignore,
}

/// Per-day schedule configuration.
///
/// Supplies the target minutes and every adjustment setting the calculators
/// need. An off-day is a plan with `target_minutes == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Target work minutes for the day.
    pub target_minutes: i32,
    /// Grace window for come bookings.
    pub come_tolerance: Option<ToleranceWindow>,
    /// Grace window for go bookings.
    pub go_tolerance: Option<ToleranceWindow>,
    /// Rounding applied to come minutes after tolerance.
    pub come_rounding: Option<RoundingConfig>,
    /// Rounding applied to go minutes after tolerance.
    pub go_rounding: Option<RoundingConfig>,
    /// Break deduction rules, applied in order.
    #[serde(default)]
    pub break_rules: Vec<BreakRule>,
    /// Net time below this raises `BELOW_MIN_WORK_TIME`.
    pub min_work_minutes: Option<i32>,
    /// Net time is capped at this value.
    pub max_net_minutes: Option<i32>,
    /// Classification of a bookingless work day.
    #[serde(default)]
    pub no_booking_policy: NoBookingPolicy,
}

impl DayPlan {
    /// Returns `true` if the plan expects work on this day.
    pub fn is_work_day(&self) -> bool {
        self.target_minutes > 0
    }

    /// Validates every break rule of the plan.
    ///
    /// # Errors
    ///
    /// Returns the first [`EngineError::InvalidBreakRule`] found.
    pub fn validate(&self) -> EngineResult<()> {
        for rule in &self.break_rules {
            rule.validate()?;
        }
        Ok(())
    }
}

/// The kind of an approved absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceKind {
    /// Paid vacation.
    Vacation,
    /// Sickness with continued pay.
    Sickness,
    /// Special leave (weddings, funerals, ...).
    SpecialLeave,
    /// Training or further education.
    Training,
    /// Any other approved absence.
    Other,
}

/// An approved absence on a day.
///
/// A credited absence short-circuits the day: the target is credited in full
/// without running the pairer. A non-credited absence only adjusts the
/// target (half-day leave) and the day calculates normally from bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceDay {
    /// The kind of absence.
    pub kind: AbsenceKind,
    /// Replaces the day plan target when present.
    pub alternate_target: Option<i32>,
    /// Whether the target is credited as net time.
    pub credited: bool,
}

/// The credit granted by a holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayCategory {
    /// The full day target is credited.
    Full,
    /// Half the day target is credited.
    Half,
}

/// A public holiday falling on a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCredit {
    /// The holiday's name (e.g. "Neujahr").
    pub name: String,
    /// How much of the target is credited.
    pub category: HolidayCategory,
}

/// Everything the daily calculator needs to know about one employee-day
/// besides the bookings themselves.
///
/// Supplied by the caller from its day-plan, absence and holiday sources;
/// read-only to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DayContext {
    /// The matching day plan, if any.
    pub day_plan: Option<DayPlan>,
    /// An approved absence on this day.
    pub absence: Option<AbsenceDay>,
    /// A holiday falling on this day.
    pub holiday: Option<HolidayCredit>,
    /// Employee-level target override, taking precedence over everything.
    pub target_override: Option<i32>,
    /// A pair left open at midnight on the previous day.
    pub carry_in: Option<CarryIn>,
}
