//! Monthly evaluation rules and result models.

use serde::{Deserialize, Serialize};

use super::codes::ResultCode;

/// The policy governing how a month's overtime converts into flextime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditType {
    /// Overtime and undertime flow into the balance unchanged, uncapped.
    NoEvaluation,
    /// Overtime is credited up to the monthly cap and carried over.
    CompleteCarryover,
    /// Overtime below the threshold is forfeited; above it, carried over.
    AfterThreshold,
    /// The balance resets to zero every month.
    NoCarryover,
}

/// Per-employee (or per-tariff) flextime evaluation configuration.
///
/// Absent caps mean "unbounded"; they are explicit [`Option`]s because a
/// cap of zero is a meaningful configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyEvaluationRules {
    /// The credit policy to apply.
    pub credit_type: CreditType,
    /// Most overtime minutes credited per month.
    pub monthly_cap: Option<i32>,
    /// Overtime below this is forfeited under [`CreditType::AfterThreshold`].
    pub flextime_threshold: Option<i32>,
    /// Upper bound on the carried balance.
    pub upper_annual_cap: Option<i32>,
    /// Lower (negative) bound on the carried balance.
    pub lower_annual_cap: Option<i32>,
}

impl MonthlyEvaluationRules {
    /// Rules that carry everything over, uncapped.
    pub fn uncapped(credit_type: CreditType) -> Self {
        Self {
            credit_type,
            monthly_cap: None,
            flextime_threshold: None,
            upper_annual_cap: None,
            lower_annual_cap: None,
        }
    }
}

/// Per-kind absence day counts for one employee-month.
///
/// Supplied by the caller's absence source alongside the daily results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AbsenceSummary {
    /// Vacation days taken.
    pub vacation_days: u32,
    /// Sick days.
    pub sick_days: u32,
    /// All other approved absence days.
    pub other_days: u32,
}

impl AbsenceSummary {
    /// Total absence days of the month.
    pub fn total_days(&self) -> u32 {
        self.vacation_days + self.sick_days + self.other_days
    }
}

/// The aggregated result of one employee-month.
///
/// Created or overwritten as a whole by the monthly aggregator. A closed
/// month is an immutable snapshot: the cascading recalculation controller
/// skips it instead of overwriting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyResult {
    /// The employee the result belongs to.
    pub employee_id: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Sum of daily gross minutes.
    pub gross_minutes: i32,
    /// Sum of daily net minutes.
    pub net_minutes: i32,
    /// Sum of daily target minutes.
    pub target_minutes: i32,
    /// Sum of daily overtime minutes.
    pub overtime_minutes: i32,
    /// Sum of daily undertime minutes.
    pub undertime_minutes: i32,
    /// Sum of daily break minutes.
    pub break_minutes: i32,
    /// Days with recorded presence.
    pub work_days: u32,
    /// Days whose result carries at least one error code.
    pub error_days: u32,
    /// Absence summary for the month.
    pub absences: AbsenceSummary,
    /// Flextime balance at the start of the month.
    pub flextime_start: i32,
    /// Change of the balance over the month.
    pub flextime_change: i32,
    /// Flextime balance at the end of the month.
    pub flextime_end: i32,
    /// Warning codes raised by the credit evaluation.
    pub warnings: Vec<ResultCode>,
    /// Whether the month is closed and must not be recalculated.
    pub closed: bool,
}
