//! Daily calculation result model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::codes::ResultCode;

/// The complete result of calculating one employee-day.
///
/// Produced as a whole by the daily calculator and replaced as a whole on
/// recalculation; it is never partially updated or merged. A result with
/// errors is still a complete best-effort calculation so that monthly
/// aggregation always has a value to sum.
///
/// # Example
///
/// ```
/// use timecalc_engine::models::DailyResult;
/// use chrono::NaiveDate;
///
/// let result = DailyResult {
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     gross_minutes: 540,
///     net_minutes: 510,
///     target_minutes: 480,
///     overtime_minutes: 30,
///     undertime_minutes: 0,
///     break_minutes: 30,
///     first_come: Some(480),
///     last_go: Some(1020),
///     booking_count: 2,
///     errors: vec![],
///     warnings: vec![],
/// };
/// assert!(!result.has_error());
/// assert_eq!(result.flex_delta(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyResult {
    /// The employee the result belongs to.
    pub employee_id: String,
    /// The calculated day.
    pub date: NaiveDate,
    /// Total presence minutes from work and trip pairs.
    pub gross_minutes: i32,
    /// Gross minutes minus deducted breaks, capped at the day plan maximum.
    pub net_minutes: i32,
    /// The resolved target minutes for the day.
    pub target_minutes: i32,
    /// Net minutes above target.
    pub overtime_minutes: i32,
    /// Target minutes not covered by net time.
    pub undertime_minutes: i32,
    /// Total break minutes of the day (recorded plus deducted).
    pub break_minutes: i32,
    /// The raw first work come, minute of day.
    pub first_come: Option<i32>,
    /// The raw last work go, minute of day.
    pub last_go: Option<i32>,
    /// Number of booking events that entered the calculation.
    pub booking_count: u32,
    /// Error codes raised for the day.
    pub errors: Vec<ResultCode>,
    /// Warning codes raised for the day.
    pub warnings: Vec<ResultCode>,
}

impl DailyResult {
    /// Creates an all-zero result for a day without any time accounting.
    pub fn empty(employee_id: &str, date: NaiveDate) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            date,
            gross_minutes: 0,
            net_minutes: 0,
            target_minutes: 0,
            overtime_minutes: 0,
            undertime_minutes: 0,
            break_minutes: 0,
            first_come: None,
            last_go: None,
            booking_count: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns `true` if any error code was raised for the day.
    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The day's contribution to the flextime balance.
    pub fn flex_delta(&self) -> i32 {
        self.overtime_minutes - self.undertime_minutes
    }
}
