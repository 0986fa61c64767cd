//! Error types for the Time Calculation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during time calculation.
//!
//! Note that data-quality findings inside a single day's calculation
//! (missing bookings, duplicate timestamps, ...) are *not* represented here:
//! those are [`ResultCode`](crate::models::ResultCode)s carried inside the
//! calculation results, so that one bad day never aborts an aggregation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Time Calculation Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use timecalc_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Day plan code was not found in the configuration.
    #[error("Day plan not found: {code}")]
    DayPlanNotFound {
        /// The day plan code that was not found.
        code: String,
    },

    /// Monthly evaluation rules were not found in the configuration.
    #[error("Evaluation rules not found: {code}")]
    EvaluationRulesNotFound {
        /// The evaluation rules code that was not found.
        code: String,
    },

    /// A break rule violated its structural invariants.
    #[error("Invalid break rule '{name}': {message}")]
    InvalidBreakRule {
        /// The name of the invalid rule.
        name: String,
        /// A description of what made the rule invalid.
        message: String,
    },

    /// A booking event contained inconsistent data.
    #[error("Invalid booking for employee '{employee_id}' on {date}: {message}")]
    InvalidBooking {
        /// The employee the booking belongs to.
        employee_id: String,
        /// The date of the booking.
        date: NaiveDate,
        /// A description of what made the booking invalid.
        message: String,
    },

    /// A recalculation range was empty or reversed.
    #[error("Invalid month range: {start} to {end}")]
    InvalidMonthRange {
        /// The requested start month (`YYYY-MM`).
        start: String,
        /// The requested end month (`YYYY-MM`).
        end: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
