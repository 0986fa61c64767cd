//! Booking models and related types.
//!
//! This module defines the [`BookingEvent`] and [`BookingPair`] structs for
//! representing raw clock events and the in/out pairs formed from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of minutes in a day; minute-of-day values range `0..MINUTES_PER_DAY`.
pub const MINUTES_PER_DAY: i32 = 1440;

/// The direction of a booking event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingDirection {
    /// Clocking in (come).
    In,
    /// Clocking out (go).
    Out,
}

/// The category a booking event belongs to.
///
/// Work and business-trip time both count toward gross presence; break
/// bookings carve recorded breaks out of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingCategory {
    /// Regular working time.
    Work,
    /// A manually recorded break.
    Break,
    /// Time on a business trip, credited as work time.
    Trip,
}

/// The origin of a booking event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingSource {
    /// A hardware time-clock terminal.
    Terminal,
    /// Entered manually by the employee.
    Manual,
    /// Imported from an external system.
    Import,
    /// A supervisor correction of an earlier event.
    Correction,
}

/// A single immutable clock event.
///
/// # Example
///
/// ```
/// use timecalc_engine::models::{BookingCategory, BookingDirection, BookingEvent, BookingSource};
/// use chrono::NaiveDate;
///
/// let event = BookingEvent {
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     minute: 8 * 60,
///     direction: BookingDirection::In,
///     category: BookingCategory::Work,
///     source: BookingSource::Terminal,
/// };
/// assert!(event.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingEvent {
    /// The employee the event belongs to.
    pub employee_id: String,
    /// The calendar day the event was recorded on.
    pub date: NaiveDate,
    /// Minute of day, `0..=1439`.
    pub minute: i32,
    /// Whether the event clocks in or out.
    pub direction: BookingDirection,
    /// The category of time the event opens or closes.
    pub category: BookingCategory,
    /// Where the event originated.
    pub source: BookingSource,
}

impl BookingEvent {
    /// Checks the event against its structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBooking`] if the minute of day is
    /// outside `0..=1439`.
    pub fn validate(&self) -> EngineResult<()> {
        if self.minute < 0 || self.minute >= MINUTES_PER_DAY {
            return Err(EngineError::InvalidBooking {
                employee_id: self.employee_id.clone(),
                date: self.date,
                message: format!("minute of day {} out of range", self.minute),
            });
        }
        Ok(())
    }
}

/// A pair opened on the previous day and still running at midnight.
///
/// Supplied by the caller when yesterday's last booking of a category was an
/// unanswered come; the pairer closes it with today's first matching go and
/// flags the pair as crossing midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarryIn {
    /// The category of the pair left open at midnight.
    pub category: BookingCategory,
    /// Yesterday's come minute of day.
    pub minute: i32,
}

/// An ordered (come, go) pair of bookings within one category.
///
/// The raw events are kept untouched for auditing; `come_minute` and
/// `go_minute` hold the *effective* minutes, which tolerance and rounding
/// may rewrite. A pair missing either side is *unpaired* and contributes a
/// duration of 0.
///
/// # Example
///
/// ```
/// use timecalc_engine::models::{BookingCategory, BookingPair};
///
/// let pair = BookingPair::from_minutes(BookingCategory::Work, 480, 1020);
/// assert_eq!(pair.duration_minutes(), 540);
/// assert!(pair.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPair {
    /// The category both events belong to.
    pub category: BookingCategory,
    /// The raw come event, if present.
    pub come: Option<BookingEvent>,
    /// The raw go event, if present.
    pub go: Option<BookingEvent>,
    /// Effective come minute after tolerance and rounding.
    pub come_minute: Option<i32>,
    /// Effective go minute after tolerance and rounding.
    pub go_minute: Option<i32>,
    /// Whether the pair started before midnight on the previous day.
    pub cross_midnight: bool,
}

impl BookingPair {
    /// Creates a complete pair directly from effective minutes.
    ///
    /// Mostly useful in tests and for callers that synthesize pairs without
    /// raw events.
    pub fn from_minutes(category: BookingCategory, come: i32, go: i32) -> Self {
        Self {
            category,
            come: None,
            go: None,
            come_minute: Some(come),
            go_minute: Some(go),
            cross_midnight: false,
        }
    }

    /// Returns `true` if both sides of the pair are present.
    pub fn is_complete(&self) -> bool {
        self.come_minute.is_some() && self.go_minute.is_some()
    }

    /// Returns the pair's duration in minutes.
    ///
    /// An unpaired booking has duration 0. For a cross-midnight pair the
    /// duration is the time from the previous day's come to midnight plus
    /// the time from midnight to the go.
    pub fn duration_minutes(&self) -> i32 {
        match (self.come_minute, self.go_minute) {
            (Some(come), Some(go)) => {
                if self.cross_midnight {
                    (MINUTES_PER_DAY - come) + go
                } else {
                    (go - come).max(0)
                }
            }
            _ => 0,
        }
    }
}
