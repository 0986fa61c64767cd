//! Result codes and their fixed error/warning classification.
//!
//! Every notable condition found during a daily or monthly calculation is
//! expressed as a [`ResultCode`]. The split into errors and warnings is a
//! fixed property of each code ([`ResultCode::severity`]), never a matter of
//! caller configuration, so that exhaustiveness checks catch missing cases
//! at compile time.

use serde::{Deserialize, Serialize};

/// The severity class of a [`ResultCode`].
///
/// # Example
///
/// ```
/// use timecalc_engine::models::{ResultCode, Severity};
///
/// assert_eq!(ResultCode::MissingCome.severity(), Severity::Error);
/// assert_eq!(ResultCode::LateCome.severity(), Severity::Warning);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// A data-integrity or policy violation that makes a result unreliable.
    Error,
    /// An acceptable but notable condition.
    Warning,
}

/// A condition found during calculation.
///
/// Codes are raised by the booking pairer, the tolerance engine, the break
/// deduction engine, the daily calculator and the monthly evaluator, and are
/// carried inside the calculation results. Raising a code never aborts a
/// calculation: the engine always produces a best-effort result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultCode {
    /// A work day has a go booking without a matching come booking.
    MissingCome,
    /// A work day has a come booking without a matching go booking.
    MissingGo,
    /// A booking has no partner to form a complete pair.
    UnpairedBooking,
    /// Two identical bookings share the same minute, category and direction.
    DuplicateInTime,
    /// Net work time fell below the day plan's configured minimum.
    BelowMinWorkTime,
    /// Bookings exist but no day plan matches the day.
    NoMatchingShift,
    /// An expected work day has no bookings at all.
    NoBookings,
    /// Arrival before the come tolerance window.
    EarlyCome,
    /// Arrival after the come tolerance window.
    LateCome,
    /// Departure before the go tolerance window.
    EarlyGo,
    /// Departure after the go tolerance window.
    LateGo,
    /// A pair continues across midnight from the previous day.
    CrossMidnight,
    /// Recorded or deducted break time is shorter than a rule requires.
    ShortBreak,
    /// No break was recorded although one was expected.
    NoBreak,
    /// An automatic break deduction was applied.
    AutoBreak,
    /// The monthly flextime credit cap limited the credited overtime.
    MonthlyCapReached,
    /// An annual flextime cap limited the carried balance.
    FlextimeCapped,
    /// Monthly overtime stayed below the credit threshold and was forfeited.
    BelowThreshold,
    /// The credit type resets the flextime balance every month.
    NoCarryover,
}

impl ResultCode {
    /// Returns the fixed severity classification of this code.
    ///
    /// The classification is part of the engine's contract and cannot be
    /// configured by callers.
    pub fn severity(self) -> Severity {
        match self {
            ResultCode::MissingCome
            | ResultCode::MissingGo
            | ResultCode::UnpairedBooking
            | ResultCode::DuplicateInTime
            | ResultCode::BelowMinWorkTime
            | ResultCode::NoMatchingShift
            | ResultCode::NoBookings => Severity::Error,
            ResultCode::EarlyCome
            | ResultCode::LateCome
            | ResultCode::EarlyGo
            | ResultCode::LateGo
            | ResultCode::CrossMidnight
            | ResultCode::ShortBreak
            | ResultCode::NoBreak
            | ResultCode::AutoBreak
            | ResultCode::MonthlyCapReached
            | ResultCode::FlextimeCapped
            | ResultCode::BelowThreshold
            | ResultCode::NoCarryover => Severity::Warning,
        }
    }

    /// Returns `true` if this code classifies as an error.
    pub fn is_error(self) -> bool {
        self.severity() == Severity::Error
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResultCode::MissingCome => "MISSING_COME",
            ResultCode::MissingGo => "MISSING_GO",
            ResultCode::UnpairedBooking => "UNPAIRED_BOOKING",
            ResultCode::DuplicateInTime => "DUPLICATE_IN_TIME",
            ResultCode::BelowMinWorkTime => "BELOW_MIN_WORK_TIME",
            ResultCode::NoMatchingShift => "NO_MATCHING_SHIFT",
            ResultCode::NoBookings => "NO_BOOKINGS",
            ResultCode::EarlyCome => "EARLY_COME",
            ResultCode::LateCome => "LATE_COME",
            ResultCode::EarlyGo => "EARLY_GO",
            ResultCode::LateGo => "LATE_GO",
            ResultCode::CrossMidnight => "CROSS_MIDNIGHT",
            ResultCode::ShortBreak => "SHORT_BREAK",
            ResultCode::NoBreak => "NO_BREAK",
            ResultCode::AutoBreak => "AUTO_BREAK",
            ResultCode::MonthlyCapReached => "MONTHLY_CAP_REACHED",
            ResultCode::FlextimeCapped => "FLEXTIME_CAPPED",
            ResultCode::BelowThreshold => "BELOW_THRESHOLD",
            ResultCode::NoCarryover => "NO_CARRYOVER",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_quality_codes_are_errors() {
        for code in [
            ResultCode::MissingCome,
            ResultCode::MissingGo,
            ResultCode::UnpairedBooking,
            ResultCode::DuplicateInTime,
            ResultCode::BelowMinWorkTime,
            ResultCode::NoMatchingShift,
            ResultCode::NoBookings,
        ] {
            assert_eq!(code.severity(), Severity::Error, "{} should be an error", code);
            assert!(code.is_error());
        }
    }

    #[test]
    fn test_notable_conditions_are_warnings() {
        for code in [
            ResultCode::EarlyCome,
            ResultCode::LateCome,
            ResultCode::EarlyGo,
            ResultCode::LateGo,
            ResultCode::CrossMidnight,
            ResultCode::ShortBreak,
            ResultCode::NoBreak,
            ResultCode::AutoBreak,
            ResultCode::MonthlyCapReached,
            ResultCode::FlextimeCapped,
            ResultCode::BelowThreshold,
            ResultCode::NoCarryover,
        ] {
            assert_eq!(code.severity(), Severity::Warning, "{} should be a warning", code);
            assert!(!code.is_error());
        }
    }

    #[test]
    fn test_display_matches_wire_names() {
        assert_eq!(ResultCode::MissingCome.to_string(), "MISSING_COME");
        assert_eq!(ResultCode::DuplicateInTime.to_string(), "DUPLICATE_IN_TIME");
        assert_eq!(ResultCode::FlextimeCapped.to_string(), "FLEXTIME_CAPPED");
    }

    #[test]
    fn test_code_serialization() {
        let code = ResultCode::BelowThreshold;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"below_threshold\"");

        let deserialized: ResultCode = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, code);
    }
}
