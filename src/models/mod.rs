//! Core data models for the Time Calculation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod booking;
mod codes;
mod daily_result;
mod day_context;
mod monthly;

pub use booking::{
    BookingCategory, BookingDirection, BookingEvent, BookingPair, BookingSource, CarryIn,
    MINUTES_PER_DAY,
};
pub use codes::{ResultCode, Severity};
pub use daily_result::DailyResult;
pub use day_context::{
    AbsenceDay, AbsenceKind, BreakRule, BreakRuleKind, DayContext, DayPlan, HolidayCategory,
    HolidayCredit, NoBookingPolicy, RoundingConfig, RoundingMode, ToleranceWindow,
};
pub use monthly::{AbsenceSummary, CreditType, MonthlyEvaluationRules, MonthlyResult};
