//! Calculation logic for the Time Calculation Engine.
//!
//! This module contains all the calculation functions for turning raw
//! bookings into accounting results, including booking pairing, tolerance
//! and rounding adjustment, break deduction, the daily calculator, monthly
//! aggregation with flextime credit evaluation, and the cascading
//! recalculation controller that keeps the month-to-month carryover chain
//! intact.

mod breaks;
mod cascade;
mod daily;
mod monthly;
mod pairing;
mod tolerance;

pub use breaks::{BreakDeduction, calculate_break_deduction};
pub use cascade::{
    BatchOutcome, CascadeFailure, CascadeOutcome, MonthDataSource, MonthInput, MonthRef,
    MonthlyResultStore, recalculate_batch, recalculate_months,
};
pub use daily::calculate_day;
pub use monthly::evaluate_month;
pub use pairing::{PairingResult, pair_bookings};
pub use tolerance::{
    adjust_work_pair, apply_come_tolerance, apply_go_tolerance, apply_rounding,
};
