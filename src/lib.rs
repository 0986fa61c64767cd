//! Time Calculation Engine for workforce time tracking
//!
//! This crate provides the pure calculation core of a time-tracking system:
//! it turns raw clock-in/out booking events into daily and monthly
//! time-accounting results, applying booking pairing, tolerance windows,
//! rounding, break deduction, holiday/absence credit and flextime carryover
//! across months.
//!
//! The engine performs no I/O and holds no state of its own: every entry
//! point is a deterministic function over caller-supplied inputs, and
//! re-running a calculation on identical inputs yields identical results.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
