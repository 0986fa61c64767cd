//! Cascading recalculation across months.
//!
//! Recalculating a single month in the middle of a year would break the
//! flextime carryover chain: every month's opening balance is the previous
//! month's closing balance. This module re-runs the monthly evaluation over
//! an ordered month range, feeding each month the freshly computed balance
//! of its predecessor, skipping closed months (immutable snapshots) and
//! isolating failures per employee in batch runs.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{AbsenceSummary, DailyResult, MonthlyEvaluationRules, MonthlyResult};

use super::monthly::evaluate_month;

/// A calendar month coordinate.
///
/// Ordered chronologically; [`MonthRef::next`] and [`MonthRef::prev`] step
/// across year boundaries.
///
/// # Example
///
/// ```
/// use timecalc_engine::calculation::MonthRef;
///
/// let december = MonthRef::new(2024, 12);
/// assert_eq!(december.next(), MonthRef::new(2025, 1));
/// assert!(december < MonthRef::new(2025, 1));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MonthRef {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

impl MonthRef {
    /// Creates a month reference. `month` must be 1-12.
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        Self { year, month }
    }

    /// The month after this one.
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// The month before this one.
    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    /// Iterates from this month through `last`, inclusive.
    pub fn through(self, last: MonthRef) -> impl Iterator<Item = MonthRef> {
        let mut current = self;
        std::iter::from_fn(move || {
            if current > last {
                return None;
            }
            let item = current;
            current = current.next();
            Some(item)
        })
    }
}

impl std::fmt::Display for MonthRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Everything needed to evaluate one employee-month.
///
/// Assembled by the caller's [`MonthDataSource`] from its booking, absence
/// and rule sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthInput {
    /// The month's daily results, one per calculated day.
    pub daily_results: Vec<DailyResult>,
    /// The month's absence summary.
    pub absences: AbsenceSummary,
    /// The evaluation rules in force for the employee and month.
    pub rules: MonthlyEvaluationRules,
}

/// Supplies the per-month inputs of the cascade.
pub trait MonthDataSource {
    /// Returns the input data for one employee-month.
    fn month_input(&self, employee_id: &str, month: MonthRef) -> EngineResult<MonthInput>;
}

/// Stores monthly results on behalf of the engine.
///
/// The engine itself persists nothing; the cascade reads previous results
/// and hands freshly computed ones to this sink.
pub trait MonthlyResultStore {
    /// Loads the stored result for one employee-month, if any.
    fn load(&self, employee_id: &str, month: MonthRef) -> EngineResult<Option<MonthlyResult>>;

    /// Stores a freshly computed result, replacing any previous one.
    fn store(&mut self, result: &MonthlyResult) -> EngineResult<()>;
}

/// A failure recorded while cascading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeFailure {
    /// The employee whose chain failed.
    pub employee_id: String,
    /// The month the failure occurred in.
    pub month: MonthRef,
    /// A description of the failure.
    pub message: String,
}

/// The accumulated outcome of one employee's cascade.
///
/// The skip/continue policy is a first-class value here rather than control
/// flow: closed months increment `skipped`, failures increment `failed` and
/// are listed in `errors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CascadeOutcome {
    /// Freshly computed (and stored) monthly results, in month order.
    pub results: Vec<MonthlyResult>,
    /// Months recomputed and stored.
    pub processed: u32,
    /// Closed months left untouched.
    pub skipped: u32,
    /// Months that could not be recomputed.
    pub failed: u32,
    /// Failure details, in occurrence order.
    pub errors: Vec<CascadeFailure>,
}

/// The aggregated outcome of a batch recalculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BatchOutcome {
    /// Months recomputed and stored, summed over all employees.
    pub processed: u32,
    /// Closed months left untouched, summed over all employees.
    pub skipped: u32,
    /// Months that could not be recomputed, summed over all employees.
    pub failed: u32,
    /// Failure details across all employees.
    pub errors: Vec<CascadeFailure>,
}

/// Recalculates one employee's months from `start` through `through`.
///
/// The fold walks the range in order, threading the carryover forward:
///
/// - the first month seeds its carryover from the stored result of the
///   month before `start` (0 if none),
/// - a stored `closed` month is never overwritten: it is counted as
///   skipped and its **stored** balance feeds the next month,
/// - every other month is evaluated with the previous month's freshly
///   computed balance and handed to the store.
///
/// A data-source or store failure is recorded and halts the chain: without
/// the failed month's balance, later months cannot be computed correctly.
/// Results stored before the failure remain stored.
///
/// The caller decides how far the cascade runs; `through` is typically the
/// current month, and the range never extends into the future. A reversed
/// range is [`EngineError::InvalidMonthRange`].
pub fn recalculate_months<S, T>(
    employee_id: &str,
    start: MonthRef,
    through: MonthRef,
    source: &S,
    store: &mut T,
) -> EngineResult<CascadeOutcome>
where
    S: MonthDataSource,
    T: MonthlyResultStore,
{
    if start > through {
        return Err(EngineError::InvalidMonthRange {
            start: start.to_string(),
            end: through.to_string(),
        });
    }

    let mut outcome = CascadeOutcome::default();
    let mut carryover = store
        .load(employee_id, start.prev())?
        .map(|previous| previous.flextime_end)
        .unwrap_or(0);

    for month in start.through(through) {
        match store.load(employee_id, month) {
            Ok(Some(stored)) if stored.closed => {
                debug!(employee_id, %month, "skipping closed month");
                outcome.skipped += 1;
                carryover = stored.flextime_end;
                continue;
            }
            Ok(_) => {}
            Err(error) => {
                warn!(employee_id, %month, %error, "cascade halted");
                outcome.failed += 1;
                outcome.errors.push(CascadeFailure {
                    employee_id: employee_id.to_string(),
                    month,
                    message: error.to_string(),
                });
                return Ok(outcome);
            }
        }

        let computed = match source.month_input(employee_id, month) {
            Ok(input) => evaluate_month(
                employee_id,
                month.year,
                month.month,
                &input.daily_results,
                &input.absences,
                carryover,
                &input.rules,
            ),
            Err(error) => {
                warn!(employee_id, %month, %error, "cascade halted");
                outcome.failed += 1;
                outcome.errors.push(CascadeFailure {
                    employee_id: employee_id.to_string(),
                    month,
                    message: error.to_string(),
                });
                return Ok(outcome);
            }
        };

        if let Err(error) = store.store(&computed) {
            warn!(employee_id, %month, %error, "cascade halted");
            outcome.failed += 1;
            outcome.errors.push(CascadeFailure {
                employee_id: employee_id.to_string(),
                month,
                message: error.to_string(),
            });
            return Ok(outcome);
        }

        carryover = computed.flextime_end;
        outcome.processed += 1;
        outcome.results.push(computed);
    }

    Ok(outcome)
}

/// Recalculates a batch of employees sequentially.
///
/// Each employee's cascade runs independently; one employee's failure never
/// stops the batch. The aggregate counts let operators see whether a
/// requested recalculation fully applied.
pub fn recalculate_batch<S, T>(
    employee_ids: &[String],
    start: MonthRef,
    through: MonthRef,
    source: &S,
    store: &mut T,
) -> EngineResult<BatchOutcome>
where
    S: MonthDataSource,
    T: MonthlyResultStore,
{
    let mut outcome = BatchOutcome::default();

    for employee_id in employee_ids {
        let employee_outcome = recalculate_months(employee_id, start, through, source, store)?;
        outcome.processed += employee_outcome.processed;
        outcome.skipped += employee_outcome.skipped;
        outcome.failed += employee_outcome.failed;
        outcome.errors.extend(employee_outcome.errors);
    }

    debug!(
        employees = employee_ids.len(),
        processed = outcome.processed,
        skipped = outcome.skipped,
        failed = outcome.failed,
        "batch recalculation finished"
    );
    Ok(outcome)
}
