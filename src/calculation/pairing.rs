//! Booking pairing logic.
//!
//! This module groups a day's raw in/out events into ordered (come, go)
//! pairs per category and flags everything that cannot be paired. The
//! pairer is stateless and single-day; a pair continuing across midnight is
//! handled through an explicit [`CarryIn`] supplied by the caller.

use serde::{Deserialize, Serialize};

use crate::models::{
    BookingCategory, BookingDirection, BookingEvent, BookingPair, CarryIn, ResultCode,
};

/// The outcome of pairing one employee-day's bookings.
///
/// `pairs` holds the complete pairs in chronological order; `unpaired`
/// holds every event that found no partner. Codes are deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingResult {
    /// Complete (come, go) pairs, ordered by come minute.
    pub pairs: Vec<BookingPair>,
    /// Events without a partner.
    pub unpaired: Vec<BookingEvent>,
    /// Codes raised while pairing.
    pub codes: Vec<ResultCode>,
}

impl PairingResult {
    fn push_code(&mut self, code: ResultCode) {
        if !self.codes.contains(&code) {
            self.codes.push(code);
        }
    }
}

/// Pairs a day's booking events.
///
/// The events are sorted by minute of day (stable for equal minutes), exact
/// duplicates (same minute, category and direction) are dropped keeping the
/// first occurrence and raising [`ResultCode::DuplicateInTime`], and the
/// remaining events are walked per category, alternating between seeking a
/// come and seeking a go:
///
/// - a second consecutive come closes the previous come as unpaired and
///   starts a new pair,
/// - a go without an open come is unpaired,
/// - a come still open at the end of the day is unpaired.
///
/// Every unpaired event raises [`ResultCode::UnpairedBooking`].
///
/// A `carry_in` describes a pair opened before midnight on the previous
/// day: the first go of its category closes it into a pair flagged
/// `cross_midnight` (raising the [`ResultCode::CrossMidnight`] warning); if
/// no such go exists the carry-in surfaces as an incomplete cross-midnight
/// pair and counts as unpaired.
///
/// # Example
///
/// ```
/// use timecalc_engine::calculation::pair_bookings;
/// use timecalc_engine::models::{BookingCategory, BookingDirection, BookingEvent, BookingSource};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let event = |minute, direction| BookingEvent {
///     employee_id: "emp_001".to_string(),
///     date,
///     minute,
///     direction,
///     category: BookingCategory::Work,
///     source: BookingSource::Terminal,
/// };
///
/// let result = pair_bookings(
///     &[event(1020, BookingDirection::Out), event(480, BookingDirection::In)],
///     None,
/// );
/// assert_eq!(result.pairs.len(), 1);
/// assert_eq!(result.pairs[0].duration_minutes(), 540);
/// assert!(result.unpaired.is_empty());
/// ```
pub fn pair_bookings(events: &[BookingEvent], carry_in: Option<&CarryIn>) -> PairingResult {
    let mut result = PairingResult {
        pairs: Vec::new(),
        unpaired: Vec::new(),
        codes: Vec::new(),
    };

    let mut sorted: Vec<BookingEvent> = events.to_vec();
    sorted.sort_by_key(|e| e.minute);

    // Drop exact duplicates, keeping the first occurrence.
    let mut deduped: Vec<BookingEvent> = Vec::with_capacity(sorted.len());
    for event in sorted {
        let duplicate = deduped.iter().any(|seen| {
            seen.minute == event.minute
                && seen.category == event.category
                && seen.direction == event.direction
        });
        if duplicate {
            result.push_code(ResultCode::DuplicateInTime);
        } else {
            deduped.push(event);
        }
    }

    // Close the carry-in with the first matching go, if any.
    let mut carry_consumed: Option<usize> = None;
    if let Some(carry) = carry_in {
        let closing_go = deduped.iter().position(|e| {
            e.category == carry.category && e.direction == BookingDirection::Out
        });
        let go = closing_go.map(|idx| deduped[idx].clone());
        carry_consumed = closing_go;

        let complete = go.is_some();
        result.pairs.push(BookingPair {
            category: carry.category,
            come: None,
            go_minute: go.as_ref().map(|e| e.minute),
            go,
            come_minute: Some(carry.minute),
            cross_midnight: true,
        });
        result.push_code(ResultCode::CrossMidnight);
        if !complete {
            result.push_code(ResultCode::UnpairedBooking);
        }
    }

    let mut open: [Option<BookingEvent>; 3] = [None, None, None];
    let slot = |category: BookingCategory| match category {
        BookingCategory::Work => 0,
        BookingCategory::Break => 1,
        BookingCategory::Trip => 2,
    };

    for (idx, event) in deduped.into_iter().enumerate() {
        if carry_consumed == Some(idx) {
            continue;
        }
        let i = slot(event.category);
        match event.direction {
            BookingDirection::In => {
                if let Some(previous) = open[i].take() {
                    result.unpaired.push(previous);
                    result.push_code(ResultCode::UnpairedBooking);
                }
                open[i] = Some(event);
            }
            BookingDirection::Out => match open[i].take() {
                Some(come) => {
                    result.pairs.push(BookingPair {
                        category: come.category,
                        come_minute: Some(come.minute),
                        go_minute: Some(event.minute),
                        come: Some(come),
                        go: Some(event),
                        cross_midnight: false,
                    });
                }
                None => {
                    result.unpaired.push(event);
                    result.push_code(ResultCode::UnpairedBooking);
                }
            },
        }
    }

    for come in open.into_iter().flatten() {
        result.unpaired.push(come);
        result.push_code(ResultCode::UnpairedBooking);
    }

    // Within today's timeline a cross-midnight pair starts at midnight.
    result.pairs.sort_by_key(|p| {
        if p.cross_midnight {
            0
        } else {
            p.come_minute.or(p.go_minute).unwrap_or(0)
        }
    });
    result.unpaired.sort_by_key(|e| e.minute);

    result
}
