//! Punch ledger reducer.
//!
//! Folds one employee's punches into worked time with two pieces of state:
//! the instant accrual (re)started and the instant the current break began.
//! Malformed sequences never fail: a punch without its counterpart credits
//! nothing for the missing interval.

use crate::models::duration_result::DurationResult;
use crate::models::entry_type::EntryType;
use crate::models::time_entry::TimeEntry;
use chrono::{NaiveDateTime, TimeDelta};

/// Running state of the fold. Shared with the session builder so both
/// credit exactly the same intervals.
#[derive(Debug, Default, Clone)]
pub(crate) struct PunchFold {
    accruing_since: Option<NaiveDateTime>,
    break_since: Option<NaiveDateTime>,
    pub(crate) worked: TimeDelta,
    pub(crate) breaks: TimeDelta,
    pub(crate) first_clock_in: Option<NaiveDateTime>,
    pub(crate) last_clock_out: Option<NaiveDateTime>,
}

/// What a single step credited.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Credit {
    pub(crate) worked: TimeDelta,
    pub(crate) breaks: TimeDelta,
}

impl PunchFold {
    pub(crate) fn step(&mut self, kind: EntryType, at: NaiveDateTime) -> Credit {
        let mut credit = Credit::default();

        match kind {
            EntryType::ClockIn => {
                // latest clock-in wins
                self.accruing_since = Some(at);
                if self.first_clock_in.is_none() {
                    self.first_clock_in = Some(at);
                }
            }
            EntryType::BreakStart => {
                if let Some(since) = self.accruing_since.take() {
                    credit.worked = at - since;
                }
                self.break_since = Some(at);
            }
            EntryType::BreakEnd => {
                // resumes accrual even when no break was open
                if let Some(since) = self.break_since.take() {
                    credit.breaks = at - since;
                }
                self.accruing_since = Some(at);
            }
            EntryType::ClockOut => {
                if let Some(since) = self.accruing_since.take() {
                    credit.worked = at - since;
                }
                self.last_clock_out = Some(at);
            }
        }

        self.worked += credit.worked;
        self.breaks += credit.breaks;
        credit
    }

    /// Credit a still-open session up to `as_of`, unless a break is open.
    pub(crate) fn settle(&mut self, as_of: NaiveDateTime) -> TimeDelta {
        let tail = match (self.accruing_since, self.break_since) {
            (Some(since), None) if as_of > since => as_of - since,
            _ => TimeDelta::zero(),
        };
        self.worked += tail;
        tail
    }

    pub(crate) fn into_result(self) -> DurationResult {
        DurationResult {
            worked: self.worked,
            breaks: self.breaks,
            first_clock_in: self.first_clock_in,
            last_clock_out: self.last_clock_out,
            open_session: self.accruing_since.is_some() && self.break_since.is_none(),
            on_break: self.break_since.is_some(),
        }
    }
}

/// Active entries sorted by timestamp. The sort is stable, so punches with
/// the same instant keep their input order.
pub fn chronological(entries: &[TimeEntry]) -> Vec<&TimeEntry> {
    let mut sorted: Vec<&TimeEntry> = entries.iter().filter(|e| e.is_active).collect();
    sorted.sort_by_key(|e| e.timestamp);
    sorted
}

/// Worked duration of one employee's punches, as of `as_of`.
///
/// The caller picks the employee and the window; every entry given is
/// folded. Inactive entries are skipped, input order does not matter.
pub fn compute_worked_duration(entries: &[TimeEntry], as_of: NaiveDateTime) -> DurationResult {
    let mut fold = PunchFold::default();

    for entry in chronological(entries) {
        fold.step(entry.entry_type, entry.timestamp);
    }

    fold.settle(as_of);
    fold.into_result()
}
