//! Sessions derived from punches, and the live punch state of an employee.

use crate::core::calculator::reducer::{PunchFold, chronological};
use crate::models::entry_type::EntryType;
use crate::models::time_entry::TimeEntry;
use crate::models::time_type::TimeType;
use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;

/// A work interval from a clock-in to its clock-out, breaks excluded.
/// Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub started_at: NaiveDateTime,
    pub ended_at: Option<NaiveDateTime>,
    pub worked: TimeDelta,
    pub breaks: TimeDelta,
    pub time_type: Option<TimeType>,
    pub work_center: Option<String>,
    /// No clock-out yet.
    pub dangling: bool,
}

impl Session {
    fn open(at: NaiveDateTime, entry: Option<&TimeEntry>) -> Self {
        Self {
            started_at: at,
            ended_at: None,
            worked: TimeDelta::zero(),
            breaks: TimeDelta::zero(),
            time_type: entry.and_then(|e| e.time_type),
            work_center: entry.and_then(|e| e.work_center.clone()),
            dangling: false,
        }
    }
}

/// Split punches into sessions, crediting exactly what
/// `compute_worked_duration` credits: the sessions' `worked` add up to its
/// total for the same input and `as_of`.
///
/// A repeated clock-in moves the open session's start (latest wins). A
/// break_end outside any session resumes accrual, so it opens an implicit
/// session without time type or work center.
pub fn derive_sessions(entries: &[TimeEntry], as_of: NaiveDateTime) -> Vec<Session> {
    let mut fold = PunchFold::default();
    let mut sessions = Vec::new();
    let mut current: Option<Session> = None;

    for entry in chronological(entries) {
        let at = entry.timestamp;
        let credit = fold.step(entry.entry_type, at);

        match entry.entry_type {
            EntryType::ClockIn => match current.as_mut() {
                Some(open) => {
                    open.started_at = at;
                    open.time_type = entry.time_type;
                    open.work_center = entry.work_center.clone();
                }
                None => current = Some(Session::open(at, Some(entry))),
            },
            EntryType::BreakEnd => {
                if current.is_none() {
                    current = Some(Session::open(at, None));
                }
            }
            EntryType::BreakStart | EntryType::ClockOut => {}
        }

        if let Some(open) = current.as_mut() {
            open.worked += credit.worked;
            open.breaks += credit.breaks;
        }

        if entry.entry_type == EntryType::ClockOut
            && let Some(mut closed) = current.take()
        {
            closed.ended_at = Some(at);
            sessions.push(closed);
        }
    }

    let tail = fold.settle(as_of);
    if let Some(mut open) = current.take() {
        open.worked += tail;
        open.dangling = true;
        sessions.push(open);
    }

    sessions
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PunchState {
    /// No open session: next valid punch is a clock-in.
    Idle,
    Working,
    Paused,
}

impl PunchState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PunchState::Idle => "idle",
            PunchState::Working => "working",
            PunchState::Paused => "paused",
        }
    }

    /// Whether a self-service punch of `kind` is allowed from this state.
    pub fn allows(&self, kind: EntryType) -> bool {
        matches!(
            (self, kind),
            (PunchState::Idle, EntryType::ClockIn)
                | (PunchState::Working, EntryType::BreakStart)
                | (PunchState::Working, EntryType::ClockOut)
                | (PunchState::Paused, EntryType::BreakEnd)
        )
    }
}

/// Where an employee currently stands, with the open session's context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveStatus {
    pub state: PunchState,
    pub since: Option<NaiveDateTime>,
    pub time_type: Option<TimeType>,
    pub work_center: Option<String>,
}

/// Derive the live state from the most recent active punch.
pub fn punch_state(entries: &[TimeEntry]) -> LiveStatus {
    let sorted = chronological(entries);

    let Some(last) = sorted.last() else {
        return LiveStatus {
            state: PunchState::Idle,
            since: None,
            time_type: None,
            work_center: None,
        };
    };

    let state = match last.entry_type {
        EntryType::ClockIn | EntryType::BreakEnd => PunchState::Working,
        EntryType::BreakStart => PunchState::Paused,
        EntryType::ClockOut => PunchState::Idle,
    };

    if state == PunchState::Idle {
        return LiveStatus {
            state,
            since: Some(last.timestamp),
            time_type: None,
            work_center: None,
        };
    }

    // context comes from the clock-in that opened the current session
    let opening = sorted
        .iter()
        .rev()
        .take_while(|e| e.entry_type != EntryType::ClockOut)
        .find(|e| e.entry_type == EntryType::ClockIn);

    LiveStatus {
        state,
        since: Some(last.timestamp),
        time_type: opening.and_then(|e| e.time_type),
        work_center: opening.and_then(|e| e.work_center.clone()),
    }
}
