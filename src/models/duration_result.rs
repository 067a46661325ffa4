use chrono::{NaiveDateTime, TimeDelta};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Worked-time facts for one bucket (a day, a month, a range).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationResult {
    /// Time credited as work, breaks excluded. Never negative.
    pub worked: TimeDelta,
    /// Sum of closed breaks (break_start followed by break_end).
    pub breaks: TimeDelta,
    pub first_clock_in: Option<NaiveDateTime>,
    pub last_clock_out: Option<NaiveDateTime>,
    /// A clock-in was still open at the end and got credited up to `as_of`.
    pub open_session: bool,
    /// A break was still open at the end.
    pub on_break: bool,
}

impl Default for DurationResult {
    fn default() -> Self {
        Self {
            worked: TimeDelta::zero(),
            breaks: TimeDelta::zero(),
            first_clock_in: None,
            last_clock_out: None,
            open_session: false,
            on_break: false,
        }
    }
}

impl DurationResult {
    pub fn worked_minutes(&self) -> i64 {
        self.worked.num_minutes()
    }

    pub fn break_minutes(&self) -> i64 {
        self.breaks.num_minutes()
    }

    /// Worked time as fractional hours.
    pub fn worked_hours(&self) -> f64 {
        self.worked.num_seconds() as f64 / 3600.0
    }

    pub fn is_empty(&self) -> bool {
        self.worked.is_zero() && self.first_clock_in.is_none() && self.last_clock_out.is_none()
    }
}

fn earliest(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Option<NaiveDateTime> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, y) => x.or(y),
    }
}

fn latest(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Option<NaiveDateTime> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, y) => x.or(y),
    }
}

impl Add for DurationResult {
    type Output = DurationResult;

    fn add(self, rhs: DurationResult) -> DurationResult {
        DurationResult {
            worked: self.worked + rhs.worked,
            breaks: self.breaks + rhs.breaks,
            first_clock_in: earliest(self.first_clock_in, rhs.first_clock_in),
            last_clock_out: latest(self.last_clock_out, rhs.last_clock_out),
            open_session: self.open_session || rhs.open_session,
            on_break: self.on_break || rhs.on_break,
        }
    }
}

impl AddAssign for DurationResult {
    fn add_assign(&mut self, rhs: DurationResult) {
        *self = *self + rhs;
    }
}

impl Sum for DurationResult {
    fn sum<I: Iterator<Item = DurationResult>>(iter: I) -> Self {
        iter.fold(DurationResult::default(), Add::add)
    }
}

impl<'a> Sum<&'a DurationResult> for DurationResult {
    fn sum<I: Iterator<Item = &'a DurationResult>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
