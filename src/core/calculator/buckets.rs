//! Grouping of punches into buckets (day, month, range) and per-bucket
//! aggregation through the reducer.

use crate::core::calculator::reducer::{chronological, compute_worked_duration};
use crate::models::duration_result::DurationResult;
use crate::models::entry_type::EntryType;
use crate::models::time_entry::TimeEntry;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Month,
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum BucketKey {
    Day(NaiveDate),
    Month { year: i32, month: u32 },
    Range,
}

impl BucketKey {
    pub fn label(&self) -> String {
        match self {
            BucketKey::Day(d) => d.format("%Y-%m-%d").to_string(),
            BucketKey::Month { year, month } => format!("{year:04}-{month:02}"),
            BucketKey::Range => "range".to_string(),
        }
    }
}

/// How a session still open at the end of a bucket is credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsOfPolicy {
    /// Credit up to this instant in every bucket.
    Fixed(NaiveDateTime),
    /// Credit up to the bucket end, or `now` if the bucket is not over yet.
    ClampToBucketEnd { now: NaiveDateTime },
    /// Credit nothing for dangling sessions.
    IgnoreDangling,
}

impl AsOfPolicy {
    pub fn resolve(&self, bucket_end: NaiveDateTime) -> NaiveDateTime {
        match self {
            AsOfPolicy::Fixed(at) => *at,
            AsOfPolicy::ClampToBucketEnd { now } => (*now).min(bucket_end),
            // any instant before the open clock-in settles to zero
            AsOfPolicy::IgnoreDangling => NaiveDateTime::MIN,
        }
    }
}

/// Config-level spelling of the report policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DanglingPolicy {
    #[default]
    Clamp,
    Ignore,
    Now,
}

impl DanglingPolicy {
    pub fn to_policy(self, now: NaiveDateTime) -> AsOfPolicy {
        match self {
            DanglingPolicy::Clamp => AsOfPolicy::ClampToBucketEnd { now },
            DanglingPolicy::Ignore => AsOfPolicy::IgnoreDangling,
            DanglingPolicy::Now => AsOfPolicy::Fixed(now),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bucket {
    pub key: BucketKey,
    /// Inclusive start.
    pub start: NaiveDateTime,
    /// Exclusive end.
    pub end: NaiveDateTime,
    pub result: DurationResult,
}

fn start_of(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

fn first_of_next_month(year: i32, month: u32) -> NaiveDate {
    if month == 12 {
        first_of_month(year + 1, 1)
    } else {
        first_of_month(year, month + 1)
    }
}

/// Month bucketing follows sessions: once a clock-in opens a session, the
/// following punches stay in that clock-in's month until the clock-out. A
/// repeated clock-in moves the session to its own month, and a break_end
/// outside any session opens one.
fn month_keys(entries: &[TimeEntry]) -> Vec<(BucketKey, TimeEntry)> {
    let mut out = Vec::new();
    let mut session_month: Option<BucketKey> = None;

    for e in chronological(entries) {
        let own = BucketKey::Month {
            year: e.timestamp.year(),
            month: e.timestamp.month(),
        };
        let key = match e.entry_type {
            // latest clock-in restarts the session in its own month
            EntryType::ClockIn => {
                session_month = Some(own);
                own
            }
            EntryType::BreakEnd => *session_month.get_or_insert(own),
            EntryType::ClockOut => session_month.take().unwrap_or(own),
            EntryType::BreakStart => session_month.unwrap_or(own),
        };

        out.push((key, e.clone()));
    }

    out
}

/// Group active entries by bucket key.
pub fn bucket_entries(
    entries: &[TimeEntry],
    granularity: Granularity,
) -> BTreeMap<BucketKey, Vec<TimeEntry>> {
    let keyed: Vec<(BucketKey, TimeEntry)> = match granularity {
        Granularity::Day => chronological(entries)
            .into_iter()
            .map(|e| (BucketKey::Day(e.date()), e.clone()))
            .collect(),
        Granularity::Month => month_keys(entries),
        Granularity::Range => chronological(entries)
            .into_iter()
            .map(|e| (BucketKey::Range, e.clone()))
            .collect(),
    };

    let mut map: BTreeMap<BucketKey, Vec<TimeEntry>> = BTreeMap::new();
    for (key, entry) in keyed {
        map.entry(key).or_default().push(entry);
    }
    map
}

fn bounds(key: BucketKey, entries: &[TimeEntry]) -> (NaiveDateTime, NaiveDateTime) {
    match key {
        BucketKey::Day(d) => (start_of(d), start_of(next_day(d))),
        BucketKey::Month { year, month } => (
            start_of(first_of_month(year, month)),
            start_of(first_of_next_month(year, month)),
        ),
        BucketKey::Range => {
            let first = entries.iter().map(|e| e.date()).min();
            let last = entries.iter().map(|e| e.date()).max();
            match (first, last) {
                (Some(f), Some(l)) => (start_of(f), start_of(next_day(l))),
                _ => (NaiveDateTime::MIN, NaiveDateTime::MAX),
            }
        }
    }
}

/// Fold every bucket with the as-of instant the policy picks for it.
pub fn aggregate(
    entries: &[TimeEntry],
    granularity: Granularity,
    policy: AsOfPolicy,
) -> Vec<Bucket> {
    bucket_entries(entries, granularity)
        .into_iter()
        .map(|(key, bucket)| {
            let (start, end) = bounds(key, &bucket);
            let result = compute_worked_duration(&bucket, policy.resolve(end));
            Bucket {
                key,
                start,
                end,
                result,
            }
        })
        .collect()
}

/// Period total as the sum of daily buckets.
pub fn sum_daily(entries: &[TimeEntry], policy: AsOfPolicy) -> DurationResult {
    aggregate(entries, Granularity::Day, policy)
        .iter()
        .map(|b| b.result)
        .sum()
}

/// One result per calendar day in `[from, to]`, empty days included.
pub fn daily_series(
    entries: &[TimeEntry],
    from: NaiveDate,
    to: NaiveDate,
    policy: AsOfPolicy,
) -> Vec<(NaiveDate, DurationResult)> {
    let mut by_day: BTreeMap<NaiveDate, DurationResult> =
        aggregate(entries, Granularity::Day, policy)
            .into_iter()
            .filter_map(|b| match b.key {
                BucketKey::Day(d) => Some((d, b.result)),
                _ => None,
            })
            .collect();

    from.iter_days()
        .take_while(|d| *d <= to)
        .map(|d| (d, by_day.remove(&d).unwrap_or_default()))
        .collect()
}

/// Twelve monthly totals for `year` (index 0 = January).
pub fn annual_by_month(
    entries: &[TimeEntry],
    year: i32,
    policy: AsOfPolicy,
) -> [DurationResult; 12] {
    let mut months = [DurationResult::default(); 12];

    for bucket in aggregate(entries, Granularity::Month, policy) {
        if let BucketKey::Month { year: y, month } = bucket.key
            && y == year
        {
            months[(month - 1) as usize] += bucket.result;
        }
    }

    months
}
