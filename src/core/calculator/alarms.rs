//! Overtime alarms: employees whose worked time over a window exceeds a limit.

use crate::models::duration_result::DurationResult;
use chrono::TimeDelta;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Alarm {
    pub employee_id: String,
    pub worked_minutes: i64,
    pub limit_minutes: i64,
    pub excess_minutes: i64,
}

/// Convert an hours limit (may be fractional) to a duration. Negative or
/// non-finite values count as zero.
pub fn limit_from_hours(hours: f64) -> TimeDelta {
    if !hours.is_finite() || hours <= 0.0 {
        return TimeDelta::zero();
    }
    TimeDelta::seconds((hours * 3600.0).round() as i64)
}

pub fn exceeds(result: &DurationResult, limit: TimeDelta) -> bool {
    result.worked > limit
}

/// Flag every employee whose total is strictly above `limit_hours`.
/// Input order is kept.
pub fn find_alarms<'a, I>(totals: I, limit_hours: f64) -> Vec<Alarm>
where
    I: IntoIterator<Item = (&'a str, DurationResult)>,
{
    let limit = limit_from_hours(limit_hours);

    totals
        .into_iter()
        .filter(|(_, total)| exceeds(total, limit))
        .map(|(id, total)| Alarm {
            employee_id: id.to_string(),
            worked_minutes: total.worked_minutes(),
            limit_minutes: limit.num_minutes(),
            excess_minutes: (total.worked - limit).num_minutes(),
        })
        .collect()
}
