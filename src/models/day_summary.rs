use crate::models::duration_result::DurationResult;
use chrono::NaiveDate;

/// One row of a per-day listing (official report, entry listing).
#[derive(Debug, Clone)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub result: DurationResult,
    pub holiday: Option<String>,
}
