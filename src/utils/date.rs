use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

fn invalid(p: &str) -> AppError {
    AppError::InvalidDate(p.to_string())
}

pub fn month_last_day(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

/// First and last day of a single period token:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let p = p.trim();
    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid(p))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid(p))?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid(p))?;
            Ok((d1, d2))
        }
        7 => {
            let y: i32 = p[0..4].parse().map_err(|_| invalid(p))?;
            let m: u32 = p[5..7].parse().map_err(|_| invalid(p))?;
            let last = month_last_day(y, m).ok_or_else(|| invalid(p))?;
            let d1 = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| invalid(p))?;
            let d2 = NaiveDate::from_ymd_opt(y, m, last).ok_or_else(|| invalid(p))?;
            Ok((d1, d2))
        }
        10 => {
            let d = parse_date(p).ok_or_else(|| invalid(p))?;
            Ok((d, d))
        }
        _ => Err(invalid(p)),
    }
}

/// Parse a period or a custom range into inclusive bounds.
///
/// Supports:
/// - YYYY, YYYY-MM, YYYY-MM-DD
/// - START:END where each side is any of the above (may differ)
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let (from, to) = match r.split_once(':') {
        Some((start, end)) => (period_bounds(start)?.0, period_bounds(end)?.1),
        None => period_bounds(r)?,
    };

    if from > to {
        return Err(AppError::InvalidRange(format!("{from} is after {to}")));
    }
    Ok((from, to))
}

/// `--period` value, or the current month when absent.
pub fn resolve_period(period: Option<&str>) -> AppResult<(NaiveDate, NaiveDate)> {
    match period {
        Some(p) => parse_range(p),
        None => {
            let t = today();
            parse_range(&format!("{:04}-{:02}", t.year(), t.month()))
        }
    }
}
