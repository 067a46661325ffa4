//! Time utilities: parsing punch instants, formatting durations.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDateTime, Timelike};

const TIMESTAMP_INPUTS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse a wall-clock instant in any accepted input format.
pub fn parse_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_INPUTS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| AppError::InvalidTimestamp(s.to_string()))
}

/// `--at` value, or the current local time.
pub fn parse_optional_timestamp(input: Option<&String>) -> AppResult<NaiveDateTime> {
    match input {
        Some(s) => parse_timestamp(s),
        None => Ok(now()),
    }
}

/// Local wall-clock time, whole seconds (the storage precision).
pub fn now() -> NaiveDateTime {
    let n = Local::now().naive_local();
    n.with_nanosecond(0).unwrap_or(n)
}

/// `H:MM`, the way durations appear in tables.
pub fn format_minutes(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{}:{:02}", sign, m / 60, m % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_and_minutes() {
        assert_eq!(format_minutes(0), "0:00");
        assert_eq!(format_minutes(510), "8:30");
        assert_eq!(format_minutes(-75), "-1:15");
    }

    #[test]
    fn accepts_several_timestamp_shapes() {
        let a = parse_timestamp("2025-03-03 08:05").expect("short");
        let b = parse_timestamp("2025-03-03T08:05:00").expect("iso");
        assert_eq!(a, b);
        assert!(parse_timestamp("03/03/2025 08:05").is_err());
    }
}
