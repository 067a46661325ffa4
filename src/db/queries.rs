//! Queries over `time_entries`.

use crate::errors::{AppError, AppResult};
use crate::models::change_tag::ChangeTag;
use crate::models::entry_type::EntryType;
use crate::models::time_entry::{TIMESTAMP_FORMAT, TimeEntry};
use crate::models::time_type::TimeType;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

const ENTRY_COLUMNS: &str = "id, employee_id, entry_type, timestamp, time_type, work_center, \
                             is_active, changes, original_timestamp, created_at";

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

pub(crate) fn parse_db_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()
}

pub(crate) fn ts_to_db(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn day_start(date: &NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn map_row(row: &Row) -> Result<TimeEntry> {
    let kind_str: String = row.get("entry_type")?;
    let entry_type = EntryType::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(2, AppError::InvalidEntryType(kind_str.clone())))?;

    let ts_str: String = row.get("timestamp")?;
    let timestamp = parse_db_timestamp(&ts_str)
        .ok_or_else(|| conversion_error(3, AppError::InvalidTimestamp(ts_str.clone())))?;

    let time_type = match row.get::<_, Option<String>>("time_type")? {
        Some(s) => Some(
            TimeType::from_db_str(&s)
                .ok_or_else(|| conversion_error(4, AppError::InvalidTimeType(s.clone())))?,
        ),
        None => None,
    };

    let changes = row
        .get::<_, Option<String>>("changes")?
        .and_then(|s| ChangeTag::from_db_str(&s));

    let original_timestamp = row
        .get::<_, Option<String>>("original_timestamp")?
        .and_then(|s| parse_db_timestamp(&s));

    Ok(TimeEntry {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        entry_type,
        timestamp,
        time_type,
        work_center: row.get("work_center")?,
        is_active: row.get::<_, i32>("is_active")? == 1,
        changes,
        original_timestamp,
        created_at: row.get("created_at")?,
    })
}

/// Insert a new entry and return its id.
pub fn insert_entry(conn: &Connection, entry: &TimeEntry) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO time_entries (employee_id, entry_type, timestamp, time_type, work_center,
                                   is_active, changes, original_timestamp, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            entry.employee_id,
            entry.entry_type.to_db_str(),
            ts_to_db(&entry.timestamp),
            entry.time_type.map(|t| t.to_db_str()),
            entry.work_center,
            if entry.is_active { 1 } else { 0 },
            entry.changes.map(|c| c.to_db_str()),
            entry.original_timestamp.map(|t| ts_to_db(&t)),
            entry.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update an entry (all fields except id and employee)
pub fn update_entry(conn: &Connection, entry: &TimeEntry) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE time_entries
         SET entry_type = ?1, timestamp = ?2, time_type = ?3, work_center = ?4,
             is_active = ?5, changes = ?6, original_timestamp = ?7
         WHERE id = ?8",
        params![
            entry.entry_type.to_db_str(),
            ts_to_db(&entry.timestamp),
            entry.time_type.map(|t| t.to_db_str()),
            entry.work_center,
            if entry.is_active { 1 } else { 0 },
            entry.changes.map(|c| c.to_db_str()),
            entry.original_timestamp.map(|t| ts_to_db(&t)),
            entry.id,
        ],
    )?;

    if n == 0 {
        return Err(AppError::EntryNotFound(entry.id));
    }
    Ok(())
}

/// Soft delete: the row stays for audit, tagged `eliminated`.
pub fn soft_delete_entry(conn: &Connection, id: i64) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE time_entries SET is_active = 0, changes = 'eliminated' WHERE id = ?1",
        [id],
    )?;
    if n == 0 {
        return Err(AppError::EntryNotFound(id));
    }
    Ok(())
}

pub fn load_entry(conn: &Connection, id: i64) -> AppResult<TimeEntry> {
    let sql = format!("SELECT {ENTRY_COLUMNS} FROM time_entries WHERE id = ?1");
    conn.query_row(&sql, [id], map_row)
        .optional()?
        .ok_or(AppError::EntryNotFound(id))
}

/// Active entries of the given employees with `from <= timestamp < to`,
/// in ascending timestamp order.
pub fn load_active_entries(
    conn: &Connection,
    employee_ids: &[String],
    from: &NaiveDateTime,
    to: &NaiveDateTime,
) -> AppResult<Vec<TimeEntry>> {
    if employee_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; employee_ids.len()].join(",");
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM time_entries
         WHERE is_active = 1
           AND employee_id IN ({placeholders})
           AND timestamp >= ? AND timestamp < ?
         ORDER BY timestamp ASC, id ASC"
    );

    let mut values: Vec<String> = employee_ids.to_vec();
    values.push(ts_to_db(from));
    values.push(ts_to_db(to));

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Entries of one employee between two dates (inclusive), optionally with
/// soft-deleted rows.
pub fn load_entries_for_employee(
    conn: &Connection,
    employee_id: &str,
    from: &NaiveDate,
    to: &NaiveDate,
    include_inactive: bool,
) -> AppResult<Vec<TimeEntry>> {
    let end = to.succ_opt().unwrap_or(*to);
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM time_entries
         WHERE employee_id = ?1
           AND timestamp >= ?2 AND timestamp < ?3
           AND (?4 = 1 OR is_active = 1)
         ORDER BY timestamp ASC, id ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![
            employee_id,
            ts_to_db(&day_start(from)),
            ts_to_db(&day_start(&end)),
            if include_inactive { 1 } else { 0 },
        ],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Every active entry of an employee up to (and including) `until`.
pub fn load_history_until(
    conn: &Connection,
    employee_id: &str,
    until: &NaiveDateTime,
) -> AppResult<Vec<TimeEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM time_entries
         WHERE employee_id = ?1 AND is_active = 1 AND timestamp <= ?2
         ORDER BY timestamp ASC, id ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![employee_id, ts_to_db(until)], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Whether the employee has an active clock-in on `date`, ignoring the
/// entry `exclude_id` (the one being edited).
pub fn has_active_clock_in_on(
    conn: &Connection,
    employee_id: &str,
    date: &NaiveDate,
    exclude_id: Option<i64>,
) -> AppResult<bool> {
    let end = date.succ_opt().unwrap_or(*date);
    let mut stmt = conn.prepare(
        "SELECT 1 FROM time_entries
         WHERE employee_id = ?1
           AND entry_type = 'clock_in'
           AND is_active = 1
           AND timestamp >= ?2 AND timestamp < ?3
           AND id != ?4
         LIMIT 1",
    )?;

    let exists = stmt.exists(params![
        employee_id,
        ts_to_db(&day_start(date)),
        ts_to_db(&day_start(&end)),
        exclude_id.unwrap_or(0),
    ])?;
    Ok(exists)
}
