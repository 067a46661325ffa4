//! Queries over `time_requests` and `planner_requests`.

use crate::db::queries::{parse_db_timestamp, ts_to_db};
use crate::errors::{AppError, AppResult};
use crate::models::entry_type::EntryType;
use crate::models::request::{PlannerRequest, PlannerType, RequestStatus, TimeRequest};
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

fn bad_text(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_status(row: &Row, idx: usize) -> Result<RequestStatus> {
    let s: String = row.get("status")?;
    RequestStatus::from_db_str(&s).ok_or_else(|| bad_text(idx, AppError::InvalidStatus(s)))
}

fn parse_date(row: &Row, col: &str, idx: usize) -> Result<NaiveDate> {
    let s: String = row.get(col)?;
    NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| bad_text(idx, AppError::InvalidDate(s)))
}

fn map_time_request(row: &Row) -> Result<TimeRequest> {
    let dt_str: String = row.get("datetime")?;
    let datetime = parse_db_timestamp(&dt_str)
        .ok_or_else(|| bad_text(2, AppError::InvalidTimestamp(dt_str.clone())))?;

    let kind_str: String = row.get("entry_type")?;
    let entry_type = EntryType::from_db_str(&kind_str)
        .ok_or_else(|| bad_text(3, AppError::InvalidEntryType(kind_str.clone())))?;

    Ok(TimeRequest {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        datetime,
        entry_type,
        work_center: row.get("work_center")?,
        comment: row.get("comment")?,
        status: parse_status(row, 6)?,
        created_at: row.get("created_at")?,
    })
}

fn map_planner_request(row: &Row) -> Result<PlannerRequest> {
    let type_str: String = row.get("planner_type")?;
    let planner_type = PlannerType::from_db_str(&type_str)
        .ok_or_else(|| bad_text(2, AppError::InvalidPlannerType(type_str.clone())))?;

    Ok(PlannerRequest {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        planner_type,
        start_date: parse_date(row, "start_date", 3)?,
        end_date: parse_date(row, "end_date", 4)?,
        comment: row.get("comment")?,
        status: parse_status(row, 6)?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_time_request(
    conn: &Connection,
    employee_id: &str,
    datetime: &NaiveDateTime,
    entry_type: EntryType,
    work_center: Option<&str>,
    comment: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO time_requests
            (employee_id, datetime, entry_type, work_center, comment, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 'pending', ?6)",
        params![
            employee_id,
            ts_to_db(datetime),
            entry_type.to_db_str(),
            work_center,
            comment,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_planner_request(
    conn: &Connection,
    employee_id: &str,
    planner_type: PlannerType,
    start: &NaiveDate,
    end: &NaiveDate,
    comment: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO planner_requests
            (employee_id, planner_type, start_date, end_date, comment, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 'pending', ?6)",
        params![
            employee_id,
            planner_type.to_db_str(),
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string(),
            comment,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_time_request(conn: &Connection, id: i64) -> AppResult<TimeRequest> {
    conn.query_row(
        "SELECT id, employee_id, datetime, entry_type, work_center, comment, status, created_at
         FROM time_requests WHERE id = ?1",
        [id],
        map_time_request,
    )
    .optional()?
    .ok_or(AppError::RequestNotFound(id))
}

pub fn load_planner_request(conn: &Connection, id: i64) -> AppResult<PlannerRequest> {
    conn.query_row(
        "SELECT id, employee_id, planner_type, start_date, end_date, comment, status, created_at
         FROM planner_requests WHERE id = ?1",
        [id],
        map_planner_request,
    )
    .optional()?
    .ok_or(AppError::RequestNotFound(id))
}

/// Build `employee_id IN (...)` plus the optional status filter.
fn filter_sql(employee_ids: &[String], status: Option<RequestStatus>) -> (String, Vec<String>) {
    let placeholders = vec!["?"; employee_ids.len()].join(",");
    let mut sql = format!("employee_id IN ({placeholders})");
    let mut values = employee_ids.to_vec();

    if let Some(s) = status {
        sql.push_str(" AND status = ?");
        values.push(s.to_db_str().to_string());
    }

    (sql, values)
}

pub fn list_time_requests(
    conn: &Connection,
    employee_ids: &[String],
    status: Option<RequestStatus>,
) -> AppResult<Vec<TimeRequest>> {
    if employee_ids.is_empty() {
        return Ok(Vec::new());
    }

    let (filter, values) = filter_sql(employee_ids, status);
    let sql = format!(
        "SELECT id, employee_id, datetime, entry_type, work_center, comment, status, created_at
         FROM time_requests WHERE {filter}
         ORDER BY created_at DESC, id DESC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), map_time_request)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_planner_requests(
    conn: &Connection,
    employee_ids: &[String],
    status: Option<RequestStatus>,
) -> AppResult<Vec<PlannerRequest>> {
    if employee_ids.is_empty() {
        return Ok(Vec::new());
    }

    let (filter, values) = filter_sql(employee_ids, status);
    let sql = format!(
        "SELECT id, employee_id, planner_type, start_date, end_date, comment, status, created_at
         FROM planner_requests WHERE {filter}
         ORDER BY created_at DESC, id DESC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), map_planner_request)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Move a pending request to `status`. Resolved requests are left alone.
pub fn set_time_request_status(conn: &Connection, id: i64, status: RequestStatus) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE time_requests SET status = ?1 WHERE id = ?2 AND status = 'pending'",
        params![status.to_db_str(), id],
    )?;
    if n == 0 {
        return Err(AppError::RequestAlreadyResolved(id));
    }
    Ok(())
}

pub fn set_planner_request_status(
    conn: &Connection,
    id: i64,
    status: RequestStatus,
) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE planner_requests SET status = ?1 WHERE id = ?2 AND status = 'pending'",
        params![status.to_db_str(), id],
    )?;
    if n == 0 {
        return Err(AppError::RequestAlreadyResolved(id));
    }
    Ok(())
}
