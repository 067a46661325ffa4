//! The internal `log` table: one row per write, plus the applied migrations.

use crate::errors::AppResult;
use chrono::{DateTime, Local};
use rusqlite::{Connection, params};

/// A row of the internal `log` table.
#[derive(Debug, Clone)]
pub struct LogRow {
    pub id: i64,
    pub date: String,
    pub operation: String,
    /// Employee id, request id or database path the operation touched.
    pub target: String,
    pub message: String,
}

/// Record a write. Runs on whatever connection or transaction the write used.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![Local::now().to_rfc3339(), operation, target, message])?;
    Ok(())
}

/// Rows in id order, optionally only those of one operation.
pub fn load_log(conn: &Connection, operation: Option<&str>) -> AppResult<Vec<LogRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, target, message FROM log
         WHERE (?1 IS NULL OR operation = ?1)
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([operation], |row| {
        let raw_date: String = row.get("date")?;
        let date = DateTime::parse_from_rfc3339(&raw_date)
            .map(|dt| dt.format("%FT%T%:z").to_string())
            .unwrap_or(raw_date);

        Ok(LogRow {
            id: row.get("id")?,
            date,
            operation: row.get("operation")?,
            target: row.get("target")?,
            message: row.get("message")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
