use crate::errors::AppResult;
use crate::models::holiday::Holiday;
use chrono::NaiveDate;
use rusqlite::{Connection, Result, Row, params};

fn map_holiday(row: &Row) -> Result<Holiday> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Holiday {
        id: row.get("id")?,
        date,
        name: row.get("name")?,
        work_center: row.get("work_center")?,
    })
}

pub fn insert_holiday(
    conn: &Connection,
    date: &NaiveDate,
    name: &str,
    work_center: Option<&str>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO holidays (date, name, work_center) VALUES (?1, ?2, ?3)",
        params![date.format("%Y-%m-%d").to_string(), name, work_center],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Holidays with `from <= date <= to`, ordered by date.
pub fn load_holidays(
    conn: &Connection,
    from: &NaiveDate,
    to: &NaiveDate,
) -> AppResult<Vec<Holiday>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, name, work_center FROM holidays
         WHERE date >= ?1 AND date <= ?2
         ORDER BY date ASC, id ASC",
    )?;

    let rows = stmt.query_map(
        params![
            from.format("%Y-%m-%d").to_string(),
            to.format("%Y-%m-%d").to_string()
        ],
        map_holiday,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
