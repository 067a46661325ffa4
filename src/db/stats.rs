use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, sql: &str) -> rusqlite::Result<i64> {
    pool.conn.query_row(sql, [], |row| row.get(0))
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let employees = count(pool, "SELECT COUNT(*) FROM employee_profiles WHERE is_active = 1")?;
    let active = count(pool, "SELECT COUNT(*) FROM time_entries WHERE is_active = 1")?;
    let deleted = count(pool, "SELECT COUNT(*) FROM time_entries WHERE is_active = 0")?;
    let pending = count(
        pool,
        "SELECT (SELECT COUNT(*) FROM time_requests WHERE status = 'pending')
              + (SELECT COUNT(*) FROM planner_requests WHERE status = 'pending')",
    )?;

    println!("{}• Active employees:{} {}{}{}", CYAN, RESET, GREEN, employees, RESET);
    println!(
        "{}• Time entries:{} {}{}{} active, {} soft-deleted",
        CYAN, RESET, GREEN, active, RESET, deleted
    );
    println!("{}• Pending requests:{} {}", CYAN, RESET, pending);

    //
    // 3) DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT substr(timestamp, 1, 10) FROM time_entries WHERE is_active = 1
             ORDER BY timestamp ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT substr(timestamp, 1, 10) FROM time_entries WHERE is_active = 1
             ORDER BY timestamp DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt = |v: &Option<String>| v.clone().unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt(&first));
    println!("    to:   {}", fmt(&last));

    println!();
    Ok(())
}
