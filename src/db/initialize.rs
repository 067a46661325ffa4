use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Prepare a connection for use: enforce the employee references of the
/// entry and request tables, then bring the schema up to date.
///
/// Tables are only ever created or altered by migrations.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    run_pending_migrations(conn)?;
    Ok(())
}
