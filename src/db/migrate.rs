use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Migrations are tracked in it.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Employees and their punches.
fn create_core_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employee_profiles (
            id               TEXT PRIMARY KEY,
            fiscal_name      TEXT NOT NULL,
            email            TEXT NOT NULL DEFAULT '',
            document_number  TEXT NOT NULL DEFAULT '',
            company_id       TEXT NOT NULL,
            delegation       TEXT,
            work_centers     TEXT NOT NULL DEFAULT '[]',
            is_active        INTEGER NOT NULL DEFAULT 1,
            created_at       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS time_entries (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id  TEXT NOT NULL REFERENCES employee_profiles(id),
            entry_type   TEXT NOT NULL
                         CHECK(entry_type IN ('clock_in','break_start','break_end','clock_out')),
            timestamp    TEXT NOT NULL,
            time_type    TEXT
                         CHECK(time_type IS NULL OR time_type IN
                               ('turno','coordinacion','formacion','sustitucion','otros')),
            work_center  TEXT,
            is_active    INTEGER NOT NULL DEFAULT 1,
            changes      TEXT CHECK(changes IS NULL OR changes IN ('edited','eliminated')),
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_entries_employee_ts ON time_entries(employee_id, timestamp);
        CREATE INDEX IF NOT EXISTS idx_profiles_company ON employee_profiles(company_id);
        "#,
    )?;
    Ok(())
}

fn create_request_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS time_requests (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id  TEXT NOT NULL REFERENCES employee_profiles(id),
            datetime     TEXT NOT NULL,
            entry_type   TEXT NOT NULL
                         CHECK(entry_type IN ('clock_in','break_start','break_end','clock_out')),
            comment      TEXT NOT NULL DEFAULT '',
            status       TEXT NOT NULL DEFAULT 'pending'
                         CHECK(status IN ('pending','approved','rejected')),
            created_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS planner_requests (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id   TEXT NOT NULL REFERENCES employee_profiles(id),
            planner_type  TEXT NOT NULL,
            start_date    TEXT NOT NULL,
            end_date      TEXT NOT NULL,
            comment       TEXT NOT NULL DEFAULT '',
            status        TEXT NOT NULL DEFAULT 'pending'
                          CHECK(status IN ('pending','approved','rejected')),
            created_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_time_requests_employee ON time_requests(employee_id);
        CREATE INDEX IF NOT EXISTS idx_planner_requests_employee ON planner_requests(employee_id);
        "#,
    )?;
    Ok(())
}

fn create_holidays_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS holidays (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            date         TEXT NOT NULL,
            name         TEXT NOT NULL,
            work_center  TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_holidays_date ON holidays(date);
        "#,
    )?;
    Ok(())
}

/// Edits keep the first timestamp for audit purposes.
fn add_original_timestamp_column(conn: &Connection) -> Result<()> {
    if column_exists(conn, "time_entries", "original_timestamp")? {
        return Ok(());
    }

    warning("Adding 'original_timestamp' column to time_entries table...");
    conn.execute(
        "ALTER TABLE time_entries ADD COLUMN original_timestamp TEXT;",
        [],
    )?;
    Ok(())
}

/// Clock-in requests carry the center the punch will be recorded at.
fn add_request_work_center_column(conn: &Connection) -> Result<()> {
    if column_exists(conn, "time_requests", "work_center")? {
        return Ok(());
    }

    warning("Adding 'work_center' column to time_requests table...");
    conn.execute("ALTER TABLE time_requests ADD COLUMN work_center TEXT;", [])?;
    Ok(())
}

type Step = fn(&Connection) -> Result<()>;

/// Ordered list of schema versions. Append only.
const MIGRATIONS: &[(&str, &str, Step)] = &[
    (
        "20250110_0001_create_core_tables",
        "Created employee_profiles and time_entries",
        create_core_tables,
    ),
    (
        "20250110_0002_create_request_tables",
        "Created time_requests and planner_requests",
        create_request_tables,
    ),
    (
        "20250204_0003_create_holidays",
        "Created holidays",
        create_holidays_table,
    ),
    (
        "20250321_0004_add_original_timestamp",
        "Added original_timestamp to time_entries",
        add_original_timestamp_column,
    ),
    (
        "20250415_0005_add_request_work_center",
        "Added work_center to time_requests",
        add_request_work_center_column,
    ),
];

/// Names of the migrations not applied yet.
pub fn pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut out = Vec::new();
    for (version, _, _) in MIGRATIONS {
        if !is_applied(conn, version)? {
            out.push(*version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db(). Each step runs inside its own
/// transaction together with its `migration_applied` marker.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for (version, message, step) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        conn.execute_batch("BEGIN;")?;
        let outcome = step(conn).and_then(|_| mark_applied(conn, version, message));
        match outcome {
            Ok(()) => conn.execute_batch("COMMIT;")?,
            Err(e) => {
                conn.execute_batch("ROLLBACK;")?;
                return Err(e);
            }
        }

        success(format!("Migration applied: {} → {}", version, message));
    }

    if !table_exists(conn, "time_entries")? {
        // markers present but table dropped by hand
        warning("time_entries table missing, recreating core tables.");
        create_core_tables(conn)?;
        add_original_timestamp_column(conn)?;
    }

    Ok(())
}
