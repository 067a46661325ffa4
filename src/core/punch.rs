//! Recording punches: self-service punches driven by the live state, and
//! manual insertions by a supervisor.

use crate::config::Config;
use crate::core::access::{require_write, resolve_center};
use crate::core::calculator::session::{LiveStatus, punch_state};
use crate::core::changes::Table;
use crate::db::employees::find_visible_employee;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{has_active_clock_in_on, insert_entry, load_history_until};
use crate::errors::{AppError, AppResult};
use crate::models::current_user::CurrentUser;
use crate::models::employee::EmployeeProfile;
use crate::models::entry_type::EntryType;
use crate::models::time_entry::TimeEntry;
use crate::models::time_type::TimeType;
use chrono::NaiveDateTime;

/// One punch to record.
#[derive(Debug, Clone)]
pub struct PunchInput {
    pub employee_id: String,
    pub kind: EntryType,
    pub at: NaiveDateTime,
    /// Clock-in only; the configured default when absent.
    pub time_type: Option<TimeType>,
    /// Clock-in only.
    pub work_center: Option<String>,
}

impl PunchInput {
    pub fn new(employee_id: &str, kind: EntryType, at: NaiveDateTime) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            kind,
            at,
            time_type: None,
            work_center: None,
        }
    }
}

pub struct PunchLogic;

impl PunchLogic {
    /// Live state of an employee as of `now`.
    pub fn status(
        pool: &DbPool,
        user: &CurrentUser,
        employee_id: &str,
        now: NaiveDateTime,
    ) -> AppResult<LiveStatus> {
        let emp = find_visible_employee(&pool.conn, user, employee_id)?;
        let history = load_history_until(&pool.conn, &emp.id, &now)?;
        Ok(punch_state(&history))
    }

    /// Self-service punch: the kind must follow from the current state
    /// (idle → in, working → pause/out, paused → resume).
    pub fn punch(
        pool: &mut DbPool,
        cfg: &Config,
        user: &CurrentUser,
        input: &PunchInput,
    ) -> AppResult<TimeEntry> {
        require_write(user)?;
        let emp = find_visible_employee(&pool.conn, user, &input.employee_id)?;

        let history = load_history_until(&pool.conn, &emp.id, &input.at)?;
        let live = punch_state(&history);

        if !live.state.allows(input.kind) {
            return Err(AppError::InvalidPunch(format!(
                "{} while {} is {}",
                input.kind.to_db_str(),
                emp.id,
                live.state.as_str()
            )));
        }

        let entry = build_entry(cfg, &emp, input)?;
        Self::store(pool, entry, "punch")
    }

    /// Manual insertion at any instant. Anything but a clock-in needs an
    /// active clock-in on the same calendar day.
    pub fn add_entry(
        pool: &mut DbPool,
        cfg: &Config,
        user: &CurrentUser,
        input: &PunchInput,
    ) -> AppResult<TimeEntry> {
        require_write(user)?;
        let emp = find_visible_employee(&pool.conn, user, &input.employee_id)?;

        ensure_open_day(pool, &emp.id, input.kind, input.at, None)?;

        let entry = build_entry(cfg, &emp, input)?;
        Self::store(pool, entry, "add")
    }

    fn store(pool: &mut DbPool, mut entry: TimeEntry, op: &str) -> AppResult<TimeEntry> {
        entry.id = insert_entry(&pool.conn, &entry)?;

        ttlog(
            &pool.conn,
            op,
            &entry.employee_id,
            &format!(
                "{} at {} (entry #{})",
                entry.entry_type.to_db_str(),
                entry.timestamp_str(),
                entry.id
            ),
        )?;
        pool.notify(Table::TimeEntries, Some(&entry.employee_id));

        Ok(entry)
    }
}

/// Fail with `NoActiveSession` when a non clock-in has no clock-in on its day.
pub(crate) fn ensure_open_day(
    pool: &DbPool,
    employee_id: &str,
    kind: EntryType,
    at: NaiveDateTime,
    exclude_id: Option<i64>,
) -> AppResult<()> {
    if kind.is_clock_in() {
        return Ok(());
    }
    if !has_active_clock_in_on(&pool.conn, employee_id, &at.date(), exclude_id)? {
        return Err(AppError::NoActiveSession(format!(
            "{} on {}",
            employee_id,
            at.format("%Y-%m-%d")
        )));
    }
    Ok(())
}

fn build_entry(cfg: &Config, emp: &EmployeeProfile, input: &PunchInput) -> AppResult<TimeEntry> {
    let entry = TimeEntry::new(&emp.id, input.kind, input.at);
    if !input.kind.is_clock_in() {
        return Ok(entry);
    }

    let center = resolve_center(emp, input.work_center.as_deref())?;
    Ok(entry
        .with_time_type(Some(input.time_type.unwrap_or(cfg.default_time_type)))
        .with_work_center(center))
}
