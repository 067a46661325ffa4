//! Corrections to recorded punches: edit, soft delete, listing.

use crate::config::Config;
use crate::core::access::{require_write, resolve_center};
use crate::core::changes::Table;
use crate::core::punch::ensure_open_day;
use crate::db::employees::find_visible_employee;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_entries_for_employee, load_entry, soft_delete_entry, update_entry};
use crate::errors::{AppError, AppResult};
use crate::models::change_tag::ChangeTag;
use crate::models::current_user::CurrentUser;
use crate::models::entry_type::EntryType;
use crate::models::time_entry::TimeEntry;
use crate::models::time_type::TimeType;
use chrono::{NaiveDate, NaiveDateTime};

/// Fields to change on an entry; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct EntryChanges {
    pub entry_type: Option<EntryType>,
    pub timestamp: Option<NaiveDateTime>,
    pub time_type: Option<TimeType>,
    pub work_center: Option<String>,
}

impl EntryChanges {
    pub fn is_empty(&self) -> bool {
        self.entry_type.is_none()
            && self.timestamp.is_none()
            && self.time_type.is_none()
            && self.work_center.is_none()
    }
}

pub struct EditLogic;

impl EditLogic {
    pub fn edit(
        pool: &mut DbPool,
        cfg: &Config,
        user: &CurrentUser,
        id: i64,
        changes: &EntryChanges,
    ) -> AppResult<TimeEntry> {
        require_write(user)?;

        let current = load_entry(&pool.conn, id)?;
        if !current.is_active {
            return Err(AppError::EntryNotFound(id));
        }
        let emp = find_visible_employee(&pool.conn, user, &current.employee_id)?;

        let kind = changes.entry_type.unwrap_or(current.entry_type);
        let at = changes.timestamp.unwrap_or(current.timestamp);
        ensure_open_day(pool, &emp.id, kind, at, Some(id))?;

        let mut updated = current.clone();
        updated.entry_type = kind;
        updated.timestamp = at;
        updated.changes = Some(ChangeTag::Edited);
        // the first edit remembers the recorded instant, later edits keep it
        updated.original_timestamp = current.original_timestamp.or(Some(current.timestamp));

        if kind.is_clock_in() {
            updated.time_type = changes
                .time_type
                .or(current.time_type)
                .or(Some(cfg.default_time_type));
            updated.work_center = match &changes.work_center {
                Some(c) => resolve_center(&emp, Some(c))?,
                None => current.work_center.clone(),
            };
        } else {
            updated.time_type = None;
            updated.work_center = None;
        }

        update_entry(&pool.conn, &updated)?;

        ttlog(
            &pool.conn,
            "edit",
            &emp.id,
            &format!(
                "entry #{}: {} {} -> {} {}",
                id,
                current.entry_type.to_db_str(),
                current.timestamp_str(),
                updated.entry_type.to_db_str(),
                updated.timestamp_str()
            ),
        )?;
        pool.notify(Table::TimeEntries, Some(&emp.id));

        Ok(updated)
    }

    /// Soft delete: the row stays, flagged inactive and tagged `eliminated`.
    pub fn delete(pool: &mut DbPool, user: &CurrentUser, id: i64) -> AppResult<TimeEntry> {
        require_write(user)?;

        let entry = load_entry(&pool.conn, id)?;
        if !entry.is_active {
            return Err(AppError::EntryNotFound(id));
        }
        let emp = find_visible_employee(&pool.conn, user, &entry.employee_id)?;

        soft_delete_entry(&pool.conn, id)?;

        ttlog(
            &pool.conn,
            "del",
            &emp.id,
            &format!(
                "entry #{}: {} {}",
                id,
                entry.entry_type.to_db_str(),
                entry.timestamp_str()
            ),
        )?;
        pool.notify(Table::TimeEntries, Some(&emp.id));

        load_entry(&pool.conn, id)
    }

    /// Entries of one employee in `[from, to]`, soft-deleted ones on request.
    pub fn list(
        pool: &DbPool,
        user: &CurrentUser,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
        include_inactive: bool,
    ) -> AppResult<Vec<TimeEntry>> {
        let emp = find_visible_employee(&pool.conn, user, employee_id)?;
        load_entries_for_employee(&pool.conn, &emp.id, &from, &to, include_inactive)
    }
}
