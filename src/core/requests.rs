//! Correction and absence requests: filed by employees, resolved by
//! supervisors. Approving a time request records the requested punch.

use crate::config::Config;
use crate::core::access::{require_resolve, require_write, resolve_center, visible_ids};
use crate::core::changes::Table;
use crate::core::punch::ensure_open_day;
use crate::db::employees::find_visible_employee;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::insert_entry;
use crate::db::requests::{
    insert_planner_request, insert_time_request, list_planner_requests, list_time_requests,
    load_planner_request, load_time_request, set_planner_request_status, set_time_request_status,
};
use crate::errors::{AppError, AppResult};
use crate::models::current_user::CurrentUser;
use crate::models::entry_type::EntryType;
use crate::models::request::{PlannerRequest, PlannerType, RequestKind, RequestStatus, TimeRequest};
use crate::models::time_entry::TimeEntry;
use chrono::{NaiveDate, NaiveDateTime};

pub struct RequestLogic;

impl RequestLogic {
    pub fn submit_time(
        pool: &mut DbPool,
        user: &CurrentUser,
        employee_id: &str,
        datetime: NaiveDateTime,
        entry_type: EntryType,
        work_center: Option<&str>,
        comment: &str,
    ) -> AppResult<i64> {
        require_write(user)?;
        let emp = find_visible_employee(&pool.conn, user, employee_id)?;

        // a clock-in must say where, same as a live punch
        let center = if entry_type.is_clock_in() {
            resolve_center(&emp, work_center)?
        } else {
            None
        };

        let id = insert_time_request(
            &pool.conn,
            &emp.id,
            &datetime,
            entry_type,
            center.as_deref(),
            comment,
        )?;

        ttlog(
            &pool.conn,
            "request",
            &emp.id,
            &format!(
                "time request #{id}: {} at {}",
                entry_type.to_db_str(),
                datetime.format("%Y-%m-%d %H:%M")
            ),
        )?;
        pool.notify(Table::TimeRequests, Some(&emp.id));
        Ok(id)
    }

    pub fn submit_planner(
        pool: &mut DbPool,
        user: &CurrentUser,
        employee_id: &str,
        planner_type: PlannerType,
        start: NaiveDate,
        end: NaiveDate,
        comment: &str,
    ) -> AppResult<i64> {
        require_write(user)?;
        if start > end {
            return Err(AppError::InvalidRange(format!("{start} is after {end}")));
        }
        let emp = find_visible_employee(&pool.conn, user, employee_id)?;

        let id = insert_planner_request(&pool.conn, &emp.id, planner_type, &start, &end, comment)?;

        ttlog(
            &pool.conn,
            "request",
            &emp.id,
            &format!(
                "planner request #{id}: {} {start}..{end}",
                planner_type.to_db_str()
            ),
        )?;
        pool.notify(Table::PlannerRequests, Some(&emp.id));
        Ok(id)
    }

    pub fn list_time(
        pool: &DbPool,
        user: &CurrentUser,
        status: Option<RequestStatus>,
    ) -> AppResult<Vec<TimeRequest>> {
        let ids = visible_ids(&pool.conn, user)?;
        list_time_requests(&pool.conn, &ids, status)
    }

    pub fn list_planner(
        pool: &DbPool,
        user: &CurrentUser,
        status: Option<RequestStatus>,
    ) -> AppResult<Vec<PlannerRequest>> {
        let ids = visible_ids(&pool.conn, user)?;
        list_planner_requests(&pool.conn, &ids, status)
    }

    /// Approve a pending request. For a time request the punch is inserted
    /// in the same transaction and returned.
    pub fn approve(
        pool: &mut DbPool,
        cfg: &Config,
        user: &CurrentUser,
        kind: RequestKind,
        id: i64,
    ) -> AppResult<Option<TimeEntry>> {
        require_resolve(user)?;

        match kind {
            RequestKind::Time => Self::approve_time(pool, cfg, user, id).map(Some),
            RequestKind::Planner => {
                let req = load_planner_request(&pool.conn, id)?;
                Self::resolve_planner(pool, user, &req, RequestStatus::Approved)?;
                Ok(None)
            }
        }
    }

    pub fn reject(
        pool: &mut DbPool,
        user: &CurrentUser,
        kind: RequestKind,
        id: i64,
    ) -> AppResult<()> {
        require_resolve(user)?;

        match kind {
            RequestKind::Time => {
                let req = load_time_request(&pool.conn, id)?;
                let emp = find_visible_employee(&pool.conn, user, &req.employee_id)?;
                if !req.status.is_pending() {
                    return Err(AppError::RequestAlreadyResolved(id));
                }

                set_time_request_status(&pool.conn, id, RequestStatus::Rejected)?;
                ttlog(&pool.conn, "reject", &emp.id, &format!("time request #{id}"))?;
                pool.notify(Table::TimeRequests, Some(&emp.id));
                Ok(())
            }
            RequestKind::Planner => {
                let req = load_planner_request(&pool.conn, id)?;
                Self::resolve_planner(pool, user, &req, RequestStatus::Rejected)
            }
        }
    }

    fn approve_time(
        pool: &mut DbPool,
        cfg: &Config,
        user: &CurrentUser,
        id: i64,
    ) -> AppResult<TimeEntry> {
        let req = load_time_request(&pool.conn, id)?;
        let emp = find_visible_employee(&pool.conn, user, &req.employee_id)?;
        if !req.status.is_pending() {
            return Err(AppError::RequestAlreadyResolved(id));
        }

        ensure_open_day(pool, &emp.id, req.entry_type, req.datetime, None)?;

        let mut entry = TimeEntry::new(&emp.id, req.entry_type, req.datetime);
        if req.entry_type.is_clock_in() {
            entry = entry
                .with_time_type(Some(cfg.default_time_type))
                .with_work_center(resolve_center(&emp, req.work_center.as_deref())?);
        }

        let tx = pool.conn.transaction()?;
        entry.id = insert_entry(&tx, &entry)?;
        set_time_request_status(&tx, id, RequestStatus::Approved)?;
        ttlog(
            &tx,
            "approve",
            &emp.id,
            &format!(
                "time request #{id}: {} at {} (entry #{})",
                entry.entry_type.to_db_str(),
                entry.timestamp_str(),
                entry.id
            ),
        )?;
        tx.commit()?;

        pool.notify(Table::TimeRequests, Some(&emp.id));
        pool.notify(Table::TimeEntries, Some(&emp.id));
        Ok(entry)
    }

    fn resolve_planner(
        pool: &mut DbPool,
        user: &CurrentUser,
        req: &PlannerRequest,
        status: RequestStatus,
    ) -> AppResult<()> {
        let emp = find_visible_employee(&pool.conn, user, &req.employee_id)?;
        if !req.status.is_pending() {
            return Err(AppError::RequestAlreadyResolved(req.id));
        }

        set_planner_request_status(&pool.conn, req.id, status)?;

        let op = match status {
            RequestStatus::Approved => "approve",
            _ => "reject",
        };
        ttlog(&pool.conn, op, &emp.id, &format!("planner request #{}", req.id))?;
        pool.notify(Table::PlannerRequests, Some(&emp.id));
        Ok(())
    }
}
