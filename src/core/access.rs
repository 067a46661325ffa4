//! Permission checks and identity scoping shared by the write and read paths.

use crate::db::employees::load_visible_employees;
use crate::errors::{AppError, AppResult};
use crate::models::current_user::CurrentUser;
use crate::models::employee::EmployeeProfile;
use rusqlite::Connection;

pub fn require_write(user: &CurrentUser) -> AppResult<()> {
    if !user.can_write() {
        return Err(AppError::Forbidden(format!("{user} (read-only)")));
    }
    Ok(())
}

pub fn require_resolve(user: &CurrentUser) -> AppResult<()> {
    if !user.can_resolve() {
        return Err(AppError::Forbidden(format!("{user} (cannot resolve requests)")));
    }
    Ok(())
}

pub fn require_company(user: &CurrentUser) -> AppResult<()> {
    if !user.is_company() {
        return Err(AppError::Forbidden(format!("{user} (company accounts only)")));
    }
    Ok(())
}

/// Ids of the active employees `user` may see.
pub fn visible_ids(conn: &Connection, user: &CurrentUser) -> AppResult<Vec<String>> {
    Ok(load_visible_employees(conn, user)?
        .into_iter()
        .map(|e| e.id)
        .collect())
}

/// Work center for a new clock-in on `emp`.
///
/// Employees without assigned centers accept any (or none); otherwise the
/// center must be one of theirs, and may be omitted only when they have
/// exactly one.
pub fn resolve_center(emp: &EmployeeProfile, requested: Option<&str>) -> AppResult<Option<String>> {
    if emp.work_centers.is_empty() {
        return Ok(requested.map(str::to_string));
    }

    match emp.resolve_work_center(requested) {
        Some(c) => Ok(Some(c)),
        None => Err(AppError::WorkCenterRequired(match requested {
            Some(c) => format!("'{c}' is not assigned to {}", emp.id),
            None => format!(
                "{} works at several centers ({}), pick one with --center",
                emp.id,
                emp.work_centers.join(", ")
            ),
        })),
    }
}
