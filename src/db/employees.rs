//! Queries over `employee_profiles`, scoped by the caller's identity.

use crate::errors::{AppError, AppResult};
use crate::models::current_user::{CurrentUser, Role};
use crate::models::employee::EmployeeProfile;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const PROFILE_COLUMNS: &str =
    "id, fiscal_name, email, document_number, company_id, delegation, work_centers, is_active";

fn map_profile(row: &Row) -> Result<EmployeeProfile> {
    let centers_raw: String = row.get("work_centers")?;
    let work_centers: Vec<String> = serde_json::from_str(&centers_raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(EmployeeProfile {
        id: row.get("id")?,
        fiscal_name: row.get("fiscal_name")?,
        email: row.get("email")?,
        document_number: row.get("document_number")?,
        company_id: row.get("company_id")?,
        delegation: row.get("delegation")?,
        work_centers,
        is_active: row.get::<_, i32>("is_active")? == 1,
    })
}

/// SQL condition (plus its single parameter) restricting rows to what
/// `user` may see.
fn scope_clause(user: &CurrentUser) -> &'static str {
    match user.role {
        Role::Employee => "id = ?1",
        Role::Company | Role::Inspector => "company_id = ?1",
        Role::DelegationSupervisor => "delegation = ?1",
        Role::CenterSupervisor => "EXISTS (SELECT 1 FROM json_each(work_centers) WHERE value = ?1)",
    }
}

pub fn insert_employee(conn: &Connection, emp: &EmployeeProfile) -> AppResult<()> {
    let centers = serde_json::to_string(&emp.work_centers)?;
    conn.execute(
        "INSERT INTO employee_profiles
            (id, fiscal_name, email, document_number, company_id, delegation,
             work_centers, is_active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            emp.id,
            emp.fiscal_name,
            emp.email,
            emp.document_number,
            emp.company_id,
            emp.delegation,
            centers,
            if emp.is_active { 1 } else { 0 },
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn set_employee_active(conn: &Connection, id: &str, active: bool) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE employee_profiles SET is_active = ?1 WHERE id = ?2",
        params![if active { 1 } else { 0 }, id],
    )?;
    if n == 0 {
        return Err(AppError::EmployeeNotFound(id.to_string()));
    }
    Ok(())
}

/// Unscoped lookup by id, inactive profiles included.
pub fn load_employee(conn: &Connection, id: &str) -> AppResult<Option<EmployeeProfile>> {
    let sql = format!("SELECT {PROFILE_COLUMNS} FROM employee_profiles WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_profile).optional()?)
}

/// Active employees visible to `user`, sorted by fiscal name.
pub fn load_visible_employees(
    conn: &Connection,
    user: &CurrentUser,
) -> AppResult<Vec<EmployeeProfile>> {
    let sql = format!(
        "SELECT {PROFILE_COLUMNS} FROM employee_profiles
         WHERE is_active = 1 AND {}
         ORDER BY fiscal_name COLLATE NOCASE ASC, id ASC",
        scope_clause(user)
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([&user.id], map_profile)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Active employee `id`, if `user` may see it.
pub fn find_visible_employee(
    conn: &Connection,
    user: &CurrentUser,
    id: &str,
) -> AppResult<EmployeeProfile> {
    let sql = format!(
        "SELECT {PROFILE_COLUMNS} FROM employee_profiles
         WHERE is_active = 1 AND id = ?2 AND {}",
        scope_clause(user)
    );

    conn.query_row(&sql, params![user.id, id], map_profile)
        .optional()?
        .ok_or_else(|| AppError::EmployeeNotFound(id.to_string()))
}
