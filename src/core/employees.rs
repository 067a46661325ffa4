//! Employee roster and holiday calendar maintenance.

use crate::core::access::require_company;
use crate::core::changes::Table;
use crate::db::employees::{
    find_visible_employee, insert_employee, load_employee, load_visible_employees,
    set_employee_active,
};
use crate::db::holidays::{insert_holiday, load_holidays};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::current_user::CurrentUser;
use crate::models::employee::EmployeeProfile;
use crate::models::holiday::Holiday;
use chrono::NaiveDate;

pub struct EmployeeLogic;

impl EmployeeLogic {
    /// Register an employee under the calling company.
    pub fn add(
        pool: &mut DbPool,
        user: &CurrentUser,
        profile: EmployeeProfile,
    ) -> AppResult<EmployeeProfile> {
        require_company(user)?;

        if load_employee(&pool.conn, &profile.id)?.is_some() {
            return Err(AppError::Other(format!("employee {} already exists", profile.id)));
        }

        let profile = EmployeeProfile {
            company_id: user.id.clone(),
            ..profile
        };
        insert_employee(&pool.conn, &profile)?;

        ttlog(
            &pool.conn,
            "employee_add",
            &profile.id,
            &format!("{} ({})", profile.fiscal_name, profile.work_centers.join(", ")),
        )?;
        pool.notify(Table::EmployeeProfiles, Some(&profile.id));
        Ok(profile)
    }

    pub fn list(pool: &DbPool, user: &CurrentUser) -> AppResult<Vec<EmployeeProfile>> {
        load_visible_employees(&pool.conn, user)
    }

    /// Hide an employee from listings and reports. Punches stay.
    pub fn deactivate(pool: &mut DbPool, user: &CurrentUser, id: &str) -> AppResult<()> {
        require_company(user)?;
        let emp = find_visible_employee(&pool.conn, user, id)?;

        set_employee_active(&pool.conn, &emp.id, false)?;

        ttlog(&pool.conn, "employee_deactivate", &emp.id, &emp.fiscal_name)?;
        pool.notify(Table::EmployeeProfiles, Some(&emp.id));
        Ok(())
    }
}

pub struct HolidayLogic;

impl HolidayLogic {
    pub fn add(
        pool: &mut DbPool,
        user: &CurrentUser,
        date: NaiveDate,
        name: &str,
        work_center: Option<&str>,
    ) -> AppResult<Holiday> {
        require_company(user)?;

        let id = insert_holiday(&pool.conn, &date, name, work_center)?;

        ttlog(
            &pool.conn,
            "holiday_add",
            work_center.unwrap_or("*"),
            &format!("{date} {name}"),
        )?;
        pool.notify(Table::Holidays, None);

        Ok(Holiday {
            id,
            date,
            name: name.to_string(),
            work_center: work_center.map(str::to_string),
        })
    }

    pub fn list(pool: &DbPool, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<Holiday>> {
        load_holidays(&pool.conn, &from, &to)
    }
}
