//! Reports built on the calculator: period totals, annual grid, the
//! official per-day register and overtime alarms.

use crate::config::Config;
use crate::core::access::visible_ids;
use crate::core::calculator::alarms::{Alarm, find_alarms};
use crate::core::calculator::buckets::{AsOfPolicy, annual_by_month, daily_series, sum_daily};
use crate::db::employees::{find_visible_employee, load_visible_employees};
use crate::db::holidays::load_holidays;
use crate::db::pool::DbPool;
use crate::db::queries::load_active_entries;
use crate::errors::{AppError, AppResult};
use crate::models::current_user::CurrentUser;
use crate::models::day_summary::DaySummary;
use crate::models::duration_result::DurationResult;
use crate::models::time_entry::TimeEntry;
use crate::utils::table::{Column, Table};
use crate::utils::time::format_minutes;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::Connection;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Active entries of `ids` dated within `[from, to]`, grouped by employee.
pub(crate) fn load_window(
    conn: &Connection,
    ids: &[String],
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<HashMap<String, Vec<TimeEntry>>> {
    let start = from.and_time(NaiveTime::MIN);
    let end = to.succ_opt().unwrap_or(to).and_time(NaiveTime::MIN);

    let mut grouped: HashMap<String, Vec<TimeEntry>> = HashMap::new();
    for e in load_active_entries(conn, ids, &start, &end)? {
        grouped.entry(e.employee_id.clone()).or_default().push(e);
    }
    Ok(grouped)
}

fn check_range(from: NaiveDate, to: NaiveDate) -> AppResult<()> {
    if from > to {
        return Err(AppError::InvalidRange(format!("{from} is after {to}")));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeTotal {
    pub employee_id: String,
    pub fiscal_name: String,
    pub worked_minutes: i64,
    pub break_minutes: i64,
    pub days_worked: usize,
    pub open_session: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub rows: Vec<EmployeeTotal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnualRow {
    pub employee_id: String,
    pub fiscal_name: String,
    /// January first.
    pub months: Vec<i64>,
    pub total_minutes: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnualReport {
    pub year: i32,
    pub rows: Vec<AnnualRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OfficialDay {
    pub date: NaiveDate,
    pub first_clock_in: Option<String>,
    pub last_clock_out: Option<String>,
    pub break_minutes: i64,
    pub worked_minutes: i64,
    pub holiday: Option<String>,
}

impl From<&DaySummary> for OfficialDay {
    fn from(day: &DaySummary) -> Self {
        let hm = |t: Option<NaiveDateTime>| t.map(|t| t.format("%H:%M").to_string());
        Self {
            date: day.date,
            first_clock_in: hm(day.result.first_clock_in),
            last_clock_out: hm(day.result.last_clock_out),
            break_minutes: day.result.break_minutes(),
            worked_minutes: day.result.worked_minutes(),
            holiday: day.holiday.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OfficialReport {
    pub employee_id: String,
    pub fiscal_name: String,
    pub document_number: String,
    pub company_id: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: Vec<OfficialDay>,
    pub total_worked_minutes: i64,
    pub total_break_minutes: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlarmReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub limit_hours: f64,
    pub alarms: Vec<Alarm>,
}

pub struct ReportLogic;

impl ReportLogic {
    /// Per-employee totals over `[from, to]`, as the sum of daily buckets.
    pub fn daily(
        pool: &DbPool,
        cfg: &Config,
        user: &CurrentUser,
        from: NaiveDate,
        to: NaiveDate,
        now: NaiveDateTime,
    ) -> AppResult<DailyReport> {
        check_range(from, to)?;
        let policy = cfg.dangling_policy.to_policy(now);

        let employees = load_visible_employees(&pool.conn, user)?;
        let ids: Vec<String> = employees.iter().map(|e| e.id.clone()).collect();
        let mut window = load_window(&pool.conn, &ids, from, to)?;

        let rows = employees
            .into_iter()
            .map(|emp| {
                let entries = window.remove(&emp.id).unwrap_or_default();
                let series = daily_series(&entries, from, to, policy);
                let total = sum_daily(&entries, policy);

                EmployeeTotal {
                    employee_id: emp.id,
                    fiscal_name: emp.fiscal_name,
                    worked_minutes: total.worked_minutes(),
                    break_minutes: total.break_minutes(),
                    days_worked: series.iter().filter(|(_, r)| !r.worked.is_zero()).count(),
                    open_session: total.open_session,
                }
            })
            .collect();

        Ok(DailyReport { from, to, rows })
    }

    pub fn annual(
        pool: &DbPool,
        cfg: &Config,
        user: &CurrentUser,
        year: i32,
        now: NaiveDateTime,
    ) -> AppResult<AnnualReport> {
        let (from, to) = match (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) {
            (Some(f), Some(t)) => (f, t),
            _ => return Err(AppError::InvalidDate(year.to_string())),
        };
        let policy = cfg.dangling_policy.to_policy(now);

        let employees = load_visible_employees(&pool.conn, user)?;
        let ids: Vec<String> = employees.iter().map(|e| e.id.clone()).collect();
        let mut window = load_window(&pool.conn, &ids, from, to)?;

        let rows = employees
            .into_iter()
            .map(|emp| {
                let entries = window.remove(&emp.id).unwrap_or_default();
                let months = annual_by_month(&entries, year, policy);
                let minutes: Vec<i64> = months.iter().map(|m| m.worked_minutes()).collect();
                let total_minutes = months.iter().sum::<DurationResult>().worked_minutes();

                AnnualRow {
                    employee_id: emp.id,
                    fiscal_name: emp.fiscal_name,
                    months: minutes,
                    total_minutes,
                }
            })
            .collect();

        Ok(AnnualReport { year, rows })
    }

    /// One row per calendar day for a single employee, holidays flagged.
    pub fn official(
        pool: &DbPool,
        cfg: &Config,
        user: &CurrentUser,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
        now: NaiveDateTime,
    ) -> AppResult<OfficialReport> {
        check_range(from, to)?;
        let policy = cfg.dangling_policy.to_policy(now);

        let emp = find_visible_employee(&pool.conn, user, employee_id)?;
        let entries = load_window(&pool.conn, std::slice::from_ref(&emp.id), from, to)?
            .remove(&emp.id)
            .unwrap_or_default();

        let holidays: BTreeMap<NaiveDate, String> = load_holidays(&pool.conn, &from, &to)?
            .into_iter()
            .filter(|h| h.applies_to(&emp.work_centers))
            .map(|h| (h.date, h.name))
            .collect();

        let summaries: Vec<DaySummary> = daily_series(&entries, from, to, policy)
            .into_iter()
            .map(|(date, result)| DaySummary {
                date,
                result,
                holiday: holidays.get(&date).cloned(),
            })
            .collect();

        let days: Vec<OfficialDay> = summaries.iter().map(OfficialDay::from).collect();
        let total_worked_minutes = days.iter().map(|d| d.worked_minutes).sum();
        let total_break_minutes = days.iter().map(|d| d.break_minutes).sum();

        Ok(OfficialReport {
            employee_id: emp.id,
            fiscal_name: emp.fiscal_name,
            document_number: emp.document_number,
            company_id: emp.company_id,
            from,
            to,
            days,
            total_worked_minutes,
            total_break_minutes,
        })
    }

    /// Employees whose total over `[from, to]` is above the limit
    /// (`hours_limit` from the configuration when not given).
    pub fn alarms(
        pool: &DbPool,
        cfg: &Config,
        user: &CurrentUser,
        from: NaiveDate,
        to: NaiveDate,
        limit_hours: Option<f64>,
        now: NaiveDateTime,
    ) -> AppResult<AlarmReport> {
        check_range(from, to)?;
        let policy: AsOfPolicy = cfg.dangling_policy.to_policy(now);
        let limit_hours = limit_hours.unwrap_or(cfg.hours_limit);

        let ids = visible_ids(&pool.conn, user)?;
        let window = load_window(&pool.conn, &ids, from, to)?;

        let totals: Vec<(&str, _)> = ids
            .iter()
            .map(|id| {
                let entries = window.get(id).map(Vec::as_slice).unwrap_or(&[]);
                (id.as_str(), sum_daily(entries, policy))
            })
            .collect();

        Ok(AlarmReport {
            from,
            to,
            limit_hours,
            alarms: find_alarms(totals, limit_hours),
        })
    }
}

pub fn to_json<T: Serialize>(report: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render_daily(report: &DailyReport, sep: &str) -> String {
    let mut table = Table::new(vec![
        Column::new("EMPLOYEE", 10),
        Column::new("NAME", 20),
        Column::new("DAYS", 4),
        Column::new("BREAKS", 7),
        Column::new("WORKED", 7),
    ])
    .with_separator(sep);

    for r in &report.rows {
        let worked = format_minutes(r.worked_minutes);
        table.add_row(vec![
            r.employee_id.clone(),
            r.fiscal_name.clone(),
            r.days_worked.to_string(),
            format_minutes(r.break_minutes),
            if r.open_session { format!("{worked}*") } else { worked },
        ]);
    }

    table.render()
}

pub fn render_annual(report: &AnnualReport, sep: &str) -> String {
    const MONTHS: [&str; 12] = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];

    let mut columns = vec![Column::new("EMPLOYEE", 10)];
    columns.extend(MONTHS.iter().map(|m| Column::new(m, 6)));
    columns.push(Column::new("TOTAL", 7));
    let mut table = Table::new(columns).with_separator(sep);

    for r in &report.rows {
        let mut row = vec![r.employee_id.clone()];
        row.extend(r.months.iter().map(|m| format_minutes(*m)));
        row.push(format_minutes(r.total_minutes));
        table.add_row(row);
    }

    table.render()
}

pub fn render_official(report: &OfficialReport, sep: &str) -> String {
    let mut out = format!(
        "{} - {} ({})\n{} .. {}\n\n",
        report.employee_id, report.fiscal_name, report.company_id, report.from, report.to
    );

    let mut table = Table::new(vec![
        Column::new("DATE", 10),
        Column::new("IN", 5),
        Column::new("OUT", 5),
        Column::new("BREAKS", 6),
        Column::new("WORKED", 6),
        Column::new("HOLIDAY", 10),
    ])
    .with_separator(sep);

    let dash = || "--:--".to_string();
    for d in &report.days {
        table.add_row(vec![
            d.date.format("%Y-%m-%d").to_string(),
            d.first_clock_in.clone().unwrap_or_else(dash),
            d.last_clock_out.clone().unwrap_or_else(dash),
            format_minutes(d.break_minutes),
            format_minutes(d.worked_minutes),
            d.holiday.clone().unwrap_or_default(),
        ]);
    }
    table.add_row(vec![
        "TOTAL".to_string(),
        String::new(),
        String::new(),
        format_minutes(report.total_break_minutes),
        format_minutes(report.total_worked_minutes),
        String::new(),
    ]);

    out.push_str(&table.render());
    out
}

pub fn render_alarms(report: &AlarmReport, sep: &str) -> String {
    if report.alarms.is_empty() {
        return format!(
            "No employee above {}h between {} and {}\n",
            report.limit_hours, report.from, report.to
        );
    }

    let mut table = Table::new(vec![
        Column::new("EMPLOYEE", 10),
        Column::new("WORKED", 7),
        Column::new("LIMIT", 7),
        Column::new("EXCESS", 7),
    ])
    .with_separator(sep);

    for a in &report.alarms {
        table.add_row(vec![
            a.employee_id.clone(),
            format_minutes(a.worked_minutes),
            format_minutes(a.limit_minutes),
            format_minutes(a.excess_minutes),
        ]);
    }

    table.render()
}
