//! Supervisor dashboard: where every visible employee stands right now.

use crate::config::Config;
use crate::core::calculator::buckets::sum_daily;
use crate::core::calculator::reducer::compute_worked_duration;
use crate::core::calculator::session::{PunchState, punch_state};
use crate::core::changes::SummaryCache;
use crate::core::reports::load_window;
use crate::db::employees::load_visible_employees;
use crate::db::pool::DbPool;
use crate::db::queries::load_history_until;
use crate::errors::AppResult;
use crate::models::current_user::CurrentUser;
use crate::utils::colors::RESET;
use crate::utils::formatting::describe_state;
use crate::utils::table::{Column, Table};
use crate::utils::time::format_minutes;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct OverviewRow {
    pub employee_id: String,
    pub fiscal_name: String,
    pub state: PunchState,
    /// Instant of the last punch.
    pub since: Option<NaiveDateTime>,
    pub today_minutes: i64,
    pub period_minutes: i64,
}

pub struct OverviewLogic;

impl OverviewLogic {
    /// Today's time is credited up to `now`; the period total follows the
    /// configured policy for open sessions. Period totals go through `cache`,
    /// which callers keep subscribed to the pool's change feed. The cache key
    /// carries the instant open sessions are credited up to, so a later `now`
    /// only reuses totals of a period that is already over.
    pub fn build(
        pool: &DbPool,
        cfg: &Config,
        user: &CurrentUser,
        (from, to): (NaiveDate, NaiveDate),
        now: NaiveDateTime,
        cache: &SummaryCache,
    ) -> AppResult<Vec<OverviewRow>> {
        let policy = cfg.dangling_policy.to_policy(now);
        let today = now.date();
        let period_end = to.succ_opt().unwrap_or(to).and_time(NaiveTime::MIN);
        let bucket = format!("{from}..{to}@{}", policy.resolve(period_end));

        let employees = load_visible_employees(&pool.conn, user)?;
        let ids: Vec<String> = employees.iter().map(|e| e.id.clone()).collect();
        let period = load_window(&pool.conn, &ids, from, to)?;
        let current = load_window(&pool.conn, &ids, today, today)?;

        let mut rows = Vec::with_capacity(employees.len());
        for emp in employees {
            let live = punch_state(&load_history_until(&pool.conn, &emp.id, &now)?);

            let today_minutes = current
                .get(&emp.id)
                .map(|e| compute_worked_duration(e, now).worked_minutes())
                .unwrap_or(0);

            let period_total = cache.get_or_compute(&emp.id, &bucket, || {
                period
                    .get(&emp.id)
                    .map(|e| sum_daily(e, policy))
                    .unwrap_or_default()
            });

            rows.push(OverviewRow {
                employee_id: emp.id,
                fiscal_name: emp.fiscal_name,
                state: live.state,
                since: live.since,
                today_minutes,
                period_minutes: period_total.worked_minutes(),
            });
        }

        Ok(rows)
    }
}

pub fn render_overview(rows: &[OverviewRow], sep: &str) -> String {
    let mut table = Table::new(vec![
        Column::new("EMPLOYEE", 10),
        Column::new("NAME", 20),
        Column::new("STATE", 8),
        Column::new("SINCE", 16),
        Column::new("TODAY", 6),
        Column::new("PERIOD", 7),
    ])
    .with_separator(sep);

    for r in rows {
        let (label, color) = describe_state(r.state);
        table.add_row(vec![
            r.employee_id.clone(),
            r.fiscal_name.clone(),
            format!("{color}{label}{RESET}"),
            r.since
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "--".to_string()),
            format_minutes(r.today_minutes),
            format_minutes(r.period_minutes),
        ]);
    }

    table.render()
}
