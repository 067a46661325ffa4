use crate::cli::commands::{open_pool, parse_kind};
use crate::cli::parser::{Commands, RequestAction};
use crate::config::Config;
use crate::core::requests::RequestLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::current_user::CurrentUser;
use crate::models::request::{PlannerType, RequestKind, RequestStatus};
use crate::ui::messages::{info, success};
use crate::utils::date::parse_date;
use crate::utils::table::{Column, Table};
use crate::utils::time::parse_timestamp;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Request { action } = cmd else {
        return Ok(());
    };

    let user = cfg.current_user()?;
    let mut pool = open_pool(cfg)?;

    match action {
        RequestAction::Time {
            employee,
            kind,
            at,
            center,
            comment,
        } => {
            let kind = parse_kind(kind)?;
            let at = parse_timestamp(at)?;
            let id = RequestLogic::submit_time(
                &mut pool,
                &user,
                employee,
                at,
                kind,
                center.as_deref(),
                comment,
            )?;
            success(format!("Time request #{id} submitted for {employee}"));
        }

        RequestAction::Planner {
            employee,
            planner_type,
            from,
            to,
            comment,
        } => {
            let ptype = PlannerType::from_code(planner_type)
                .ok_or_else(|| AppError::InvalidPlannerType(planner_type.clone()))?;
            let start = parse_date(from).ok_or_else(|| AppError::InvalidDate(from.clone()))?;
            let end = parse_date(to).ok_or_else(|| AppError::InvalidDate(to.clone()))?;

            let id = RequestLogic::submit_planner(
                &mut pool, &user, employee, ptype, start, end, comment,
            )?;
            success(format!("Planner request #{id} submitted for {employee}"));
        }

        RequestAction::List { kind, status } => {
            let status = match status {
                Some(s) => Some(
                    RequestStatus::from_db_str(s)
                        .ok_or_else(|| AppError::InvalidStatus(s.clone()))?,
                ),
                None => None,
            };
            list(&pool, cfg, &user, *kind, status)?;
        }

        RequestAction::Approve { kind, id } => {
            match RequestLogic::approve(&mut pool, cfg, &user, *kind, *id)? {
                Some(entry) => success(format!(
                    "Request #{id} approved: entry #{} {} at {}",
                    entry.id,
                    entry.entry_type.to_db_str(),
                    entry.timestamp.format("%Y-%m-%d %H:%M")
                )),
                None => success(format!("Request #{id} approved")),
            }
        }

        RequestAction::Reject { kind, id } => {
            RequestLogic::reject(&mut pool, &user, *kind, *id)?;
            success(format!("Request #{id} rejected"));
        }
    }

    Ok(())
}

fn list(
    pool: &DbPool,
    cfg: &Config,
    user: &CurrentUser,
    kind: RequestKind,
    status: Option<RequestStatus>,
) -> AppResult<()> {
    let (columns, rows): (Vec<Column>, Vec<Vec<String>>) = match kind {
        RequestKind::Time => (
            vec![
                Column::new("ID", 4),
                Column::new("EMPLOYEE", 8),
                Column::new("WHEN", 16),
                Column::new("TYPE", 11),
                Column::new("STATUS", 8),
                Column::new("COMMENT", 10),
            ],
            RequestLogic::list_time(pool, user, status)?
                .into_iter()
                .map(|r| {
                    vec![
                        r.id.to_string(),
                        r.employee_id,
                        r.datetime.format("%Y-%m-%d %H:%M").to_string(),
                        r.entry_type.to_db_str().to_string(),
                        r.status.to_db_str().to_string(),
                        r.comment,
                    ]
                })
                .collect(),
        ),
        RequestKind::Planner => (
            vec![
                Column::new("ID", 4),
                Column::new("EMPLOYEE", 8),
                Column::new("TYPE", 16),
                Column::new("FROM", 10),
                Column::new("TO", 10),
                Column::new("STATUS", 8),
                Column::new("COMMENT", 10),
            ],
            RequestLogic::list_planner(pool, user, status)?
                .into_iter()
                .map(|r| {
                    vec![
                        r.id.to_string(),
                        r.employee_id,
                        r.planner_type.to_db_str().to_string(),
                        r.start_date.to_string(),
                        r.end_date.to_string(),
                        r.status.to_db_str().to_string(),
                        r.comment,
                    ]
                })
                .collect(),
        ),
    };

    if rows.is_empty() {
        info("No requests found.");
        return Ok(());
    }

    let mut table = Table::new(columns).with_separator(&cfg.separator_char);
    for row in rows {
        table.add_row(row);
    }
    print!("{}", table.render());
    Ok(())
}
