use crate::cli::commands::{open_pool, parse_kind, parse_time_type};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::punch::{PunchInput, PunchLogic};
use crate::errors::AppResult;
use crate::ui::messages::{detail, success};
use crate::utils::colors::RESET;
use crate::utils::formatting::describe_state;
use crate::utils::time::{now, parse_optional_timestamp};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let user = cfg.current_user()?;

    match cmd {
        Commands::Punch {
            employee,
            kind,
            at,
            time_type,
            center,
        } => {
            let kind = parse_kind(kind)?;
            let at = parse_optional_timestamp(at.as_ref())?;
            let input = PunchInput {
                time_type: parse_time_type(time_type.as_ref())?,
                work_center: center.clone(),
                ..PunchInput::new(employee, kind, at)
            };

            let mut pool = open_pool(cfg)?;
            let entry = PunchLogic::punch(&mut pool, cfg, &user, &input)?;

            let mut msg = format!(
                "{}: {} at {}",
                entry.employee_id,
                entry.entry_type.to_db_str(),
                entry.timestamp.format("%Y-%m-%d %H:%M")
            );
            if let Some(t) = entry.time_type {
                msg.push_str(&format!(" [{}]", t.code()));
            }
            if let Some(c) = &entry.work_center {
                msg.push_str(&format!(" @ {c}"));
            }
            success(msg);
        }

        Commands::Status { employee, json } => {
            let pool = open_pool(cfg)?;
            let live = PunchLogic::status(&pool, &user, employee, now())?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&live)?);
                return Ok(());
            }

            let (label, color) = describe_state(live.state);
            detail("Employee", employee);
            detail("State", format!("{color}{label}{RESET}"));
            if let Some(since) = live.since {
                detail("Since", since.format("%Y-%m-%d %H:%M"));
            }
            if let Some(t) = live.time_type {
                detail("Time type", t.code());
            }
            if let Some(c) = &live.work_center {
                detail("Work center", c);
            }
        }

        _ => {}
    }

    Ok(())
}
