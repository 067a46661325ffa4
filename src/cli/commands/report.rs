use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, ReportKind};
use crate::config::Config;
use crate::core::reports::{
    ReportLogic, render_alarms, render_annual, render_daily, render_official, to_json,
};
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::date::{resolve_period, today};
use crate::utils::time::now;
use chrono::Datelike;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Report { kind } = cmd else {
        return Ok(());
    };

    let user = cfg.current_user()?;
    let pool = open_pool(cfg)?;
    let sep = cfg.separator_char.as_str();

    match kind {
        ReportKind::Daily { period, json } => {
            let (from, to) = resolve_period(period.as_deref())?;
            let report = ReportLogic::daily(&pool, cfg, &user, from, to, now())?;
            if *json {
                println!("{}", to_json(&report)?);
            } else {
                header(format!("Worked time {from} .. {to}"));
                print!("{}", render_daily(&report, sep));
            }
        }

        ReportKind::Annual { year, json } => {
            let year = year.unwrap_or_else(|| today().year());
            let report = ReportLogic::annual(&pool, cfg, &user, year, now())?;
            if *json {
                println!("{}", to_json(&report)?);
            } else {
                header(format!("Annual summary {year}"));
                print!("{}", render_annual(&report, sep));
            }
        }

        ReportKind::Official {
            employee,
            period,
            json,
        } => {
            let (from, to) = resolve_period(period.as_deref())?;
            let report = ReportLogic::official(&pool, cfg, &user, employee, from, to, now())?;
            if *json {
                println!("{}", to_json(&report)?);
            } else {
                header("Working time register");
                print!("{}", render_official(&report, sep));
            }
        }

        ReportKind::Alarms {
            period,
            limit,
            json,
        } => {
            let (from, to) = resolve_period(period.as_deref())?;
            let report = ReportLogic::alarms(&pool, cfg, &user, from, to, *limit, now())?;
            if *json {
                println!("{}", to_json(&report)?);
            } else {
                header(format!("Alarms {from} .. {to}"));
                print!("{}", render_alarms(&report, sep));
            }
        }
    }

    Ok(())
}
