use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, HolidayAction};
use crate::config::Config;
use crate::core::employees::HolidayLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::date::{parse_date, resolve_period};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Holiday { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;

    match action {
        HolidayAction::Add { date, name, center } => {
            let user = cfg.current_user()?;
            let d = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;

            let h = HolidayLogic::add(&mut pool, &user, d, name, center.as_deref())?;
            success(format!(
                "Holiday {} '{}' added ({})",
                h.date,
                h.name,
                h.work_center.as_deref().unwrap_or("all centers")
            ));
        }

        HolidayAction::List { period } => {
            let (from, to) = resolve_period(period.as_deref())?;
            let holidays = HolidayLogic::list(&pool, from, to)?;

            if holidays.is_empty() {
                info(format!("No holidays between {from} and {to}"));
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("DATE", 10),
                Column::new("NAME", 20),
                Column::new("CENTER", 10),
            ])
            .with_separator(&cfg.separator_char);

            for h in holidays {
                table.add_row(vec![
                    h.date.to_string(),
                    h.name,
                    h.work_center.unwrap_or_else(|| "*".to_string()),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
