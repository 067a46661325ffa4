use crate::cli::commands::{open_pool, parse_kind, parse_time_type};
use crate::cli::parser::{Commands, EntryAction};
use crate::config::Config;
use crate::core::edit::{EditLogic, EntryChanges};
use crate::core::punch::{PunchInput, PunchLogic};
use crate::errors::AppResult;
use crate::models::entry_type::EntryType;
use crate::models::time_entry::TimeEntry;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{GREY, RESET, colorize_in_out};
use crate::utils::date::resolve_period;
use crate::utils::table::{Column, Table};
use crate::utils::time::parse_timestamp;

fn render(entries: &[TimeEntry], sep: &str) -> String {
    let mut table = Table::new(vec![
        Column::new("ID", 4),
        Column::new("DATE", 10),
        Column::new("TIME", 5),
        Column::new("TYPE", 6),
        Column::new("TIME TYPE", 9),
        Column::new("CENTER", 8),
        Column::new("CHANGES", 10),
    ])
    .with_separator(sep);

    for e in entries {
        let changes = match (e.changes, e.original_timestamp) {
            (Some(tag), Some(orig)) if e.is_active => {
                format!("{} (was {})", tag.to_db_str(), orig.format("%H:%M"))
            }
            (Some(tag), _) => tag.to_db_str().to_string(),
            (None, _) => String::new(),
        };

        let mut row = vec![
            e.id.to_string(),
            e.date().format("%Y-%m-%d").to_string(),
            colorize_in_out(
                &e.time_str(),
                !matches!(e.entry_type, EntryType::BreakStart | EntryType::ClockOut),
            ),
            e.entry_type.et_as_str().to_string(),
            e.time_type.map(|t| t.code().to_string()).unwrap_or_default(),
            e.work_center.clone().unwrap_or_default(),
            changes,
        ];
        if !e.is_active {
            row = row.into_iter().map(|c| format!("{GREY}{c}{RESET}")).collect();
        }
        table.add_row(row);
    }

    table.render()
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Entry { action } = cmd else {
        return Ok(());
    };

    let user = cfg.current_user()?;
    let mut pool = open_pool(cfg)?;

    match action {
        EntryAction::Add {
            employee,
            kind,
            at,
            time_type,
            center,
        } => {
            let input = PunchInput {
                time_type: parse_time_type(time_type.as_ref())?,
                work_center: center.clone(),
                ..PunchInput::new(employee, parse_kind(kind)?, parse_timestamp(at)?)
            };
            let entry = PunchLogic::add_entry(&mut pool, cfg, &user, &input)?;
            success(format!(
                "Entry #{} added: {} {} at {}",
                entry.id,
                entry.employee_id,
                entry.entry_type.to_db_str(),
                entry.timestamp.format("%Y-%m-%d %H:%M")
            ));
        }

        EntryAction::Edit {
            id,
            kind,
            at,
            time_type,
            center,
        } => {
            let changes = EntryChanges {
                entry_type: kind.as_deref().map(parse_kind).transpose()?,
                timestamp: at.as_deref().map(parse_timestamp).transpose()?,
                time_type: parse_time_type(time_type.as_ref())?,
                work_center: center.clone(),
            };
            if changes.is_empty() {
                warning("Nothing to change: use --kind, --at, --type or --center");
                return Ok(());
            }

            let entry = EditLogic::edit(&mut pool, cfg, &user, *id, &changes)?;
            success(format!(
                "Entry #{} updated: {} at {}",
                entry.id,
                entry.entry_type.to_db_str(),
                entry.timestamp.format("%Y-%m-%d %H:%M")
            ));
        }

        EntryAction::Del { id } => {
            let entry = EditLogic::delete(&mut pool, &user, *id)?;
            success(format!(
                "Entry #{} deleted ({} at {})",
                entry.id,
                entry.entry_type.to_db_str(),
                entry.timestamp.format("%Y-%m-%d %H:%M")
            ));
        }

        EntryAction::List {
            employee,
            period,
            all,
        } => {
            let (from, to) = resolve_period(period.as_deref())?;
            let entries = EditLogic::list(&pool, &user, employee, from, to, *all)?;

            if entries.is_empty() {
                info(format!("No entries for {employee} between {from} and {to}"));
                return Ok(());
            }
            print!("{}", render(&entries, &cfg.separator_char));
        }
    }

    Ok(())
}
