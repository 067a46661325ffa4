use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, EmployeeAction};
use crate::config::Config;
use crate::core::employees::EmployeeLogic;
use crate::errors::AppResult;
use crate::models::employee::EmployeeProfile;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Employee { action } = cmd else {
        return Ok(());
    };

    let user = cfg.current_user()?;
    let mut pool = open_pool(cfg)?;

    match action {
        EmployeeAction::Add {
            id,
            name,
            email,
            document,
            delegation,
            centers,
        } => {
            let profile = EmployeeProfile {
                email: email.clone(),
                document_number: document.clone(),
                delegation: delegation.clone(),
                work_centers: centers.clone(),
                ..EmployeeProfile::new(id, name, &user.id)
            };
            let saved = EmployeeLogic::add(&mut pool, &user, profile)?;
            success(format!(
                "Employee {} ({}) added to {}",
                saved.id, saved.fiscal_name, saved.company_id
            ));
        }

        EmployeeAction::List { json } => {
            let employees = EmployeeLogic::list(&pool, &user)?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&employees)?);
                return Ok(());
            }
            if employees.is_empty() {
                info(format!("No employees visible to {user}"));
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 8),
                Column::new("NAME", 20),
                Column::new("COMPANY", 10),
                Column::new("DELEGATION", 10),
                Column::new("CENTERS", 10),
            ])
            .with_separator(&cfg.separator_char);

            for e in &employees {
                table.add_row(vec![
                    e.id.clone(),
                    e.fiscal_name.clone(),
                    e.company_id.clone(),
                    e.delegation.clone().unwrap_or_default(),
                    e.work_centers.join(", "),
                ]);
            }
            print!("{}", table.render());
        }

        EmployeeAction::Deactivate { id } => {
            EmployeeLogic::deactivate(&mut pool, &user, id)?;
            success(format!("Employee {id} deactivated"));
        }
    }

    Ok(())
}
