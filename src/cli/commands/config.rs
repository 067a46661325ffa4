use crate::cli::parser::Commands;
use crate::config::{Config, migrate};
use crate::errors::AppResult;
use crate::ui::messages::{error, success, warning};
use std::path::Path;
use std::process::Command;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn run_editor(editor: &str, path: &Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}

/// Open the file with the requested editor, then with the default one.
fn edit(path: &Path, requested: Option<&String>) {
    let fallback = default_editor();
    let first = requested.cloned().unwrap_or_else(|| fallback.clone());

    if run_editor(&first, path) {
        success(format!("Configuration file edited using '{first}'"));
        return;
    }

    warning(format!("Editor '{first}' not available, falling back to '{fallback}'"));
    if run_editor(&fallback, path) {
        success(format!("Configuration file edited using fallback '{fallback}'"));
    } else {
        error(format!("Failed to edit configuration file using '{fallback}'"));
    }
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        if *check || *migrate {
            if !path.exists() {
                warning(format!("No configuration file at {}", path.display()));
                return Ok(());
            }
            if *migrate {
                migrate::migrate_file(&path)?;
            } else {
                migrate::check_file(&path)?;
            }
        }

        if *edit_config {
            edit(&path, editor.as_ref());
        }
    }

    Ok(())
}
