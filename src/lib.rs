//! punchclock library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (calculator, persistence, workflows).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use crate::cli::commands as c;

    match &cli.command {
        Commands::Init => c::init::handle(cli),
        Commands::Config { .. } => c::config::handle(&cli.command, cfg),
        Commands::Db { .. } => c::db::handle(&cli.command, cfg),
        Commands::Log { .. } => c::log::handle(&cli.command, cfg),
        Commands::Employee { .. } => c::employee::handle(&cli.command, cfg),
        Commands::Punch { .. } | Commands::Status { .. } => c::punch::handle(&cli.command, cfg),
        Commands::Entry { .. } => c::entry::handle(&cli.command, cfg),
        Commands::Request { .. } => c::request::handle(&cli.command, cfg),
        Commands::Holiday { .. } => c::holiday::handle(&cli.command, cfg),
        Commands::Overview { .. } => c::overview::handle(&cli.command, cfg),
        Commands::Report { .. } => c::report::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // test mode never reads the user's configuration file
    let mut cfg = if cli.test {
        Config::default()
    } else {
        Config::load()?
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(identity) = &cli.as_user {
        cfg.user = identity.clone();
    }

    dispatch(&cli, &cfg)
}
