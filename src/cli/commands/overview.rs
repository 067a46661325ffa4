use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::changes::SummaryCache;
use crate::core::overview::{OverviewLogic, render_overview};
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::date::resolve_period;
use crate::utils::time::now;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Overview { period, json } = cmd {
        let user = cfg.current_user()?;
        let mut pool = open_pool(cfg)?;

        // lives for this invocation only
        let cache = SummaryCache::new();
        pool.feed.subscribe(cache.clone());

        let range = resolve_period(period.as_deref())?;
        let rows = OverviewLogic::build(&pool, cfg, &user, range, now(), &cache)?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }
        if rows.is_empty() {
            info(format!("No employees visible to {user}"));
            return Ok(());
        }

        header(format!("Overview {} .. {}", range.0, range.1));
        print!("{}", render_overview(&rows, &cfg.separator_char));
    }

    Ok(())
}
