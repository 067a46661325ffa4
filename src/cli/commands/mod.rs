pub mod config;
pub mod db;
pub mod employee;
pub mod entry;
pub mod holiday;
pub mod init;
pub mod log;
pub mod overview;
pub mod punch;
pub mod report;
pub mod request;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::entry_type::EntryType;
use crate::models::time_type::TimeType;

/// Open the configured database, applying pending migrations first.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

pub(crate) fn parse_kind(s: &str) -> AppResult<EntryType> {
    EntryType::et_from_str(s).ok_or_else(|| AppError::InvalidEntryType(s.to_string()))
}

pub(crate) fn parse_time_type(s: Option<&String>) -> AppResult<Option<TimeType>> {
    s.map(|code| TimeType::from_code(code).ok_or_else(|| AppError::InvalidTimeType(code.clone())))
        .transpose()
}
