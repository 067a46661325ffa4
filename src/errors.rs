//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.
//!
//! The punch ledger reducer itself never returns an error: it is total over
//! its input. Everything around it (storage, parsing, workflows) does.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid timestamp: {0} (expected YYYY-MM-DD HH:MM[:SS])")]
    InvalidTimestamp(String),

    #[error("Invalid entry type: {0}")]
    InvalidEntryType(String),

    #[error("Invalid time type: {0}")]
    InvalidTimeType(String),

    #[error("Invalid planner type: {0}")]
    InvalidPlannerType(String),

    #[error("Invalid request status: {0}")]
    InvalidStatus(String),

    #[error("Invalid user: {0} (expected role:id, e.g. company:acme)")]
    InvalidUser(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("Employee not found or not visible: {0}")]
    EmployeeNotFound(String),

    #[error("Time entry not found: {0}")]
    EntryNotFound(i64),

    #[error("Request not found: {0}")]
    RequestNotFound(i64),

    // ---------------------------
    // Workflow errors
    // ---------------------------
    #[error("No active clock-in for {0}: a clock-in must exist before a clock-out or break")]
    NoActiveSession(String),

    #[error("Punch not allowed: {0}")]
    InvalidPunch(String),

    #[error("Work center required: {0}")]
    WorkCenterRequired(String),

    #[error("Request {0} has already been resolved")]
    RequestAlreadyResolved(i64),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Not allowed for {0}")]
    Forbidden(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
