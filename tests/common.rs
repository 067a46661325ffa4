#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use punchclock::config::Config;
use punchclock::core::employees::EmployeeLogic;
use punchclock::db::initialize::init_db;
use punchclock::db::pool::DbPool;
use punchclock::models::current_user::CurrentUser;
use punchclock::models::employee::EmployeeProfile;
use punchclock::models::entry_type::EntryType;
use punchclock::models::time_entry::TimeEntry;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn pcl() -> Command {
    cargo_bin_cmd!("punchclock")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_punchclock.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// `--db <path> --test <args...>`, acting as `company:acme` unless `--as`
/// is among the args.
pub fn run_ok(db_path: &str, args: &[&str]) -> String {
    let mut full = vec!["--db", db_path, "--test"];
    if !args.contains(&"--as") {
        full.extend_from_slice(&["--as", "company:acme"]);
    }
    full.extend_from_slice(args);

    let out = pcl().args(&full).output().expect("run punchclock");
    assert!(
        out.status.success(),
        "command {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).to_string()
}

/// Init a DB and register employees E1 (one center) and E2 (two centers)
/// under `company:acme`.
pub fn init_cli_db(name: &str) -> String {
    let db_path = setup_test_db(name);
    run_ok(&db_path, &["init"]);
    run_ok(
        &db_path,
        &["employee", "add", "E1", "--name", "Ana Ruiz", "--center", "Madrid"],
    );
    run_ok(
        &db_path,
        &[
            "employee", "add", "E2", "--name", "Luis Gil", "--center", "Madrid", "--center",
            "Bilbao",
        ],
    );
    db_path
}

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").expect("valid timestamp")
}

pub fn entry(kind: EntryType, at: &str) -> TimeEntry {
    TimeEntry::new("E1", kind, ts(at))
}

pub fn clock_in(at: &str) -> TimeEntry {
    entry(EntryType::ClockIn, at)
}

pub fn break_start(at: &str) -> TimeEntry {
    entry(EntryType::BreakStart, at)
}

pub fn break_end(at: &str) -> TimeEntry {
    entry(EntryType::BreakEnd, at)
}

pub fn clock_out(at: &str) -> TimeEntry {
    entry(EntryType::ClockOut, at)
}

pub fn company() -> CurrentUser {
    CurrentUser::parse("company:acme").expect("valid user")
}

pub fn test_config() -> Config {
    Config {
        database: ":memory:".to_string(),
        user: "company:acme".to_string(),
        ..Config::default()
    }
}

/// In-memory database with the schema and two employees:
/// E1 (delegation Norte, center Madrid) and E2 (centers Madrid and Bilbao).
pub fn memory_pool() -> DbPool {
    let mut pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");

    let user = company();
    let e1 = EmployeeProfile {
        delegation: Some("Norte".to_string()),
        work_centers: vec!["Madrid".to_string()],
        ..EmployeeProfile::new("E1", "Ana Ruiz", "acme")
    };
    let e2 = EmployeeProfile {
        work_centers: vec!["Madrid".to_string(), "Bilbao".to_string()],
        ..EmployeeProfile::new("E2", "Luis Gil", "acme")
    };
    EmployeeLogic::add(&mut pool, &user, e1).expect("add E1");
    EmployeeLogic::add(&mut pool, &user, e2).expect("add E2");

    pool
}
