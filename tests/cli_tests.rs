use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_cli_db, pcl, run_ok, setup_test_db};

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("cli_init");

    pcl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    pcl()
        .args(["--db", &db_path, "--test", "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Active employees").and(contains("Integrity check passed")));

    pcl()
        .args(["--db", &db_path, "--test", "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("up to date"));
}

#[test]
fn test_punch_day_and_daily_report() {
    let db_path = init_cli_db("cli_punch_day");

    let out = run_ok(&db_path, &["punch", "E1", "in", "--at", "2025-03-03 08:00"]);
    assert!(out.contains("clock_in"));
    assert!(out.contains("Madrid"));

    run_ok(&db_path, &["punch", "E1", "pause", "--at", "2025-03-03 12:00"]);
    run_ok(&db_path, &["punch", "E1", "resume", "--at", "2025-03-03 12:30"]);
    run_ok(&db_path, &["punch", "E1", "out", "--at", "2025-03-03 17:00"]);

    let report = run_ok(
        &db_path,
        &["report", "daily", "--period", "2025-03"],
    );
    assert!(report.contains("E1"));
    assert!(report.contains("8:30"), "report was:\n{report}");
}

#[test]
fn test_out_of_sequence_punch_fails() {
    let db_path = init_cli_db("cli_out_of_sequence");

    pcl()
        .args([
            "--db",
            &db_path,
            "--test",
            "--as",
            "company:acme",
            "punch",
            "E1",
            "out",
            "--at",
            "2025-03-03 17:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Punch not allowed"));

    pcl()
        .args([
            "--db",
            &db_path,
            "--test",
            "--as",
            "company:acme",
            "punch",
            "E2",
            "in",
            "--at",
            "2025-03-03 08:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Work center required"));
}

#[test]
fn test_alarms_json() {
    let db_path = init_cli_db("cli_alarms_json");

    run_ok(&db_path, &["punch", "E1", "in", "--at", "2025-03-03 08:00"]);
    run_ok(&db_path, &["punch", "E1", "out", "--at", "2025-03-03 16:30"]);

    let out = run_ok(
        &db_path,
        &["report", "alarms", "--period", "2025-03-03", "--limit", "8", "--json"],
    );
    let json_start = out.find('{').expect("json output");
    let v: serde_json::Value = serde_json::from_str(&out[json_start..]).expect("valid json");

    assert_eq!(v["alarms"][0]["employee_id"], "E1");
    assert_eq!(v["alarms"][0]["worked_minutes"], 510);
    assert_eq!(v["alarms"][0]["excess_minutes"], 30);
}

#[test]
fn test_entry_edit_delete_and_list() {
    let db_path = init_cli_db("cli_entry_crud");

    run_ok(&db_path, &["entry", "add", "E1", "in", "--at", "2025-03-05 09:00"]);
    run_ok(&db_path, &["entry", "add", "E1", "out", "--at", "2025-03-05 14:00"]);

    pcl()
        .args([
            "--db",
            &db_path,
            "--test",
            "--as",
            "company:acme",
            "entry",
            "add",
            "E1",
            "out",
            "--at",
            "2025-03-06 14:00",
        ])
        .assert()
        .failure()
        .stderr(contains("No active clock-in"));

    let out = run_ok(&db_path, &["entry", "edit", "2", "--at", "2025-03-05 15:00"]);
    assert!(out.contains("Entry #2 updated"));

    let listed = run_ok(&db_path, &["entry", "list", "E1", "--period", "2025-03"]);
    assert!(listed.contains("edited (was 14:00)"), "listing was:\n{listed}");

    run_ok(&db_path, &["entry", "del", "2"]);

    let active = run_ok(&db_path, &["entry", "list", "E1", "--period", "2025-03"]);
    assert!(!active.contains("eliminated"));

    let all = run_ok(&db_path, &["entry", "list", "E1", "--period", "2025-03", "--all"]);
    assert!(all.contains("eliminated"));
}

#[test]
fn test_request_approval_flow() {
    let db_path = init_cli_db("cli_requests");

    run_ok(&db_path, &["punch", "E1", "in", "--at", "2025-03-03 08:00"]);
    let out = run_ok(
        &db_path,
        &[
            "--as",
            "employee:E1",
            "request",
            "time",
            "E1",
            "out",
            "--at",
            "2025-03-03 15:00",
            "--comment",
            "forgot",
        ],
    );
    assert!(out.contains("Time request #1 submitted"));

    pcl()
        .args([
            "--db",
            &db_path,
            "--test",
            "--as",
            "employee:E1",
            "request",
            "approve",
            "time",
            "1",
        ])
        .assert()
        .failure()
        .stderr(contains("Not allowed"));

    let listed = run_ok(&db_path, &["request", "list", "--status", "pending"]);
    assert!(listed.contains("forgot"));

    let approved = run_ok(&db_path, &["request", "approve", "time", "1"]);
    assert!(approved.contains("approved"));

    let status = run_ok(&db_path, &["status", "E1", "--json"]);
    assert!(status.contains("\"idle\""), "status was:\n{status}");
}

#[test]
fn test_employee_scoping_from_cli() {
    let db_path = init_cli_db("cli_scoping");

    let all = run_ok(&db_path, &["employee", "list", "--json"]);
    assert!(all.contains("\"E1\"") && all.contains("\"E2\""));

    let own = run_ok(&db_path, &["--as", "employee:E2", "employee", "list", "--json"]);
    assert!(own.contains("\"E2\""));
    assert!(!own.contains("\"E1\""));

    let center = run_ok(&db_path, &["--as", "center:Bilbao", "employee", "list"]);
    assert!(center.contains("Luis Gil"));
    assert!(!center.contains("Ana Ruiz"));
}

#[test]
fn test_official_report_with_holiday() {
    let db_path = init_cli_db("cli_official");

    run_ok(&db_path, &["holiday", "add", "2025-03-04", "Fiesta local", "--center", "Madrid"]);
    run_ok(&db_path, &["punch", "E1", "in", "--at", "2025-03-03 08:00"]);
    run_ok(&db_path, &["punch", "E1", "out", "--at", "2025-03-03 14:00"]);

    let out = run_ok(
        &db_path,
        &["report", "official", "E1", "--period", "2025-03-03:2025-03-04"],
    );
    assert!(out.contains("Fiesta local"));
    assert!(out.contains("6:00"));

    let holidays = run_ok(&db_path, &["holiday", "list", "--period", "2025"]);
    assert!(holidays.contains("Fiesta local"));
}

#[test]
fn test_internal_log_records_writes() {
    let db_path = init_cli_db("cli_log");

    run_ok(&db_path, &["punch", "E1", "in", "--at", "2025-03-03 08:00"]);

    let log = run_ok(&db_path, &["log", "--print"]);
    assert!(log.contains("init"));
    assert!(log.contains("employee_add"));
    assert!(log.contains("clock_in at 2025-03-03 08:00:00"));

    let only = run_ok(&db_path, &["log", "--op", "punch"]);
    assert!(only.contains("punch"));
    assert!(!only.contains("employee_add"));
}

#[test]
fn test_config_print_in_test_mode() {
    let db_path = setup_test_db("cli_config_print");

    pcl()
        .args(["--db", &db_path, "--test", "config", "--print"])
        .assert()
        .success()
        .stdout(contains("dangling_policy: clamp").and(contains("hours_limit")));
}

#[test]
fn test_invalid_identity_is_reported() {
    let db_path = init_cli_db("cli_bad_identity");

    pcl()
        .args(["--db", &db_path, "--test", "--as", "boss:1", "employee", "list"])
        .assert()
        .failure()
        .stderr(contains("Invalid user"));
}
