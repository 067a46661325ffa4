mod common;
use chrono::NaiveDate;
use common::{company, memory_pool, test_config, ts};
use punchclock::core::calculator::session::PunchState;
use punchclock::core::changes::{ChangeEvent, ChangeListener, SummaryCache, Table};
use punchclock::core::edit::{EditLogic, EntryChanges};
use punchclock::core::employees::{EmployeeLogic, HolidayLogic};
use punchclock::core::overview::OverviewLogic;
use punchclock::core::punch::{PunchInput, PunchLogic};
use punchclock::core::reports::ReportLogic;
use punchclock::core::requests::RequestLogic;
use punchclock::db::log::load_log;
use punchclock::db::pool::DbPool;
use punchclock::db::queries::insert_entry;
use punchclock::db::requests::insert_time_request;
use punchclock::errors::AppError;
use punchclock::models::change_tag::ChangeTag;
use punchclock::models::current_user::CurrentUser;
use punchclock::models::entry_type::EntryType;
use punchclock::models::request::{PlannerType, RequestKind, RequestStatus};
use punchclock::models::time_entry::TimeEntry;
use punchclock::models::time_type::TimeType;
use std::cell::RefCell;
use std::rc::Rc;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

fn user(s: &str) -> CurrentUser {
    CurrentUser::parse(s).expect("valid user")
}

fn punch(pool: &mut DbPool, emp: &str, kind: EntryType, at: &str) {
    let cfg = test_config();
    PunchLogic::punch(pool, &cfg, &company(), &PunchInput::new(emp, kind, ts(at)))
        .unwrap_or_else(|e| panic!("{} {:?} at {}: {}", emp, kind, at, e));
}

#[test]
fn test_self_service_punch_cycle() {
    let mut pool = memory_pool();
    let cfg = test_config();
    let me = user("employee:E1");

    let first = PunchLogic::punch(
        &mut pool,
        &cfg,
        &me,
        &PunchInput::new("E1", EntryType::ClockIn, ts("2025-03-03 08:00")),
    )
    .expect("clock in");
    assert!(first.id > 0);
    assert_eq!(first.time_type, Some(TimeType::Turno));
    assert_eq!(first.work_center.as_deref(), Some("Madrid"));

    punch(&mut pool, "E1", EntryType::BreakStart, "2025-03-03 12:00");

    let status = PunchLogic::status(&pool, &me, "E1", ts("2025-03-03 12:30")).expect("status");
    assert_eq!(status.state, PunchState::Paused);
    assert_eq!(status.work_center.as_deref(), Some("Madrid"));

    punch(&mut pool, "E1", EntryType::BreakEnd, "2025-03-03 13:00");
    punch(&mut pool, "E1", EntryType::ClockOut, "2025-03-03 17:00");

    let report = ReportLogic::daily(
        &pool,
        &cfg,
        &me,
        day("2025-03-01"),
        day("2025-03-31"),
        ts("2025-04-01 00:00"),
    )
    .expect("daily report");
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].worked_minutes, 480);
    assert_eq!(report.rows[0].break_minutes, 60);
    assert_eq!(report.rows[0].days_worked, 1);
}

#[test]
fn test_punch_out_of_sequence_is_rejected() {
    let mut pool = memory_pool();
    let cfg = test_config();

    let err = PunchLogic::punch(
        &mut pool,
        &cfg,
        &company(),
        &PunchInput::new("E1", EntryType::ClockOut, ts("2025-03-03 17:00")),
    )
    .expect_err("clock out while idle");
    assert!(matches!(err, AppError::InvalidPunch(_)));

    punch(&mut pool, "E1", EntryType::ClockIn, "2025-03-03 08:00");
    let err = PunchLogic::punch(
        &mut pool,
        &cfg,
        &company(),
        &PunchInput::new("E1", EntryType::BreakEnd, ts("2025-03-03 09:00")),
    )
    .expect_err("resume while working");
    assert!(matches!(err, AppError::InvalidPunch(_)));
}

#[test]
fn test_clock_in_requires_center_when_ambiguous() {
    let mut pool = memory_pool();
    let cfg = test_config();

    let input = PunchInput::new("E2", EntryType::ClockIn, ts("2025-03-03 08:00"));
    let err = PunchLogic::punch(&mut pool, &cfg, &company(), &input).expect_err("ambiguous");
    assert!(matches!(err, AppError::WorkCenterRequired(_)));

    let wrong = PunchInput {
        work_center: Some("Sevilla".to_string()),
        ..input.clone()
    };
    let err = PunchLogic::punch(&mut pool, &cfg, &company(), &wrong).expect_err("not assigned");
    assert!(matches!(err, AppError::WorkCenterRequired(_)));

    let ok = PunchInput {
        work_center: Some("Bilbao".to_string()),
        time_type: Some(TimeType::Coordinacion),
        ..input
    };
    let entry = PunchLogic::punch(&mut pool, &cfg, &company(), &ok).expect("clock in");
    assert_eq!(entry.work_center.as_deref(), Some("Bilbao"));
    assert_eq!(entry.time_type, Some(TimeType::Coordinacion));
}

#[test]
fn test_manual_entry_needs_clock_in_same_day() {
    let mut pool = memory_pool();
    let cfg = test_config();

    let out = PunchInput::new("E1", EntryType::ClockOut, ts("2025-03-04 17:00"));
    let err = PunchLogic::add_entry(&mut pool, &cfg, &company(), &out).expect_err("no clock in");
    assert!(matches!(err, AppError::NoActiveSession(_)));

    let inp = PunchInput::new("E1", EntryType::ClockIn, ts("2025-03-04 09:00"));
    PunchLogic::add_entry(&mut pool, &cfg, &company(), &inp).expect("clock in");
    let saved = PunchLogic::add_entry(&mut pool, &cfg, &company(), &out).expect("clock out");

    assert_eq!(saved.time_type, None);
    assert_eq!(saved.work_center, None);
}

#[test]
fn test_edit_keeps_first_original_timestamp() {
    let mut pool = memory_pool();
    let cfg = test_config();
    punch(&mut pool, "E1", EntryType::ClockIn, "2025-03-03 08:00");
    punch(&mut pool, "E1", EntryType::ClockOut, "2025-03-03 16:00");

    let entries = EditLogic::list(
        &pool,
        &company(),
        "E1",
        day("2025-03-03"),
        day("2025-03-03"),
        false,
    )
    .expect("list");
    let out_id = entries[1].id;

    let first = EntryChanges {
        timestamp: Some(ts("2025-03-03 16:30")),
        ..EntryChanges::default()
    };
    let edited = EditLogic::edit(&mut pool, &cfg, &company(), out_id, &first).expect("edit");
    assert_eq!(edited.changes, Some(ChangeTag::Edited));
    assert_eq!(edited.original_timestamp, Some(ts("2025-03-03 16:00")));

    let second = EntryChanges {
        timestamp: Some(ts("2025-03-03 17:00")),
        ..EntryChanges::default()
    };
    let edited = EditLogic::edit(&mut pool, &cfg, &company(), out_id, &second).expect("edit");
    assert_eq!(edited.timestamp, ts("2025-03-03 17:00"));
    assert_eq!(edited.original_timestamp, Some(ts("2025-03-03 16:00")));

    let moved = EntryChanges {
        timestamp: Some(ts("2025-03-05 17:00")),
        ..EntryChanges::default()
    };
    let err = EditLogic::edit(&mut pool, &cfg, &company(), out_id, &moved)
        .expect_err("no clock in");
    assert!(matches!(err, AppError::NoActiveSession(_)));
}

#[test]
fn test_soft_delete_hides_entry_from_totals() {
    let mut pool = memory_pool();
    let cfg = test_config();
    punch(&mut pool, "E1", EntryType::ClockIn, "2025-03-03 08:00");
    punch(&mut pool, "E1", EntryType::ClockOut, "2025-03-03 12:00");

    let entries = EditLogic::list(
        &pool,
        &company(),
        "E1",
        day("2025-03-03"),
        day("2025-03-03"),
        false,
    )
    .expect("list");
    let deleted = EditLogic::delete(&mut pool, &company(), entries[1].id).expect("delete");
    assert!(!deleted.is_active);
    assert_eq!(deleted.changes, Some(ChangeTag::Eliminated));

    let active = EditLogic::list(
        &pool,
        &company(),
        "E1",
        day("2025-03-03"),
        day("2025-03-03"),
        false,
    )
    .expect("list");
    let all = EditLogic::list(&pool, &company(), "E1", day("2025-03-03"), day("2025-03-03"), true)
        .expect("list all");
    assert_eq!(active.len(), 1);
    assert_eq!(all.len(), 2);

    let err = EditLogic::delete(&mut pool, &company(), entries[1].id).expect_err("already deleted");
    assert!(matches!(err, AppError::EntryNotFound(_)));

    let report = ReportLogic::daily(
        &pool,
        &cfg,
        &company(),
        day("2025-03-03"),
        day("2025-03-03"),
        ts("2025-03-10 00:00"),
    )
    .expect("report");
    let e1 = report.rows.iter().find(|r| r.employee_id == "E1").expect("E1 row");
    // dangling clock-in clamped to the end of its day
    assert_eq!(e1.worked_minutes, 16 * 60);
}

#[test]
fn test_scoping_by_role() {
    let pool = memory_pool();

    let ids = |u: &str| -> Vec<String> {
        EmployeeLogic::list(&pool, &user(u))
            .expect("list")
            .into_iter()
            .map(|e| e.id)
            .collect()
    };

    assert_eq!(ids("company:acme"), vec!["E1", "E2"]);
    assert_eq!(ids("inspector:acme"), vec!["E1", "E2"]);
    assert_eq!(ids("employee:E2"), vec!["E2"]);
    assert_eq!(ids("delegation:Norte"), vec!["E1"]);
    assert_eq!(ids("center:Bilbao"), vec!["E2"]);
    assert!(ids("company:other").is_empty());

    let err = PunchLogic::status(&pool, &user("employee:E2"), "E1", ts("2025-03-03 08:00"))
        .expect_err("not visible");
    assert!(matches!(err, AppError::EmployeeNotFound(_)));
}

#[test]
fn test_inspector_cannot_write() {
    let mut pool = memory_pool();
    let cfg = test_config();

    let err = PunchLogic::punch(
        &mut pool,
        &cfg,
        &user("inspector:acme"),
        &PunchInput::new("E1", EntryType::ClockIn, ts("2025-03-03 08:00")),
    )
    .expect_err("read only");
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[test]
fn test_deactivated_employee_disappears() {
    let mut pool = memory_pool();
    EmployeeLogic::deactivate(&mut pool, &company(), "E2").expect("deactivate");

    let listed = EmployeeLogic::list(&pool, &company()).expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "E1");
}

#[test]
fn test_time_request_approval_inserts_entry() {
    let mut pool = memory_pool();
    let cfg = test_config();
    let me = user("employee:E1");
    punch(&mut pool, "E1", EntryType::ClockIn, "2025-03-03 08:00");

    let id = RequestLogic::submit_time(
        &mut pool,
        &me,
        "E1",
        ts("2025-03-03 15:00"),
        EntryType::ClockOut,
        None,
        "forgot to clock out",
    )
    .expect("submit");

    let err = RequestLogic::approve(&mut pool, &cfg, &me, RequestKind::Time, id)
        .expect_err("employees cannot approve");
    assert!(matches!(err, AppError::Forbidden(_)));

    let entry = RequestLogic::approve(&mut pool, &cfg, &company(), RequestKind::Time, id)
        .expect("approve")
        .expect("entry inserted");
    assert_eq!(entry.entry_type, EntryType::ClockOut);
    assert_eq!(entry.timestamp, ts("2025-03-03 15:00"));

    let approved = RequestLogic::list_time(&pool, &me, Some(RequestStatus::Approved))
        .expect("list");
    assert_eq!(approved.len(), 1);

    let err = RequestLogic::reject(&mut pool, &company(), RequestKind::Time, id)
        .expect_err("already resolved");
    assert!(matches!(err, AppError::RequestAlreadyResolved(_)));

    let report = ReportLogic::daily(
        &pool,
        &cfg,
        &me,
        day("2025-03-03"),
        day("2025-03-03"),
        ts("2025-03-10 00:00"),
    )
    .expect("report");
    assert_eq!(report.rows[0].worked_minutes, 7 * 60);
}

#[test]
fn test_time_request_without_clock_in_cannot_be_approved() {
    let mut pool = memory_pool();
    let cfg = test_config();

    let id = RequestLogic::submit_time(
        &mut pool,
        &company(),
        "E1",
        ts("2025-03-03 15:00"),
        EntryType::ClockOut,
        None,
        "",
    )
    .expect("submit");

    let err = RequestLogic::approve(&mut pool, &cfg, &company(), RequestKind::Time, id)
        .expect_err("no clock in");
    assert!(matches!(err, AppError::NoActiveSession(_)));

    let pending = RequestLogic::list_time(&pool, &company(), Some(RequestStatus::Pending))
        .expect("list");
    assert_eq!(pending.len(), 1);
}

#[test]
fn test_clock_in_request_records_work_center() {
    let mut pool = memory_pool();
    let cfg = test_config();
    let me = user("employee:E2");

    let err = RequestLogic::submit_time(
        &mut pool,
        &me,
        "E2",
        ts("2025-03-04 08:00"),
        EntryType::ClockIn,
        None,
        "",
    )
    .expect_err("E2 works at two centers");
    assert!(matches!(err, AppError::WorkCenterRequired(_)));

    let id = RequestLogic::submit_time(
        &mut pool,
        &me,
        "E2",
        ts("2025-03-04 08:00"),
        EntryType::ClockIn,
        Some("Bilbao"),
        "badge reader down",
    )
    .expect("submit");

    let entry = RequestLogic::approve(&mut pool, &cfg, &company(), RequestKind::Time, id)
        .expect("approve")
        .expect("entry inserted");
    assert_eq!(entry.entry_type, EntryType::ClockIn);
    assert_eq!(entry.work_center.as_deref(), Some("Bilbao"));
    assert_eq!(entry.time_type, Some(cfg.default_time_type));
}

#[test]
fn test_clock_in_request_without_center_is_not_approved() {
    let mut pool = memory_pool();
    let cfg = test_config();

    // row written before requests carried a center
    let id = insert_time_request(
        &pool.conn,
        "E2",
        &ts("2025-03-04 08:00"),
        EntryType::ClockIn,
        None,
        "",
    )
    .expect("insert");

    let err = RequestLogic::approve(&mut pool, &cfg, &company(), RequestKind::Time, id)
        .expect_err("center is ambiguous");
    assert!(matches!(err, AppError::WorkCenterRequired(_)));

    let pending = RequestLogic::list_time(&pool, &company(), Some(RequestStatus::Pending))
        .expect("list");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].work_center, None);
}

#[test]
fn test_planner_requests() {
    let mut pool = memory_pool();
    let me = user("employee:E2");

    let err = RequestLogic::submit_planner(
        &mut pool,
        &me,
        "E2",
        PlannerType::Vacation,
        day("2025-08-10"),
        day("2025-08-01"),
        "",
    )
    .expect_err("inverted range");
    assert!(matches!(err, AppError::InvalidRange(_)));

    let id = RequestLogic::submit_planner(
        &mut pool,
        &me,
        "E2",
        PlannerType::Vacation,
        day("2025-08-01"),
        day("2025-08-10"),
        "summer",
    )
    .expect("submit");

    RequestLogic::reject(&mut pool, &user("center:Bilbao"), RequestKind::Planner, id)
        .expect("reject");

    let listed = RequestLogic::list_planner(&pool, &me, None).expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, RequestStatus::Rejected);
    assert_eq!(listed[0].planner_type, PlannerType::Vacation);

    // E1 sees nothing of E2's requests
    let other = RequestLogic::list_planner(&pool, &user("employee:E1"), None).expect("list");
    assert!(other.is_empty());
}

#[test]
fn test_official_report_flags_holidays() {
    let mut pool = memory_pool();
    let cfg = test_config();

    HolidayLogic::add(&mut pool, &company(), day("2025-03-04"), "Local", Some("Madrid"))
        .expect("holiday");
    HolidayLogic::add(&mut pool, &company(), day("2025-03-05"), "Bilbao only", Some("Bilbao"))
        .expect("holiday");

    punch(&mut pool, "E1", EntryType::ClockIn, "2025-03-03 08:00");
    punch(&mut pool, "E1", EntryType::BreakStart, "2025-03-03 11:00");
    punch(&mut pool, "E1", EntryType::BreakEnd, "2025-03-03 11:30");
    punch(&mut pool, "E1", EntryType::ClockOut, "2025-03-03 15:00");

    let report = ReportLogic::official(
        &pool,
        &cfg,
        &company(),
        "E1",
        day("2025-03-03"),
        day("2025-03-05"),
        ts("2025-03-10 00:00"),
    )
    .expect("official");

    assert_eq!(report.days.len(), 3);
    assert_eq!(report.days[0].first_clock_in.as_deref(), Some("08:00"));
    assert_eq!(report.days[0].last_clock_out.as_deref(), Some("15:00"));
    assert_eq!(report.days[0].break_minutes, 30);
    assert_eq!(report.days[0].worked_minutes, 390);
    assert_eq!(report.days[1].holiday.as_deref(), Some("Local"));
    assert_eq!(report.days[2].holiday, None);
    assert_eq!(report.total_worked_minutes, 390);
}

#[test]
fn test_alarms_and_annual_reports() {
    let mut pool = memory_pool();
    let cfg = test_config();

    punch(&mut pool, "E1", EntryType::ClockIn, "2025-03-03 08:00");
    punch(&mut pool, "E1", EntryType::ClockOut, "2025-03-03 16:30");

    let report = ReportLogic::alarms(
        &pool,
        &cfg,
        &company(),
        day("2025-03-03"),
        day("2025-03-03"),
        Some(8.0),
        ts("2025-03-10 00:00"),
    )
    .expect("alarms");
    assert_eq!(report.alarms.len(), 1);
    assert_eq!(report.alarms[0].employee_id, "E1");
    assert_eq!(report.alarms[0].excess_minutes, 30);

    let annual = ReportLogic::annual(&pool, &cfg, &company(), 2025, ts("2026-01-01 00:00"))
        .expect("annual");
    let e1 = annual.rows.iter().find(|r| r.employee_id == "E1").expect("E1");
    assert_eq!(e1.months[2], 510);
    assert_eq!(e1.total_minutes, 510);
}

#[derive(Default)]
struct Recorder {
    seen: RefCell<Vec<ChangeEvent>>,
}

impl ChangeListener for Recorder {
    fn on_change(&self, event: &ChangeEvent) {
        self.seen.borrow_mut().push(event.clone());
    }
}

#[test]
fn test_writes_publish_change_events() {
    let mut pool = memory_pool();
    let recorder = Rc::new(Recorder::default());
    pool.feed.subscribe(recorder.clone());

    punch(&mut pool, "E1", EntryType::ClockIn, "2025-03-03 08:00");
    HolidayLogic::add(&mut pool, &company(), day("2025-03-04"), "Fiesta", None).expect("holiday");

    let seen = recorder.seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], ChangeEvent::new(Table::TimeEntries, Some("E1")));
    assert_eq!(seen[1].table, Table::Holidays);
    assert_eq!(seen[1].employee_id, None);
}

#[test]
fn test_summary_cache_is_invalidated_by_new_punches() {
    let mut pool = memory_pool();
    let cfg = test_config();
    let cache = SummaryCache::new();
    pool.feed.subscribe(cache.clone());

    let range = (day("2025-03-01"), day("2025-03-31"));
    let now = ts("2025-04-01 00:00");

    punch(&mut pool, "E1", EntryType::ClockIn, "2025-03-03 08:00");
    punch(&mut pool, "E1", EntryType::ClockOut, "2025-03-03 10:00");

    let rows = OverviewLogic::build(&pool, &cfg, &company(), range, now, &cache).expect("overview");
    assert_eq!(rows[0].period_minutes, 120);
    assert_eq!(cache.len(), 2);

    punch(&mut pool, "E1", EntryType::ClockIn, "2025-03-04 08:00");
    punch(&mut pool, "E1", EntryType::ClockOut, "2025-03-04 09:00");
    assert_eq!(cache.len(), 1, "E1 entries dropped, E2 kept");

    let rows = OverviewLogic::build(&pool, &cfg, &company(), range, now, &cache).expect("overview");
    assert_eq!(rows[0].employee_id, "E1");
    assert_eq!(rows[0].period_minutes, 180);
    assert_eq!(rows[0].state, PunchState::Idle);

    cache.on_change(&ChangeEvent::new(Table::TimeEntries, None));
    assert!(cache.is_empty());
}

#[test]
fn test_overview_cache_follows_as_of_instant() {
    let mut pool = memory_pool();
    let cfg = test_config();
    let cache = SummaryCache::new();
    pool.feed.subscribe(cache.clone());

    let range = (day("2025-03-01"), day("2025-03-31"));
    punch(&mut pool, "E1", EntryType::ClockIn, "2025-03-03 08:00");

    // open session: the total grows with `now` even without writes
    let rows = OverviewLogic::build(&pool, &cfg, &company(), range, ts("2025-03-03 10:00"), &cache)
        .expect("overview");
    assert_eq!(rows[0].period_minutes, 120);

    let rows = OverviewLogic::build(&pool, &cfg, &company(), range, ts("2025-03-03 12:00"), &cache)
        .expect("overview");
    assert_eq!(rows[0].period_minutes, 240);
    assert_eq!(rows[0].state, PunchState::Working);

    // a finished period is reused whatever the current instant
    punch(&mut pool, "E1", EntryType::ClockOut, "2025-03-03 16:00");
    cache.clear();

    let later = OverviewLogic::build(&pool, &cfg, &company(), range, ts("2025-04-02 09:00"), &cache)
        .expect("overview");
    assert_eq!(later[0].period_minutes, 8 * 60);
    assert_eq!(cache.len(), 2);

    let much_later =
        OverviewLogic::build(&pool, &cfg, &company(), range, ts("2025-06-01 09:00"), &cache)
            .expect("overview");
    assert_eq!(much_later[0].period_minutes, 8 * 60);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_entries_must_reference_an_employee() {
    let pool = memory_pool();

    let orphan = TimeEntry::new("NOBODY", EntryType::ClockIn, ts("2025-03-03 08:00"));
    assert!(insert_entry(&pool.conn, &orphan).is_err());

    let known = TimeEntry::new("E1", EntryType::ClockIn, ts("2025-03-03 08:00"));
    assert!(insert_entry(&pool.conn, &known).is_ok());

    let added = load_log(&pool.conn, Some("employee_add")).expect("log");
    let targets: Vec<&str> = added.iter().map(|r| r.target.as_str()).collect();
    assert_eq!(targets, vec!["E1", "E2"]);
}
