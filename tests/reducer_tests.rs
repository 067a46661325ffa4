mod common;
use chrono::TimeDelta;
use common::{break_end, break_start, clock_in, clock_out, ts};
use punchclock::core::calculator::buckets::{AsOfPolicy, annual_by_month};
use punchclock::core::calculator::reducer::compute_worked_duration;
use punchclock::models::duration_result::DurationResult;
use punchclock::models::time_entry::TimeEntry;

fn minutes(n: i64) -> TimeDelta {
    TimeDelta::minutes(n)
}

#[test]
fn test_in_out_without_breaks_is_exact_difference() {
    let entries = vec![clock_in("2025-03-03 09:00"), clock_out("2025-03-03 17:15")];
    let r = compute_worked_duration(&entries, ts("2025-03-03 23:00"));

    assert_eq!(r.worked, minutes(8 * 60 + 15));
    assert_eq!(r.breaks, TimeDelta::zero());
    assert_eq!(r.first_clock_in, Some(ts("2025-03-03 09:00")));
    assert_eq!(r.last_clock_out, Some(ts("2025-03-03 17:15")));
    assert!(!r.open_session);
}

#[test]
fn test_break_is_excluded() {
    let entries = vec![
        clock_in("2025-03-03 08:00"),
        break_start("2025-03-03 12:00"),
        break_end("2025-03-03 13:00"),
        clock_out("2025-03-03 17:00"),
    ];
    let r = compute_worked_duration(&entries, ts("2025-03-03 23:00"));

    assert_eq!(r.worked, minutes(8 * 60));
    assert_eq!(r.breaks, minutes(60));
}

#[test]
fn test_general_break_formula() {
    // (t1 - t0) + (t3 - t2)
    let entries = vec![
        clock_in("2025-03-03 07:10"),
        break_start("2025-03-03 10:25"),
        break_end("2025-03-03 10:55"),
        clock_out("2025-03-03 15:40"),
    ];
    let r = compute_worked_duration(&entries, ts("2025-03-04 00:00"));

    assert_eq!(r.worked, minutes(195) + minutes(285));
}

#[test]
fn test_empty_input_is_zero() {
    let r = compute_worked_duration(&[], ts("2025-03-03 12:00"));
    assert_eq!(r, DurationResult::default());
    assert!(r.is_empty());
}

#[test]
fn test_open_clock_in_credits_until_as_of() {
    let entries = vec![clock_in("2025-03-03 08:00")];
    let r = compute_worked_duration(&entries, ts("2025-03-03 10:00"));

    assert_eq!(r.worked, minutes(120));
    assert!(r.open_session);
}

#[test]
fn test_as_of_before_open_clock_in_credits_nothing() {
    let entries = vec![clock_in("2025-03-03 08:00")];
    let r = compute_worked_duration(&entries, ts("2025-03-03 07:00"));
    assert_eq!(r.worked, TimeDelta::zero());
}

#[test]
fn test_single_break_end_is_zero() {
    let entries = vec![break_end("2025-03-03 13:00")];
    let r = compute_worked_duration(&entries, ts("2025-03-03 13:00"));

    assert_eq!(r.worked, TimeDelta::zero());
    assert_eq!(r.breaks, TimeDelta::zero());
}

#[test]
fn test_break_end_after_clock_out_resumes_accrual() {
    // break_start never punched: the afternoon still counts
    let entries = vec![
        clock_in("2025-03-03 08:00"),
        clock_out("2025-03-03 12:00"),
        break_end("2025-03-03 13:00"),
        clock_out("2025-03-03 17:00"),
    ];
    let r = compute_worked_duration(&entries, ts("2025-03-03 17:00"));

    assert_eq!(r.worked, minutes(8 * 60));
    assert_eq!(r.breaks, TimeDelta::zero());
    assert!(!r.open_session);
}

#[test]
fn test_break_end_inside_session_restarts_accrual() {
    let entries = vec![
        clock_in("2025-03-03 08:00"),
        break_end("2025-03-03 10:00"),
        clock_out("2025-03-03 12:00"),
    ];
    let r = compute_worked_duration(&entries, ts("2025-03-03 23:00"));

    assert_eq!(r.worked, minutes(2 * 60));
    assert_eq!(r.breaks, TimeDelta::zero());
}

#[test]
fn test_unmatched_break_end_dangles_until_as_of() {
    let entries = vec![break_end("2025-03-03 13:00")];
    let r = compute_worked_duration(&entries, ts("2025-03-03 15:30"));

    assert_eq!(r.worked, minutes(150));
    assert_eq!(r.breaks, TimeDelta::zero());
    assert!(r.open_session);
}

#[test]
fn test_clock_out_without_clock_in_is_zero() {
    let entries = vec![clock_out("2025-03-03 17:00")];
    let r = compute_worked_duration(&entries, ts("2025-03-03 18:00"));

    assert_eq!(r.worked, TimeDelta::zero());
    assert_eq!(r.last_clock_out, Some(ts("2025-03-03 17:00")));
}

#[test]
fn test_repeated_clock_in_latest_wins() {
    let entries = vec![
        clock_in("2025-03-03 08:00"),
        clock_in("2025-03-03 09:00"),
        clock_out("2025-03-03 12:00"),
    ];
    let r = compute_worked_duration(&entries, ts("2025-03-03 18:00"));

    assert_eq!(r.worked, minutes(180));
    assert_eq!(r.first_clock_in, Some(ts("2025-03-03 08:00")));
}

#[test]
fn test_open_break_at_end_credits_no_tail() {
    let entries = vec![clock_in("2025-03-03 08:00"), break_start("2025-03-03 10:00")];
    let r = compute_worked_duration(&entries, ts("2025-03-03 12:00"));

    assert_eq!(r.worked, minutes(120));
    assert!(r.on_break);
    assert!(!r.open_session);
}

#[test]
fn test_inactive_entries_are_ignored() {
    let mut deleted = clock_out("2025-03-03 10:00");
    deleted.is_active = false;

    let entries = vec![clock_in("2025-03-03 08:00"), deleted, clock_out("2025-03-03 12:00")];
    let r = compute_worked_duration(&entries, ts("2025-03-03 18:00"));

    assert_eq!(r.worked, minutes(240));
}

#[test]
fn test_order_of_input_does_not_matter() {
    let base = vec![
        clock_in("2025-03-03 08:00"),
        break_start("2025-03-03 11:00"),
        break_end("2025-03-03 11:20"),
        clock_out("2025-03-03 14:00"),
        clock_in("2025-03-03 15:00"),
        clock_out("2025-03-03 18:30"),
    ];
    let as_of = ts("2025-03-03 23:00");
    let expected = compute_worked_duration(&base, as_of);

    let mut reversed = base.clone();
    reversed.reverse();
    assert_eq!(compute_worked_duration(&reversed, as_of), expected);

    for k in 1..base.len() {
        let mut rotated = base.clone();
        rotated.rotate_left(k);
        assert_eq!(compute_worked_duration(&rotated, as_of), expected, "rotation {k}");
    }

    let interleaved: Vec<TimeEntry> = [5, 0, 3, 1, 4, 2].iter().map(|&i| base[i].clone()).collect();
    assert_eq!(compute_worked_duration(&interleaved, as_of), expected);
    assert_eq!(expected.worked, minutes(180 + 160 + 210));
}

#[test]
fn test_worked_never_negative() {
    let entries = vec![
        break_start("2025-03-03 09:00"),
        clock_out("2025-03-03 08:00"),
        break_end("2025-03-03 10:00"),
    ];
    let r = compute_worked_duration(&entries, ts("2025-03-03 07:00"));
    assert!(r.worked >= TimeDelta::zero());
}

#[test]
fn test_month_buckets_sum_to_year_fold() {
    let entries = vec![
        clock_in("2025-01-10 08:00"),
        clock_out("2025-01-10 16:00"),
        clock_in("2025-02-03 09:00"),
        break_start("2025-02-03 13:00"),
        break_end("2025-02-03 13:45"),
        clock_out("2025-02-03 18:00"),
        // session crossing a month boundary stays in its clock-in's month
        clock_in("2025-03-31 22:00"),
        clock_out("2025-04-01 02:00"),
        clock_in("2025-12-30 08:00"),
        clock_out("2025-12-30 12:30"),
    ];
    let as_of = ts("2026-01-15 00:00");

    let months = annual_by_month(&entries, 2025, AsOfPolicy::Fixed(as_of));
    let summed: DurationResult = months.iter().sum();
    let whole = compute_worked_duration(&entries, as_of);

    assert_eq!(summed.worked, whole.worked);
    assert_eq!(months[2].worked, minutes(240));
    assert_eq!(months[3].worked, TimeDelta::zero());
}

#[test]
fn test_duration_results_add_up() {
    let a = compute_worked_duration(
        &[clock_in("2025-03-03 08:00"), clock_out("2025-03-03 10:00")],
        ts("2025-03-03 23:00"),
    );
    let b = compute_worked_duration(
        &[clock_in("2025-03-04 09:00"), clock_out("2025-03-04 10:30")],
        ts("2025-03-04 23:00"),
    );

    let total = a + b;
    assert_eq!(total.worked, minutes(210));
    assert_eq!(total.first_clock_in, Some(ts("2025-03-03 08:00")));
    assert_eq!(total.last_clock_out, Some(ts("2025-03-04 10:30")));
    assert_eq!(total.worked_minutes(), 210);
    assert!((total.worked_hours() - 3.5).abs() < f64::EPSILON);
}
