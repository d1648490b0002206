//! Expansion of stored events into occurrences.

use chrono::{TimeDelta, TimeZone, Utc};

use agenda_test::calendar::expand::{expand, expand_all};
use agenda_test::calendar::model::validate_records;
use agenda_test::calendar::window::TimeWindow;
use agenda_test::core::types::RecurrenceType;

use super::helpers::*;

// ============================================================================
// Single events
// ============================================================================

/// ## Summary
/// A non-recurring event yields one occurrence exactly when its span touches
/// the window, edges included.
#[test_log::test]
fn non_recurring_event_contained_iff_overlapping() {
    let event = hour_event("single", utc(2024, 3, 10, 9, 0));
    let cases = [
        (utc(2024, 3, 1, 0, 0), utc(2024, 3, 31, 0, 0), true),
        (utc(2024, 3, 10, 10, 0), utc(2024, 3, 11, 0, 0), true),
        (utc(2024, 3, 9, 0, 0), utc(2024, 3, 10, 9, 0), true),
        (utc(2024, 3, 10, 9, 30), utc(2024, 3, 10, 9, 45), true),
        (utc(2024, 3, 10, 10, 1), utc(2024, 3, 12, 0, 0), false),
        (utc(2024, 3, 1, 0, 0), utc(2024, 3, 10, 8, 59), false),
    ];

    for (from, to, expected) in cases {
        let window = TimeWindow::new(from, to).unwrap();
        let occurrences = expand(&event, &window);
        assert_eq!(
            occurrences.len(),
            usize::from(expected),
            "window {from} .. {to}"
        );
        if let Some(occ) = occurrences.first() {
            assert!(!occ.is_generated);
            assert_eq!(occ.id.to_string(), "single");
            assert_eq!(occ.start_time, event.start_time);
            assert_eq!(occ.end_time, event.end_time);
        }
    }
}

// ============================================================================
// Recurring events
// ============================================================================

/// ## Summary
/// Every generated occurrence keeps the source event's duration.
#[test_log::test]
fn generated_occurrences_preserve_duration() {
    let start = utc(2024, 1, 1, 22, 30);
    let event = agenda_test::calendar::model::Event::new(
        "late",
        OWNER,
        start,
        start + TimeDelta::minutes(150),
    )
    .unwrap()
    .with_recurrence(RecurrenceType::Daily, None);

    let occurrences = expand(&event, &days(date(2024, 1, 1), date(2024, 2, 15)));
    assert_eq!(occurrences.len(), 46);
    assert!(
        occurrences
            .iter()
            .all(|o| o.end_time - o.start_time == TimeDelta::minutes(150))
    );
    assert_eq!(
        occurrences.iter().filter(|o| o.is_generated).count(),
        45
    );
}

/// ## Summary
/// An unbounded daily rule never yields more than `N + 1` occurrences over a
/// window `N` days long.
#[test_log::test]
fn daily_expansion_is_bounded_by_window() {
    // Starting at midnight puts a repeat on both window edges.
    let event = recurring("daily", utc(2023, 6, 1, 0, 0), RecurrenceType::Daily, None);
    let from = utc(2024, 2, 1, 0, 0);

    for n in 1..=40 {
        let window = TimeWindow::new(from, from + TimeDelta::days(n)).unwrap();
        let count = expand(&event, &window).len();
        assert_eq!(count, usize::try_from(n + 1).unwrap(), "window of {n} days");
    }
}

/// ## Summary
/// Monthly repeats clamp to the end of short months and keep the clamped day
/// from then on.
#[test_log::test]
fn monthly_series_drifts_sequentially() {
    let leap = recurring("leap", utc(2024, 1, 31, 8, 0), RecurrenceType::Monthly, None);
    let occurrences = expand(&leap, &days(date(2024, 1, 1), date(2024, 4, 30)));
    assert_eq!(
        start_dates(&occurrences),
        vec!["2024-01-31", "2024-02-29", "2024-03-29", "2024-04-29"]
    );

    let plain = recurring("plain", utc(2023, 1, 31, 8, 0), RecurrenceType::Monthly, None);
    let occurrences = expand(&plain, &days(date(2023, 1, 1), date(2023, 3, 31)));
    assert_eq!(
        start_dates(&occurrences),
        vec!["2023-01-31", "2023-02-28", "2023-03-28"]
    );
}

/// ## Summary
/// A yearly series started on Feb 29 settles on Feb 28.
#[test_log::test]
fn yearly_series_from_leap_day() {
    let event = recurring("leap-day", utc(2024, 2, 29, 12, 0), RecurrenceType::Yearly, None);
    let occurrences = expand(&event, &days(date(2024, 1, 1), date(2028, 12, 31)));
    assert_eq!(
        start_dates(&occurrences),
        vec![
            "2024-02-29",
            "2025-02-28",
            "2026-02-28",
            "2027-02-28",
            "2028-02-28"
        ]
    );
}

/// ## Summary
/// Repeats of a series that began before the window still appear even though
/// the original instance does not.
#[test_log::test]
fn series_started_before_window() {
    let event = recurring("old", utc(2020, 1, 6, 9, 0), RecurrenceType::Weekly, None);
    let occurrences = expand(&event, &days(date(2024, 1, 1), date(2024, 1, 14)));
    assert_eq!(start_dates(&occurrences), vec!["2024-01-01", "2024-01-08"]);
    assert!(occurrences.iter().all(|o| o.is_generated));
}

/// ## Summary
/// A recurrence end before the first repeat leaves only the original.
#[test_log::test]
fn recurrence_end_before_first_repeat() {
    let event = recurring(
        "short",
        utc(2024, 1, 1, 9, 0),
        RecurrenceType::Daily,
        Some(utc(2023, 12, 1, 0, 0)),
    );
    let occurrences = expand(&event, &days(date(2024, 1, 1), date(2024, 1, 31)));
    assert_eq!(occurrences.len(), 1);
    assert!(!occurrences[0].is_generated);
}

// ============================================================================
// Stored records
// ============================================================================

/// ## Summary
/// The weekly `E1` series ending 2024-01-22 yields four occurrences in
/// January, the last one on the end date itself.
#[test_log::test]
fn weekly_series_with_recurrence_end() {
    let events = validate_records(records(
        r#"[{"id": "E1", "ownerId": 1,
             "startTime": "2024-01-01T10:00:00Z", "endTime": "2024-01-01T11:00:00Z",
             "recurrenceType": "weekly", "recurrenceEnd": "2024-01-22T00:00:00Z"}]"#,
    ));
    assert_eq!(events.len(), 1);

    let occurrences = expand(&events[0], &days(date(2024, 1, 1), date(2024, 1, 31)));
    assert_eq!(
        start_dates(&occurrences),
        vec!["2024-01-01", "2024-01-08", "2024-01-15", "2024-01-22"]
    );

    let ids: Vec<String> = occurrences.iter().map(|o| o.id.to_string()).collect();
    let jan_8 = Utc.with_ymd_and_hms(2024, 1, 8, 10, 0, 0).unwrap();
    assert_eq!(ids[0], "E1");
    assert_eq!(
        ids[1],
        format!("E1-recurrence-{}", jan_8.timestamp_millis())
    );
    assert!(occurrences.iter().all(|o| o.end_time - o.start_time == TimeDelta::hours(1)));
}

/// ## Summary
/// A bad record is skipped while the rest of the batch still expands, and an
/// unknown recurrence type degrades to a single instance.
#[test_log::test]
fn bad_records_do_not_abort_batch() {
    let events = validate_records(records(
        r#"[
            {"id": "ok", "ownerId": 1, "startTime": "2024-01-02T10:00:00Z",
             "endTime": "2024-01-02T11:00:00Z", "recurrenceType": "daily"},
            {"id": "no-end", "ownerId": 1, "startTime": "2024-01-02T10:00:00Z"},
            {"id": "odd", "ownerId": 1, "startTime": "2024-01-03T10:00:00Z",
             "endTime": "2024-01-03T11:00:00Z", "recurrenceType": "fortnightly"},
            {"ownerId": 1, "startTime": "2024-01-03T10:00:00Z",
             "endTime": "2024-01-03T11:00:00Z"}
        ]"#,
    ));
    let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["ok", "odd"]);

    let occurrences = expand_all(&events, &days(date(2024, 1, 1), date(2024, 1, 4)));
    let odd: Vec<_> = occurrences
        .iter()
        .filter(|o| o.source_event_id().as_str() == "odd")
        .collect();
    assert_eq!(odd.len(), 1);
    assert_eq!(occurrences.len(), 4);
    assert!(
        occurrences
            .windows(2)
            .all(|pair| pair[0].start_time <= pair[1].start_time)
    );
}
