//! File-backed queries through the service and report layers.

use std::path::PathBuf;

use chrono_tz::Tz;

use agenda_test::app::report::CalendarReport;
use agenda_test::calendar::model::OccurrenceId;
use agenda_test::calendar::view::{Direction, navigate};
use agenda_test::calendar::visibility::FilterOptions;
use agenda_test::core::types::{CalendarView, EventId};
use agenda_test::service::calendar::{Action, CalendarService};
use agenda_test::service::error::ServiceError;
use agenda_test::service::source::JsonFileSource;

use super::helpers::*;

const EVENTS: &str = r#"{
    "ownedEvents": [
        {"id": "E1", "ownerId": 1, "title": "Standup",
         "startTime": "2024-01-01T10:00:00Z", "endTime": "2024-01-01T11:00:00Z",
         "recurrenceType": "weekly", "recurrenceEnd": "2024-01-22T00:00:00Z"},
        {"id": 7, "ownerId": 1, "title": "Dentist", "priority": "HIGH",
         "startTime": "2024-01-17T14:00:00Z", "endTime": "2024-01-17T15:00:00Z"},
        {"id": "X", "ownerId": 1, "title": "Broken", "priority": "URGENT",
         "startTime": "2024-01-16T09:00:00Z", "endTime": "2024-01-16T10:00:00Z"}
    ],
    "sharedEvents": [
        {"id": "S1", "user": {"id": 2}, "title": "Team lunch", "priority": "LOW",
         "startTime": "2024-01-18T12:00:00Z", "endTime": "2024-01-18T13:00:00Z",
         "isShared": true, "sharedWith": [1], "userPermissions": {"1": "EDIT"}},
        {"id": "S2", "ownerId": 2, "title": "Not for us",
         "startTime": "2024-01-18T12:00:00Z", "endTime": "2024-01-18T13:00:00Z"}
    ]
}"#;

fn events_file(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "agenda-integration-{name}-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, EVENTS).expect("write fixture");
    path
}

fn service(name: &str) -> CalendarService<JsonFileSource> {
    CalendarService::new(JsonFileSource::new(events_file(name)), Tz::UTC, 7)
}

/// ## Summary
/// A week query loads owned and shared events, expands the series and
/// buckets each occurrence into its day. An undecodable record is dropped
/// without losing the rest of the file.
#[test_log::test(tokio::test)]
async fn week_view_report() {
    let service = service("week");
    let anchor = date(2024, 1, 17);
    let snapshot = service
        .snapshot_for_view(OWNER, CalendarView::Week, anchor)
        .await
        .expect("snapshot");

    let ids: Vec<&str> = snapshot.events().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["E1", "7", "S1"]);

    let report = CalendarReport::build(
        &snapshot,
        CalendarView::Week,
        anchor,
        &FilterOptions::default(),
    );

    // The padded window reaches back to Jan 8 and on to Jan 28.
    let titles: Vec<&str> = report.occurrences.iter().map(|o| o.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Standup", "Standup", "Dentist", "Team lunch", "Standup"]
    );

    let week: Vec<usize> = report.days.iter().map(|d| d.occurrence_ids.len()).collect();
    assert_eq!(week, vec![1, 0, 1, 1, 0, 0, 0]);
    assert_eq!(report.days[0].date, date(2024, 1, 15));

    let lunch = &report.occurrences[3];
    assert_eq!(lunch.color, "#4CAF50");
    assert_eq!(
        lunch.permission,
        agenda_test::core::types::Permission::Edit
    );
}

/// ## Summary
/// Actions on a repeat resolve to the series, limited by the viewer's level.
#[test_log::test(tokio::test)]
async fn actions_are_authorized_per_series() {
    let service = service("actions");
    let snapshot = service
        .snapshot_for_view(OWNER, CalendarView::Month, date(2024, 1, 10))
        .await
        .expect("snapshot");

    let repeat: OccurrenceId = format!(
        "E1-recurrence-{}",
        utc(2024, 1, 15, 10, 0).timestamp_millis()
    )
    .parse()
    .expect("occurrence id");
    assert_eq!(
        snapshot.authorize(&repeat, Action::Delete).expect("owner"),
        EventId::new("E1")
    );

    // Past the recurrence end: no such occurrence.
    let beyond: OccurrenceId = format!(
        "E1-recurrence-{}",
        utc(2024, 1, 29, 10, 0).timestamp_millis()
    )
    .parse()
    .expect("occurrence id");
    assert!(matches!(
        snapshot.authorize(&beyond, Action::View),
        Err(ServiceError::NotFound(_))
    ));

    let lunch = OccurrenceId::original(EventId::new("S1"));
    assert!(snapshot.authorize(&lunch, Action::Edit).is_ok());
    assert!(matches!(
        snapshot.authorize(&lunch, Action::Share),
        Err(ServiceError::Forbidden(_))
    ));
}

/// ## Summary
/// Stepping a month view forward and back lands on the original anchor's month.
#[test_log::test(tokio::test)]
async fn navigation_moves_the_window() {
    let service = service("navigation");
    let anchor = date(2024, 1, 31);
    let next = navigate(CalendarView::Month, anchor, Direction::Next);
    assert_eq!(next, date(2024, 2, 29));

    let snapshot = service
        .snapshot_for_view(OWNER, CalendarView::Month, next)
        .await
        .expect("snapshot");
    // The January events all end before the padded February window opens.
    assert!(snapshot.visible(&FilterOptions::default()).is_empty());

    let back = navigate(CalendarView::Month, next, Direction::Previous);
    assert_eq!(back, date(2024, 1, 29));
}

/// ## Summary
/// A missing events file is an I/O error, not an empty calendar.
#[test_log::test(tokio::test)]
async fn missing_events_file() {
    let service = CalendarService::new(
        JsonFileSource::new(std::env::temp_dir().join("agenda-integration-absent.json")),
        Tz::UTC,
        0,
    );
    let result = service
        .snapshot_for_view(OWNER, CalendarView::Day, date(2024, 1, 1))
        .await;
    assert!(matches!(result, Err(ServiceError::IoError(_))));
}
