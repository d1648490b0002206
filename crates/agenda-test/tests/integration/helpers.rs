//! Fixture builders shared by the integration tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use agenda_test::calendar::model::{Event, EventRecord};
use agenda_test::calendar::window::TimeWindow;
use agenda_test::core::types::{RecurrenceType, UserId};

pub const OWNER: UserId = UserId(1);
pub const FRIEND: UserId = UserId(2);

/// UTC instant from calendar fields.
pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("valid UTC timestamp")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Window covering whole UTC days `from..=to`.
pub fn days(from: NaiveDate, to: NaiveDate) -> TimeWindow {
    let start = from.and_hms_opt(0, 0, 0).expect("midnight").and_utc();
    let end = to
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("end of day")
        .and_utc();
    TimeWindow::new(start, end).expect("ordered window")
}

/// One-hour event owned by [`OWNER`].
pub fn hour_event(id: &str, start: DateTime<Utc>) -> Event {
    Event::new(id, OWNER, start, start + chrono::TimeDelta::hours(1)).expect("valid span")
}

pub fn recurring(
    id: &str,
    start: DateTime<Utc>,
    kind: RecurrenceType,
    end: Option<DateTime<Utc>>,
) -> Event {
    hour_event(id, start).with_recurrence(kind, end)
}

/// Parses stored records the way the JSON source does.
pub fn records(json: &str) -> Vec<EventRecord> {
    serde_json::from_str(json).expect("valid record JSON")
}

/// Start dates of a slice of occurrences, formatted `YYYY-MM-DD`.
pub fn start_dates(
    occurrences: &[agenda_test::calendar::model::Occurrence<'_>],
) -> Vec<String> {
    occurrences
        .iter()
        .map(|o| o.start_time.format("%Y-%m-%d").to_string())
        .collect()
}
