//! JSON rendering of a calendar query.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use agenda_calendar::model::{Occurrence, OccurrenceId};
use agenda_calendar::visibility::{FilterOptions, permission_of};
use agenda_core::types::{CalendarView, EventId, Permission, Priority, RecurrenceType, UserId};
use agenda_service::calendar::CalendarSnapshot;

/// An occurrence flattened for output, with the source event's display
/// fields copied alongside.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceRecord {
    pub occurrence_id: OccurrenceId,
    pub source_event_id: EventId,
    pub is_generated: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_all_day: bool,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub priority: Priority,
    pub color: String,
    pub recurrence_type: RecurrenceType,
    pub owner_id: UserId,
    pub is_shared: bool,
    pub permission: Permission,
}

impl OccurrenceRecord {
    #[must_use]
    pub fn new(occurrence: &Occurrence<'_>, viewer: UserId) -> Self {
        let event = occurrence.event;
        Self {
            occurrence_id: occurrence.id.clone(),
            source_event_id: event.id.clone(),
            is_generated: occurrence.is_generated,
            start_time: occurrence.start_time,
            end_time: occurrence.end_time,
            is_all_day: event.is_all_day,
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            priority: event.priority,
            color: event.display_color().to_string(),
            recurrence_type: event.recurrence_type,
            owner_id: event.owner_id,
            is_shared: event.is_shared,
            permission: permission_of(occurrence, viewer),
        }
    }
}

/// Occurrence ids falling on one visible day.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub date: NaiveDate,
    pub occurrence_ids: Vec<OccurrenceId>,
}

/// Everything the `agenda` binary prints for one query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarReport {
    pub viewer: UserId,
    pub view: CalendarView,
    pub anchor: NaiveDate,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub occurrences: Vec<OccurrenceRecord>,
    pub days: Vec<DayRecord>,
}

impl CalendarReport {
    /// ## Summary
    /// Expands, filters and buckets a snapshot for `view` around `anchor`.
    #[must_use]
    pub fn build(
        snapshot: &CalendarSnapshot,
        view: CalendarView,
        anchor: NaiveDate,
        options: &FilterOptions,
    ) -> Self {
        let viewer = snapshot.viewer();
        let visible = snapshot.visible(options);

        let days = snapshot
            .day_buckets(&visible, view, anchor)
            .into_iter()
            .map(|(cell, members)| DayRecord {
                date: cell.date,
                occurrence_ids: members.iter().map(|o| o.id.clone()).collect(),
            })
            .collect();

        Self {
            viewer,
            view,
            anchor,
            window_start: snapshot.window().start(),
            window_end: snapshot.window().end(),
            occurrences: visible
                .iter()
                .map(|o| OccurrenceRecord::new(o, viewer))
                .collect(),
            days,
        }
    }
}
