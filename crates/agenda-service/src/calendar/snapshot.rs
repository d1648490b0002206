//! A viewer's events for one query window, ready for expansion.

use std::collections::HashSet;

use chrono::{NaiveDate, TimeDelta};
use chrono_tz::Tz;

use agenda_calendar::bucket::{Cell, bucket, month_cells, week_cells};
use agenda_calendar::expand::{Expansion, expand_all};
use agenda_calendar::model::{Event, Occurrence, OccurrenceId, validate_records};
use agenda_calendar::visibility::{FilterOptions, event_permission, filter_visible};
use agenda_calendar::window::TimeWindow;
use agenda_core::types::{CalendarView, EventId, UserId};

use super::action::Action;
use crate::error::{ServiceError, ServiceResult};
use crate::source::EventListing;

/// Occurrences of one cell.
pub type CellBucket<'o, 'a> = (Cell, Vec<&'o Occurrence<'a>>);

/// ## Summary
/// Validated events of one viewer for one window.
///
/// Owns the events so occurrences can borrow from it. Building a snapshot is
/// the last step that touches storage; everything after is pure.
#[derive(Debug, Clone)]
pub struct CalendarSnapshot {
    viewer: UserId,
    window: TimeWindow,
    tz: Tz,
    events: Vec<Event>,
}

impl CalendarSnapshot {
    /// ## Summary
    /// Validates a listing, dropping unusable records and duplicate ids.
    ///
    /// Owned events come first, so an event listed both as owned and shared
    /// keeps its owned copy.
    #[must_use]
    pub fn from_listing(listing: EventListing, viewer: UserId, window: TimeWindow, tz: Tz) -> Self {
        let total = listing.len();
        let mut seen = HashSet::new();
        let events: Vec<Event> = validate_records(listing.owned.into_iter().chain(listing.shared))
            .into_iter()
            .filter(|event| seen.insert(event.id.clone()))
            .collect();

        tracing::debug!(
            viewer = %viewer,
            received = total,
            kept = events.len(),
            "Built calendar snapshot"
        );

        Self {
            viewer,
            window,
            tz,
            events,
        }
    }

    #[must_use]
    pub const fn viewer(&self) -> UserId {
        self.viewer
    }

    #[must_use]
    pub const fn window(&self) -> &TimeWindow {
        &self.window
    }

    #[must_use]
    pub const fn tz(&self) -> &Tz {
        &self.tz
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|event| &event.id == id)
    }

    /// Every occurrence in the window, sorted by start then id.
    #[must_use]
    pub fn occurrences(&self) -> Vec<Occurrence<'_>> {
        expand_all(&self.events, &self.window)
    }

    /// Occurrences the viewer should see under `options`.
    #[must_use]
    pub fn visible(&self, options: &FilterOptions) -> Vec<Occurrence<'_>> {
        filter_visible(self.occurrences(), self.viewer, options)
    }

    /// ## Summary
    /// Buckets `occurrences` into the day cells of `view` around `anchor`.
    ///
    /// Day views produce one cell; use `DayAgenda` for hour slots.
    #[must_use]
    pub fn day_buckets<'o, 'a>(
        &self,
        occurrences: &'o [Occurrence<'a>],
        view: CalendarView,
        anchor: NaiveDate,
    ) -> Vec<CellBucket<'o, 'a>> {
        let cells = match view {
            CalendarView::Day => vec![Cell::day(anchor, &self.tz)],
            CalendarView::Week => week_cells(anchor, &self.tz),
            CalendarView::Month => month_cells(anchor, &self.tz),
        };
        cells
            .into_iter()
            .map(|cell| {
                let members = bucket(occurrences, &cell);
                (cell, members)
            })
            .collect()
    }

    /// ## Summary
    /// Finds the source event of an occurrence.
    ///
    /// A generated id resolves only if the series really produces a repeat at
    /// that instant.
    #[must_use]
    pub fn resolve(&self, id: &OccurrenceId) -> Option<&Event> {
        let event = self.event(id.source_event_id())?;
        let Some(start) = id.start() else {
            return Some(event);
        };
        // The key holds whole milliseconds; the repeat may start within that millisecond.
        let last = start.checked_add_signed(TimeDelta::milliseconds(1) - TimeDelta::nanoseconds(1))?;
        let probe = TimeWindow::new(start, last).ok()?;
        Expansion::new(event, &probe)
            .any(|occ| occ.is_generated && &occ.id == id)
            .then_some(event)
    }

    /// ## Summary
    /// Checks that the viewer may perform `action` on an occurrence.
    ///
    /// Returns the id of the event the action applies to. Actions on a
    /// generated occurrence always apply to the whole series.
    ///
    /// ## Errors
    /// - `ServiceError::NotFound` if the occurrence is not part of this snapshot.
    /// - `ServiceError::Forbidden` if the viewer's permission is too weak.
    pub fn authorize(&self, id: &OccurrenceId, action: Action) -> ServiceResult<EventId> {
        let event = self
            .resolve(id)
            .ok_or_else(|| ServiceError::NotFound(format!("occurrence {id}")))?;
        let permission = event_permission(event, self.viewer);

        if !action.allowed_for(permission) {
            tracing::debug!(
                viewer = %self.viewer,
                occurrence = %id,
                action = %action,
                permission = %permission,
                "Action denied"
            );
            return Err(ServiceError::Forbidden(format!(
                "{action} on event {} requires {}, viewer has {permission}",
                event.id,
                action.required_permission()
            )));
        }
        Ok(event.id.clone())
    }
}
