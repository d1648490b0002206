//! Occurrence expansion for a single event.

use chrono::{DateTime, TimeDelta, Utc};

use crate::model::{Event, Occurrence};
use crate::window::TimeWindow;

use super::step::{advance, recurrence_until};

/// ## Summary
/// Lazy, restartable walk over the occurrences of one event inside a window.
///
/// Yields the original instance first (if it intersects the window), then
/// generated repeats in start order. Every candidate is derived from the
/// previous one, and the walk ends as soon as a candidate passes the
/// expansion ceiling, so an open-ended rule is still bounded by the window.
#[derive(Debug, Clone)]
pub struct Expansion<'a> {
    event: &'a Event,
    window: TimeWindow,
    duration: TimeDelta,
    /// Latest start a repeat may have; `None` once repeats are exhausted.
    ceiling: Option<DateTime<Utc>>,
    cursor: DateTime<Utc>,
    original_pending: bool,
}

impl<'a> Expansion<'a> {
    #[must_use]
    pub fn new(event: &'a Event, window: &TimeWindow) -> Self {
        let ceiling = event.recurrence_type.repeats().then(|| {
            match event.recurrence_end.map(recurrence_until) {
                Some(until) if until < window.end() => until,
                _ => window.end(),
            }
        });

        tracing::trace!(
            event_id = %event.id,
            recurrence = %event.recurrence_type,
            ceiling = ?ceiling,
            "Starting expansion"
        );

        Self {
            event,
            window: *window,
            duration: event.duration(),
            ceiling,
            cursor: event.start_time,
            original_pending: true,
        }
    }

    fn next_generated(&mut self) -> Option<Occurrence<'a>> {
        let ceiling = self.ceiling?;
        loop {
            // Bound check comes before any other per-step work.
            let candidate = advance(self.cursor, self.event.recurrence_type)
                .filter(|next| *next <= ceiling);
            let Some(start) = candidate else {
                self.ceiling = None;
                return None;
            };
            self.cursor = start;

            let Some(end) = start.checked_add_signed(self.duration) else {
                self.ceiling = None;
                return None;
            };
            if self.window.overlaps(start, end) {
                return Some(Occurrence::generated(self.event, start, end));
            }
        }
    }
}

impl<'a> Iterator for Expansion<'a> {
    type Item = Occurrence<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.original_pending {
            self.original_pending = false;
            if self
                .window
                .overlaps(self.event.start_time, self.event.end_time)
            {
                return Some(Occurrence::original(self.event));
            }
        }
        self.next_generated()
    }
}

/// ## Summary
/// Expands one event into the occurrences intersecting `window`.
///
/// A non-recurring event yields zero or one occurrence. A recurring event's
/// original instance is judged on its own span, independently of its repeats.
#[must_use]
pub fn expand<'a>(event: &'a Event, window: &TimeWindow) -> Vec<Occurrence<'a>> {
    Expansion::new(event, window).collect()
}

/// ## Summary
/// Expands a batch of events and returns the occurrences sorted by start,
/// then by occurrence id.
#[must_use]
pub fn expand_all<'a, I>(events: I, window: &TimeWindow) -> Vec<Occurrence<'a>>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut occurrences: Vec<Occurrence<'a>> = events
        .into_iter()
        .flat_map(|event| Expansion::new(event, window))
        .collect();
    occurrences.sort_by(|a, b| a.start_time.cmp(&b.start_time).then_with(|| a.id.cmp(&b.id)));

    tracing::debug!(
        window_start = %window.start(),
        window_end = %window.end(),
        occurrences = occurrences.len(),
        "Expanded events"
    );
    occurrences
}
