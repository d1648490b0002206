//! Concrete occurrences of an event and their identifiers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use agenda_core::constants::RECURRENCE_ID_MARKER;
use agenda_core::types::{EventId, Priority};

use super::event::Event;
use crate::error::EventError;

/// ## Summary
/// Structured occurrence key: the source event plus, for generated repeats,
/// the repeat's start instant.
///
/// The flat form is the source id for the original instance and
/// `<source>-recurrence-<epoch millis>` for a repeat. [`FromStr`] reverses it,
/// which is only unambiguous because validated event ids never contain
/// `-recurrence-`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OccurrenceId {
    source: EventId,
    start: Option<DateTime<Utc>>,
}

impl OccurrenceId {
    /// Key of the original, non-generated instance.
    #[must_use]
    pub const fn original(source: EventId) -> Self {
        Self {
            source,
            start: None,
        }
    }

    /// Key of a generated repeat starting at `start`.
    ///
    /// Sub-millisecond precision is dropped so the key survives its flat form.
    #[must_use]
    pub fn generated(source: EventId, start: DateTime<Utc>) -> Self {
        let millis = start.timestamp_millis();
        Self {
            source,
            start: Some(DateTime::from_timestamp_millis(millis).unwrap_or(start)),
        }
    }

    /// The series every action on this occurrence resolves to.
    #[must_use]
    pub const fn source_event_id(&self) -> &EventId {
        &self.source
    }

    #[must_use]
    pub const fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    #[must_use]
    pub const fn is_generated(&self) -> bool {
        self.start.is_some()
    }
}

impl fmt::Display for OccurrenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start {
            None => write!(f, "{}", self.source),
            Some(start) => write!(
                f,
                "{}{RECURRENCE_ID_MARKER}{}",
                self.source,
                start.timestamp_millis()
            ),
        }
    }
}

impl FromStr for OccurrenceId {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(EventError::MalformedOccurrenceId(s.to_string()));
        }
        let Some((source, millis)) = s.rsplit_once(RECURRENCE_ID_MARKER) else {
            return Ok(Self::original(EventId::new(s)));
        };
        let start = millis
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .ok_or_else(|| EventError::MalformedOccurrenceId(s.to_string()))?;
        if source.is_empty() {
            return Err(EventError::MalformedOccurrenceId(s.to_string()));
        }
        Ok(Self::generated(EventId::new(source), start))
    }
}

impl Serialize for OccurrenceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OccurrenceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One concrete, time-bounded instance of an event.
///
/// Display fields are read through to the source event, which the occurrence
/// borrows rather than copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence<'a> {
    pub id: OccurrenceId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_generated: bool,
    pub event: &'a Event,
}

impl<'a> Occurrence<'a> {
    /// The event's own instance.
    #[must_use]
    pub fn original(event: &'a Event) -> Self {
        Self {
            id: OccurrenceId::original(event.id.clone()),
            start_time: event.start_time,
            end_time: event.end_time,
            is_generated: false,
            event,
        }
    }

    /// A repeat of `event` shifted to `start`, keeping the event's duration.
    #[must_use]
    pub fn generated(event: &'a Event, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: OccurrenceId::generated(event.id.clone(), start),
            start_time: start,
            end_time: end,
            is_generated: true,
            event,
        }
    }

    #[must_use]
    pub const fn source_event_id(&self) -> &EventId {
        self.id.source_event_id()
    }

    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.event.priority
    }

    #[must_use]
    pub fn display_color(&self) -> &'a str {
        self.event.display_color()
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end_time - self.start_time
    }
}
