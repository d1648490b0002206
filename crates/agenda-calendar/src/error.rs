use thiserror::Error;

use agenda_core::types::EventId;

/// Data-quality problems found while validating a stored event record.
///
/// These never abort a batch: callers skip the offending record and move on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Event record has no id")]
    MissingId,

    #[error("Event {0} has no owner")]
    MissingOwner(EventId),

    #[error("Event {event}: missing {field}")]
    MissingTimestamp { event: EventId, field: &'static str },

    #[error("Event {event}: malformed {field} '{value}'")]
    MalformedTimestamp {
        event: EventId,
        field: &'static str,
        value: String,
    },

    #[error("Event id '{0}' contains the reserved occurrence marker")]
    ReservedId(EventId),

    #[error("Event {0}: end time precedes start time")]
    InvertedSpan(EventId),

    #[error("Malformed occurrence id '{0}'")]
    MalformedOccurrenceId(String),
}

pub type EventResult<T> = std::result::Result<T, EventError>;
