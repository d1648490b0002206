pub mod event;
pub mod occurrence;

pub use event::{Event, EventRecord, UserRef, parse_timestamp, validate_records};
pub use occurrence::{Occurrence, OccurrenceId};
