//! Snapshot loading, occurrence queries and action checks.

pub mod action;
pub mod service;
pub mod snapshot;

pub use action::Action;
pub use service::CalendarService;
pub use snapshot::{CalendarSnapshot, CellBucket};
