//! Agenda integration test support.
//!
//! Re-exports the workspace crates so integration tests can reach every layer
//! through `agenda_test::` paths.

pub use agenda_app as app;
pub use agenda_calendar as calendar;
pub use agenda_core as core;
pub use agenda_service as service;
