//! Host-side calendar pipeline.
//!
//! Loads a viewer's owned and shared events through an [`source::EventSource`],
//! validates them and hands them to the pure engine in `agenda-calendar`.
//! All I/O happens here, before expansion starts.

pub mod calendar;
pub mod error;
pub mod source;
