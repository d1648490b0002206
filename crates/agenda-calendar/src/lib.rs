//! Calendar engine: recurring-event expansion, visibility and bucketing.
//!
//! Everything in this crate is synchronous and pure. Hosts fetch events,
//! validate them into [`model::Event`], expand them against a
//! [`window::TimeWindow`], filter with [`visibility`] and bucket with
//! [`bucket`]. No function here performs I/O or keeps state between calls,
//! so batches may be expanded from several threads without coordination.

pub mod bucket;
pub mod error;
pub mod expand;
pub mod model;
pub mod view;
pub mod visibility;
pub mod window;
