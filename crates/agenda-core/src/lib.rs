//! Shared building blocks for the agenda workspace.
//!
//! Identifiers, closed enumerations used across crates, configuration loading
//! and the core error type. Nothing here depends on the calendar engine.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
