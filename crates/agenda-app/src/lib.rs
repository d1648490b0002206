//! The `agenda` binary's building blocks: configuration glue and report rendering.

pub mod config;
pub mod error;
pub mod report;
