//! Recurring-event expansion.
//!
//! Turns one stored event and a query window into the finite list of
//! occurrences that intersect the window.

pub mod expander;
pub mod step;

pub use expander::{Expansion, expand, expand_all};
pub use step::{advance, recurrence_until};
