//! Time windows and the overlap test shared by expansion and bucketing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agenda_core::error::{CoreError, CoreResult};

/// ## Summary
/// Inclusive overlap test between two spans.
///
/// `[start, end]` overlaps `[from, to]` iff `start <= to && end >= from`.
/// Touching endpoints count as overlap, and zero-length spans are allowed on
/// either side.
#[must_use]
pub fn overlaps(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> bool {
    start <= to && end >= from
}

/// A closed query window `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// ## Summary
    /// Creates a window, rejecting inverted bounds.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidInput` when `end < start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> CoreResult<Self> {
        if end < start {
            return Err(CoreError::InvalidInput(format!(
                "window end {end} precedes start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `[start, end]` intersects this window.
    #[must_use]
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        overlaps(start, end, self.start, self.end)
    }

    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}
