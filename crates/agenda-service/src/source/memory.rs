use agenda_calendar::model::EventRecord;
use agenda_calendar::window::TimeWindow;
use agenda_core::types::UserId;

use super::{EventListing, EventSource};
use crate::error::ServiceResult;

/// Event source backed by records held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<EventRecord>,
}

impl MemorySource {
    #[must_use]
    pub fn new(records: Vec<EventRecord>) -> Self {
        Self { records }
    }

    /// Adds a record.
    pub fn push(&mut self, record: EventRecord) {
        self.records.push(record);
    }
}

impl EventSource for MemorySource {
    async fn list(&self, viewer: UserId, _window: &TimeWindow) -> ServiceResult<EventListing> {
        let listing = EventListing::partition(self.records.iter().cloned(), viewer);
        tracing::trace!(
            viewer = %viewer,
            owned = listing.owned.len(),
            shared = listing.shared.len(),
            "Listed in-memory events"
        );
        Ok(listing)
    }
}
