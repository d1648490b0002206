//! Storage collaborators that supply raw event records.

pub mod json;
pub mod memory;

use std::future::Future;

use serde::{Deserialize, Serialize};

use agenda_calendar::model::EventRecord;
use agenda_calendar::window::TimeWindow;
use agenda_core::types::UserId;

use crate::error::ServiceResult;

pub use json::JsonFileSource;
pub use memory::MemorySource;

/// A viewer's events, split the way storage reports them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventListing {
    #[serde(rename = "ownedEvents")]
    pub owned: Vec<EventRecord>,
    #[serde(rename = "sharedEvents")]
    pub shared: Vec<EventRecord>,
}

impl EventListing {
    /// ## Summary
    /// Splits records into those `viewer` owns and those shared with them.
    ///
    /// Records the viewer neither owns nor appears in the sharing data of are
    /// dropped.
    #[must_use]
    pub fn partition(records: impl IntoIterator<Item = EventRecord>, viewer: UserId) -> Self {
        let mut listing = Self::default();
        for record in records {
            if record.owner() == Some(viewer) {
                listing.owned.push(record);
            } else if record.is_shared_with(viewer) {
                listing.shared.push(record);
            }
        }
        listing
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.owned.len() + self.shared.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owned.is_empty() && self.shared.is_empty()
    }
}

/// ## Summary
/// Source of stored events for a viewer.
///
/// Implementations may use `window` to narrow what they return but must keep
/// every recurring event whose series can reach it.
pub trait EventSource {
    /// ## Errors
    /// Returns an error if the underlying storage cannot be read.
    fn list(
        &self,
        viewer: UserId,
        window: &TimeWindow,
    ) -> impl Future<Output = ServiceResult<EventListing>> + Send;
}
