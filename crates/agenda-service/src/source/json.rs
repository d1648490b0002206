use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use agenda_calendar::model::EventRecord;
use agenda_calendar::window::TimeWindow;
use agenda_core::types::UserId;

use super::{EventListing, EventSource};
use crate::error::ServiceResult;

/// Accepted file layouts: a bare array, or the `{ownedEvents, sharedEvents}`
/// object storage returns.
///
/// Records stay raw here so each one is decoded on its own.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredEvents {
    Records(Vec<Value>),
    Listing {
        #[serde(rename = "ownedEvents", default)]
        owned: Vec<Value>,
        #[serde(rename = "sharedEvents", default)]
        shared: Vec<Value>,
    },
}

impl StoredEvents {
    fn into_values(self) -> Vec<Value> {
        match self {
            Self::Records(values) => values,
            Self::Listing { owned, shared } => owned.into_iter().chain(shared).collect(),
        }
    }
}

/// ## Summary
/// Decodes raw records one by one.
///
/// A record that does not fit [`EventRecord`] is logged at `warn` and
/// skipped; the rest of the file is still used.
fn decode_records(values: Vec<Value>) -> Vec<EventRecord> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<EventRecord>(value) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(index, error = %err, "Skipping undecodable event record");
                None
            }
        })
        .collect()
}

/// ## Summary
/// Event source reading a JSON file on every call.
///
/// The file may hold events of many users; each call partitions them for the
/// requesting viewer.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSource for JsonFileSource {
    #[tracing::instrument(skip(self, _window), fields(path = %self.path.display()))]
    async fn list(&self, viewer: UserId, _window: &TimeWindow) -> ServiceResult<EventListing> {
        let bytes = tokio::fs::read(&self.path).await?;
        let stored: StoredEvents = serde_json::from_slice(&bytes)?;
        let listing = EventListing::partition(decode_records(stored.into_values()), viewer);
        tracing::debug!(
            owned = listing.owned.len(),
            shared = listing.shared.len(),
            "Loaded events from file"
        );
        Ok(listing)
    }
}
