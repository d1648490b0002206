use chrono::NaiveDate;
use chrono_tz::Tz;

use agenda_calendar::view::query_window;
use agenda_calendar::window::TimeWindow;
use agenda_core::config::CalendarConfig;
use agenda_core::types::{CalendarView, UserId};

use super::snapshot::CalendarSnapshot;
use crate::error::ServiceResult;
use crate::source::EventSource;

/// ## Summary
/// Loads calendar snapshots from an event source.
///
/// Holds the viewer-independent settings: the zone for day boundaries and the
/// padding applied around view windows.
#[derive(Debug, Clone)]
pub struct CalendarService<S> {
    source: S,
    tz: Tz,
    buffer_days: i64,
}

impl<S: EventSource> CalendarService<S> {
    #[must_use]
    pub const fn new(source: S, tz: Tz, buffer_days: i64) -> Self {
        Self {
            source,
            tz,
            buffer_days,
        }
    }

    /// ## Summary
    /// Creates a service from the `calendar` configuration section.
    ///
    /// ## Errors
    /// Returns an error if the configured zone is unknown.
    pub fn from_config(source: S, config: &CalendarConfig) -> ServiceResult<Self> {
        Ok(Self::new(source, config.tz()?, config.buffer_days))
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub const fn tz(&self) -> &Tz {
        &self.tz
    }

    /// ## Summary
    /// Loads the viewer's owned and shared events for an explicit window.
    ///
    /// ## Errors
    /// Returns an error if the source cannot be read. Individual bad records
    /// are skipped, not reported.
    #[tracing::instrument(skip(self))]
    pub async fn snapshot(
        &self,
        viewer: UserId,
        window: TimeWindow,
    ) -> ServiceResult<CalendarSnapshot> {
        let listing = self.source.list(viewer, &window).await?;
        Ok(CalendarSnapshot::from_listing(listing, viewer, window, self.tz))
    }

    /// ## Summary
    /// Loads the events a view around `anchor` needs, including the padding.
    ///
    /// ## Errors
    /// Returns an error if the window cannot be built or the source fails.
    #[tracing::instrument(skip(self))]
    pub async fn snapshot_for_view(
        &self,
        viewer: UserId,
        view: CalendarView,
        anchor: NaiveDate,
    ) -> ServiceResult<CalendarSnapshot> {
        let window = query_window(view, anchor, &self.tz, self.buffer_days)?;
        self.snapshot(viewer, window).await
    }
}
