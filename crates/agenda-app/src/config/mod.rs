use chrono::{DateTime, NaiveDate, Utc};

pub use agenda_core::config::*;
use agenda_service::calendar::CalendarService;
use agenda_service::source::JsonFileSource;

use crate::error::AppResult;

/// ## Summary
/// Date the configured view is centred on.
///
/// Falls back to the local date of `now` in the configured zone.
///
/// ## Errors
/// Returns an error if the configured zone is unknown.
pub fn resolve_anchor(settings: &Settings, now: DateTime<Utc>) -> AppResult<NaiveDate> {
    if let Some(anchor) = settings.query.anchor {
        return Ok(anchor);
    }
    let tz = settings.calendar.tz()?;
    Ok(now.with_timezone(&tz).date_naive())
}

/// ## Summary
/// Builds the calendar service over the configured events file.
///
/// ## Errors
/// Returns an error if the configured zone is unknown.
pub fn build_service(settings: &Settings) -> AppResult<CalendarService<JsonFileSource>> {
    let source = JsonFileSource::new(&settings.query.events_path);
    Ok(CalendarService::from_config(source, &settings.calendar)?)
}
