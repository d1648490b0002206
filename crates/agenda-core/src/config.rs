use anyhow::Result;
use chrono::NaiveDate;
use chrono_tz::Tz;
use config::Config;
use serde::Deserialize;

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_BUFFER_DAYS, ENV_PREFIX, ENV_SEPARATOR};
use crate::error::{CoreError, CoreResult};
use crate::types::{CalendarView, FilterOptions, UserId};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub calendar: CalendarConfig,
    pub query: QueryConfig,
    #[serde(default)]
    pub filters: FilterOptions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// IANA zone name used for day and hour boundaries.
    pub timezone: String,
    /// Padding applied on each side of a view's visible range.
    pub buffer_days: i64,
}

impl CalendarConfig {
    /// ## Summary
    /// Resolves the configured zone name.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the name is not a known IANA zone.
    pub fn tz(&self) -> CoreResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| CoreError::ConfigError(format!("calendar.timezone: {e}")))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    pub events_path: String,
    pub viewer_id: UserId,
    pub view: CalendarView,
    /// Date the view is centred on; `None` means today.
    pub anchor: Option<NaiveDate>,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, `agenda.toml` and `AGENDA__*` environment variables.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("logging.level", "info")?
            .set_default("calendar.timezone", "UTC")?
            .set_default("calendar.buffer_days", DEFAULT_BUFFER_DAYS)?
            .set_default("query.events_path", "events.json")?
            .set_default("query.view", "month")?
            // TOML file
            .add_source(config::File::with_name(CONFIG_FILE_NAME).required(false))
            // Env overrides
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks values that deserialize fine but make no sense.
    ///
    /// ## Errors
    /// - `CoreError::ConfigError` for an unknown zone.
    /// - `CoreError::ValidationError` for a negative buffer.
    pub fn validate(&self) -> CoreResult<()> {
        self.calendar.tz()?;
        if self.calendar.buffer_days < 0 {
            return Err(CoreError::ValidationError(format!(
                "calendar.buffer_days must not be negative, got {}",
                self.calendar.buffer_days
            )));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
