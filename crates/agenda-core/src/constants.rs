/// Days added on each side of a view's visible range before querying storage.
pub const DEFAULT_BUFFER_DAYS: i64 = 7;

/// Name of the optional configuration file, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "agenda.toml";

/// Prefix for environment variable overrides (`AGENDA__QUERY__VIEWER_ID=1`).
pub const ENV_PREFIX: &str = "AGENDA";

/// Separator between the prefix and nested keys of environment overrides.
pub const ENV_SEPARATOR: &str = "__";

/// Marker between the source id and the start instant in a flat occurrence id.
pub const RECURRENCE_ID_MARKER: &str = "-recurrence-";

/// Display color for high priority events without an explicit color.
pub const HIGH_PRIORITY_COLOR: &str = "#FF5252";
/// Display color for medium priority events without an explicit color.
pub const MEDIUM_PRIORITY_COLOR: &str = "#FFC107";
/// Display color for low priority events without an explicit color.
pub const LOW_PRIORITY_COLOR: &str = "#4CAF50";
