//! Identifiers and closed enumerations shared by every crate in the workspace.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Strongly typed user identifier.
///
/// Serialized transparently, so it can also be used as a JSON object key
/// (`{"2": "EDIT"}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Opaque, stable event identifier.
///
/// Storage hands out numeric ids, other hosts use strings; both deserialize
/// into the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<i64> for EventId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self::from(n),
            Raw::Text(s) => Self(s),
        })
    }
}

/// Event priority bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[serde(alias = "HIGH")]
    High,
    #[default]
    #[serde(alias = "MEDIUM")]
    Medium,
    #[serde(alias = "LOW")]
    Low,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Color used when an event carries no explicit color.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::High => crate::constants::HIGH_PRIORITY_COLOR,
            Self::Medium => crate::constants::MEDIUM_PRIORITY_COLOR,
            Self::Low => crate::constants::LOW_PRIORITY_COLOR,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permission a viewer holds over an event.
///
/// Ordered from weakest to strongest, so `level >= Permission::Edit` reads as
/// "may edit".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    #[default]
    #[serde(alias = "VIEW")]
    View,
    #[serde(alias = "EDIT")]
    Edit,
    #[serde(alias = "ADMIN")]
    Admin,
}

impl Permission {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Admin => "admin",
        }
    }

    /// Edit and admin grants may change event details.
    #[must_use]
    pub const fn can_edit(self) -> bool {
        matches!(self, Self::Edit | Self::Admin)
    }

    /// Only admin grants may delete the event or change who it is shared with.
    #[must_use]
    pub const fn can_manage(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an event repeats.
///
/// Any spelling storage does not recognise lands in `Unrecognized`, which the
/// expander treats like `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceType {
    #[default]
    #[serde(alias = "NONE")]
    None,
    #[serde(alias = "DAILY")]
    Daily,
    #[serde(alias = "WEEKLY")]
    Weekly,
    #[serde(alias = "MONTHLY")]
    Monthly,
    #[serde(alias = "YEARLY")]
    Yearly,
    #[serde(other)]
    Unrecognized,
}

impl RecurrenceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Whether this rule generates repeats at all.
    #[must_use]
    pub const fn repeats(self) -> bool {
        matches!(
            self,
            Self::Daily | Self::Weekly | Self::Monthly | Self::Yearly
        )
    }
}

impl fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar view granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    #[serde(alias = "DAY")]
    Day,
    #[serde(alias = "WEEK")]
    Week,
    #[default]
    #[serde(alias = "MONTH")]
    Month,
}

impl CalendarView {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Viewer-controlled switches deciding which occurrences are shown.
///
/// Every switch defaults to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[expect(clippy::struct_excessive_bools)]
pub struct FilterOptions {
    pub show_own: bool,
    pub show_shared: bool,
    pub show_high_priority: bool,
    pub show_medium_priority: bool,
    pub show_low_priority: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            show_own: true,
            show_shared: true,
            show_high_priority: true,
            show_medium_priority: true,
            show_low_priority: true,
        }
    }
}

impl FilterOptions {
    /// Ownership clause: own events follow `show_own`, everything else `show_shared`.
    #[must_use]
    pub const fn shows_ownership(&self, is_owner: bool) -> bool {
        if is_owner {
            self.show_own
        } else {
            self.show_shared
        }
    }

    #[must_use]
    pub const fn shows_priority(&self, priority: Priority) -> bool {
        match priority {
            Priority::High => self.show_high_priority,
            Priority::Medium => self.show_medium_priority,
            Priority::Low => self.show_low_priority,
        }
    }
}
