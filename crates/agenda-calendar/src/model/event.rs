//! Stored events: the loose wire record and its validated form.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use agenda_core::constants::RECURRENCE_ID_MARKER;
use agenda_core::types::{EventId, Permission, Priority, RecurrenceType, UserId};

use crate::error::{EventError, EventResult};

/// Reference to a user as storage emits it: a bare id or a user object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Id(UserId),
    User { id: UserId },
}

impl UserRef {
    #[must_use]
    pub const fn id(&self) -> UserId {
        match self {
            Self::Id(id) | Self::User { id } => *id,
        }
    }
}

/// An event exactly as storage hands it over.
///
/// Every field is optional or defaulted so that one bad record cannot fail
/// decoding of a whole listing; [`Event::try_from`] does the real checking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventRecord {
    pub id: Option<EventId>,
    pub owner_id: Option<UserId>,
    pub user: Option<UserRef>,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_all_day: bool,
    pub recurrence_type: Option<RecurrenceType>,
    pub recurrence_end: Option<String>,
    pub priority: Option<Priority>,
    pub color: Option<String>,
    pub is_shared: bool,
    pub shared_with: Vec<UserRef>,
    pub user_permissions: BTreeMap<UserId, Permission>,
    pub reminder_minutes: Vec<u32>,
}

impl EventRecord {
    /// Owner as stored, preferring `ownerId` over the nested `user` object.
    #[must_use]
    pub fn owner(&self) -> Option<UserId> {
        self.owner_id.or_else(|| self.user.as_ref().map(UserRef::id))
    }

    /// Whether `viewer` appears anywhere in the sharing data.
    #[must_use]
    pub fn is_shared_with(&self, viewer: UserId) -> bool {
        self.shared_with.iter().any(|u| u.id() == viewer)
            || self.user_permissions.contains_key(&viewer)
    }
}

/// A validated event. Read-only input to expansion and visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub owner_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_all_day: bool,
    pub recurrence_type: RecurrenceType,
    pub recurrence_end: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub color: Option<String>,
    pub is_shared: bool,
    pub shared_with: BTreeSet<UserId>,
    pub user_permissions: BTreeMap<UserId, Permission>,
    pub reminder_minutes: Vec<u32>,
}

impl Event {
    /// ## Summary
    /// Creates a single, non-recurring, unshared event.
    ///
    /// ## Errors
    /// - `EventError::ReservedId` when the id contains `-recurrence-`.
    /// - `EventError::InvertedSpan` when `end_time < start_time`.
    pub fn new(
        id: impl Into<EventId>,
        owner_id: UserId,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> EventResult<Self> {
        let id = checked_id(id.into())?;
        if end_time < start_time {
            return Err(EventError::InvertedSpan(id));
        }
        Ok(Self {
            id,
            owner_id,
            title: String::new(),
            description: None,
            location: None,
            start_time,
            end_time,
            is_all_day: false,
            recurrence_type: RecurrenceType::None,
            recurrence_end: None,
            priority: Priority::default(),
            color: None,
            is_shared: false,
            shared_with: BTreeSet::new(),
            user_permissions: BTreeMap::new(),
            reminder_minutes: Vec::new(),
        })
    }

    /// Sets the recurrence rule.
    #[must_use]
    pub fn with_recurrence(mut self, kind: RecurrenceType, end: Option<DateTime<Utc>>) -> Self {
        self.recurrence_type = kind;
        self.recurrence_end = end;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Shares the event with `user` at the given level.
    #[must_use]
    pub fn shared_with_user(mut self, user: UserId, permission: Permission) -> Self {
        self.is_shared = true;
        self.shared_with.insert(user);
        self.user_permissions.insert(user, permission);
        self
    }

    /// Span length; never negative.
    #[must_use]
    pub fn duration(&self) -> chrono::TimeDelta {
        self.end_time - self.start_time
    }

    /// Explicit color, or the priority's color when none was chosen.
    #[must_use]
    pub fn display_color(&self) -> &str {
        self.color.as_deref().unwrap_or(self.priority.color())
    }
}

/// ## Summary
/// Parses a stored timestamp.
///
/// Accepts RFC 3339 (`2024-01-01T10:00:00Z`, `...+01:00`) and offset-less
/// `YYYY-MM-DDTHH:MM[:SS[.fff]]`, which is read as UTC. Precision below a
/// millisecond is dropped, matching occurrence keys.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    let parsed = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|naive| naive.and_utc())
        })?;
    Some(parsed.trunc_subsecs(3))
}

/// Rejects ids whose occurrence keys could not be told apart from a repeat's.
fn checked_id(id: EventId) -> EventResult<EventId> {
    if id.as_str().contains(RECURRENCE_ID_MARKER) {
        return Err(EventError::ReservedId(id));
    }
    Ok(id)
}

fn required_timestamp(
    event: &EventId,
    field: &'static str,
    value: Option<&str>,
) -> EventResult<DateTime<Utc>> {
    let Some(raw) = value else {
        return Err(EventError::MissingTimestamp {
            event: event.clone(),
            field,
        });
    };
    parse_timestamp(raw).ok_or_else(|| EventError::MalformedTimestamp {
        event: event.clone(),
        field,
        value: raw.to_string(),
    })
}

impl TryFrom<EventRecord> for Event {
    type Error = EventError;

    fn try_from(record: EventRecord) -> EventResult<Self> {
        let owner = record.owner();
        let id = checked_id(record.id.ok_or(EventError::MissingId)?)?;
        let owner_id = owner.ok_or_else(|| EventError::MissingOwner(id.clone()))?;

        let start_time = required_timestamp(&id, "startTime", record.start_time.as_deref())?;
        let end_time = required_timestamp(&id, "endTime", record.end_time.as_deref())?;
        if end_time < start_time {
            return Err(EventError::InvertedSpan(id));
        }

        let mut recurrence_type = record.recurrence_type.unwrap_or_default();
        let recurrence_end = match record.recurrence_end.as_deref() {
            None => None,
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => {
                let parsed = parse_timestamp(raw);
                if parsed.is_none() && recurrence_type.repeats() {
                    // An unreadable end must not turn into "repeats forever".
                    tracing::warn!(
                        event_id = %id,
                        recurrence_end = %raw,
                        "Malformed recurrenceEnd, dropping repeats"
                    );
                    recurrence_type = RecurrenceType::None;
                }
                parsed
            }
        };

        Ok(Self {
            id,
            owner_id,
            title: record.title,
            description: record.description,
            location: record.location,
            start_time,
            end_time,
            is_all_day: record.is_all_day,
            recurrence_type,
            recurrence_end,
            priority: record.priority.unwrap_or_default(),
            color: record.color.filter(|c| !c.trim().is_empty()),
            is_shared: record.is_shared,
            shared_with: record.shared_with.iter().map(UserRef::id).collect(),
            user_permissions: record.user_permissions,
            reminder_minutes: record.reminder_minutes,
        })
    }
}

/// ## Summary
/// Validates a batch of records, skipping the ones that fail.
///
/// Each rejected record is logged at `warn` with its reason.
#[must_use]
pub fn validate_records(records: impl IntoIterator<Item = EventRecord>) -> Vec<Event> {
    records
        .into_iter()
        .filter_map(|record| match Event::try_from(record) {
            Ok(event) => Some(event),
            Err(err) => {
                tracing::warn!(error = %err, "Skipping unusable event record");
                None
            }
        })
        .collect()
}
