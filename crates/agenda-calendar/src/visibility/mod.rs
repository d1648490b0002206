//! Viewer-relative visibility and permissions.
//!
//! Pure predicates over already-fetched data: nothing here mutates an
//! occurrence or triggers a fetch.

use agenda_core::types::{Permission, UserId};

pub use agenda_core::types::FilterOptions;

use crate::model::{Event, Occurrence};

/// Whether `viewer` created the event.
#[must_use]
pub fn is_owner(event: &Event, viewer: UserId) -> bool {
    event.owner_id == viewer
}

/// ## Summary
/// Permission `viewer` holds over an event.
///
/// The owner is always `Admin`, whatever `userPermissions` says. Anyone else
/// gets their explicit grant, or `View` when there is none.
#[must_use]
pub fn event_permission(event: &Event, viewer: UserId) -> Permission {
    if is_owner(event, viewer) {
        return Permission::Admin;
    }
    event
        .user_permissions
        .get(&viewer)
        .copied()
        .unwrap_or_default()
}

/// Permission `viewer` holds over the occurrence's source event.
#[must_use]
pub fn permission_of(occurrence: &Occurrence<'_>, viewer: UserId) -> Permission {
    event_permission(occurrence.event, viewer)
}

/// ## Summary
/// Decides whether an occurrence is shown to `viewer` under `options`.
///
/// Both clauses must hold: the ownership clause (own events need `show_own`,
/// all others `show_shared`) and the priority clause.
#[must_use]
pub fn is_visible(occurrence: &Occurrence<'_>, viewer: UserId, options: &FilterOptions) -> bool {
    let owner = is_owner(occurrence.event, viewer);
    options.shows_ownership(owner) && options.shows_priority(occurrence.priority())
}

/// Keeps the occurrences visible to `viewer`, preserving order.
#[must_use]
pub fn filter_visible<'a>(
    occurrences: impl IntoIterator<Item = Occurrence<'a>>,
    viewer: UserId,
    options: &FilterOptions,
) -> Vec<Occurrence<'a>> {
    occurrences
        .into_iter()
        .filter(|occ| is_visible(occ, viewer, options))
        .collect()
}
