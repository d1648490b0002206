use std::fmt;

use agenda_core::types::Permission;

/// Something a viewer wants to do with an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    View,
    Edit,
    Delete,
    Share,
}

impl Action {
    /// Weakest permission that allows this action.
    #[must_use]
    pub const fn required_permission(self) -> Permission {
        match self {
            Self::View => Permission::View,
            Self::Edit => Permission::Edit,
            Self::Delete | Self::Share => Permission::Admin,
        }
    }

    #[must_use]
    pub const fn allowed_for(self, permission: Permission) -> bool {
        match self {
            Self::View => true,
            Self::Edit => permission.can_edit(),
            Self::Delete | Self::Share => permission.can_manage(),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Share => "share",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
