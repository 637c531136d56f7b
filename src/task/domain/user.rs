//! Read-only user records and task assignee references.

use super::UserId;
use serde::{Deserialize, Serialize};

/// A user known to the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend identifier.
    pub id: UserId,
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub lastname: String,
}

impl User {
    /// Creates a user record.
    #[must_use]
    pub fn new(id: UserId, firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self {
            id,
            firstname: firstname.into(),
            lastname: lastname.into(),
        }
    }

    /// Returns `"firstname lastname"`, trimmed.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
            .trim()
            .to_owned()
    }
}

/// The user responsible for a task.
///
/// The task only owns the foreign identifier; the display name is present
/// when the payload embedded the user or after resolution against the
/// loaded user collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    id: UserId,
    display_name: Option<String>,
}

impl Assignee {
    /// Creates an assignee known only by identifier.
    #[must_use]
    pub const fn from_id(id: UserId) -> Self {
        Self {
            id,
            display_name: None,
        }
    }

    /// Creates an assignee carrying the user's display name.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            display_name: Some(user.display_name()).filter(|name| !name.is_empty()),
        }
    }

    /// Returns the referenced user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name, if resolved.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns whether the display name still needs resolving.
    #[must_use]
    pub const fn is_unresolved(&self) -> bool {
        self.display_name.is_none()
    }
}
