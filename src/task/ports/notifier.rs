//! Notification port for transient user-facing messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    /// The action succeeded.
    Success,
    /// The action failed.
    Error,
}

/// A transient message about the outcome of a board action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Outcome category.
    pub level: NotificationLevel,
    /// Human-readable message.
    pub message: String,
}

impl Notification {
    /// Creates a success notification.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    /// Creates an error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// Returns `true` for error notifications.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.level, NotificationLevel::Error)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    /// Emits a notification.
    fn notify(&self, notification: Notification);
}
