//! Task status lifecycle.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task, one per board column.
///
/// The transition graph is complete: every status is reachable from every
/// other status, and no status is terminal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    Todo,
    /// Work is blocked on something external.
    Waiting,
    /// Work is under way.
    InProgress,
    /// Work is finished.
    Done,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const ALL: [Self; 4] = [Self::Todo, Self::Waiting, Self::InProgress, Self::Done];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Waiting => "waiting",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    /// Returns the human-readable column title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Todo => "To do",
            Self::Waiting => "Waiting",
            Self::InProgress => "In progress",
            Self::Done => "Done",
        }
    }

    /// Returns whether a task in this status may move to `target`.
    ///
    /// Always `true`; moving to the current status is permitted and treated
    /// as a no-op by [`super::Task::transition`].
    #[must_use]
    pub const fn can_transition_to(self, _target: Self) -> bool {
        true
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "waiting" => Ok(Self::Waiting),
            "in-progress" | "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
