//! Task entity, its editable field set, and status transitions.

use super::{Assignee, DueDate, TaskId, TaskStatus, User, UserId};
use serde::{Deserialize, Serialize};

/// A unit of work shown on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    label: String,
    description: String,
    responsible: Option<Assignee>,
    due_date: Option<DueDate>,
    parent_task: Option<TaskId>,
    status: TaskStatus,
}

/// Parameter object for reconstructing a task received from persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Backend-assigned identifier.
    pub id: TaskId,
    /// Display title.
    pub label: String,
    /// Free-text description, empty when absent.
    pub description: String,
    /// Responsible user, if any.
    pub responsible: Option<Assignee>,
    /// Due date, if any.
    pub due_date: Option<DueDate>,
    /// Parent task, if this is a subtask.
    pub parent_task: Option<TaskId>,
    /// Lifecycle status.
    pub status: TaskStatus,
}

/// Full editable field set sent to the persistence layer on create and
/// update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFields {
    /// Display title.
    pub label: String,
    /// Free-text description.
    pub description: String,
    /// Responsible user identifier.
    pub responsible: Option<UserId>,
    /// Due date.
    pub due_date: Option<DueDate>,
    /// Parent task identifier.
    pub parent_task: Option<TaskId>,
    /// Lifecycle status.
    pub status: TaskStatus,
}

impl TaskFields {
    /// Returns the same field set with a different status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

/// Result of [`Task::transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The status changed; carries the updated task.
    Applied(Task),
    /// The task already had the requested status; carries it unchanged.
    Unchanged(Task),
}

impl TransitionOutcome {
    /// Returns `true` when the transition did not change anything.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::Unchanged(_))
    }

    /// Returns the resulting task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        match self {
            Self::Applied(task) | Self::Unchanged(task) => task,
        }
    }

    /// Consumes the outcome and returns the resulting task.
    #[must_use]
    pub fn into_task(self) -> Task {
        match self {
            Self::Applied(task) | Self::Unchanged(task) => task,
        }
    }
}

impl Task {
    /// Reconstructs a task from persisted data.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            label: data.label,
            description: data.description,
            responsible: data.responsible,
            due_date: data.due_date,
            parent_task: data.parent_task,
            status: data.status,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the description, empty when none was given.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the responsible user reference, if any.
    #[must_use]
    pub const fn responsible(&self) -> Option<&Assignee> {
        self.responsible.as_ref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DueDate> {
        self.due_date
    }

    /// Returns the parent task identifier, if this is a subtask.
    #[must_use]
    pub const fn parent_task(&self) -> Option<TaskId> {
        self.parent_task
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the task with `status` set to `target`, every other field
    /// unchanged.
    ///
    /// Moving to the current status yields [`TransitionOutcome::Unchanged`];
    /// callers must not persist that outcome.
    #[must_use]
    pub fn transition(&self, target: TaskStatus) -> TransitionOutcome {
        if self.status == target {
            return TransitionOutcome::Unchanged(self.clone());
        }
        let mut updated = self.clone();
        updated.status = target;
        TransitionOutcome::Applied(updated)
    }

    /// Returns the full field set echoed to the persistence layer.
    #[must_use]
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            label: self.label.clone(),
            description: self.description.clone(),
            responsible: self.responsible.as_ref().map(Assignee::id),
            due_date: self.due_date,
            parent_task: self.parent_task,
            status: self.status,
        }
    }

    /// Fills in the responsible user's display name from `users` when the
    /// task only carries the identifier.
    pub fn resolve_responsible(&mut self, users: &[User]) {
        let Some(current) = self.responsible.as_ref() else {
            return;
        };
        if !current.is_unresolved() {
            return;
        }
        let id = current.id();
        if let Some(user) = users.iter().find(|user| user.id == id) {
            self.responsible = Some(Assignee::from_user(user));
        }
    }
}
