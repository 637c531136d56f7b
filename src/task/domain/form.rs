//! Form inputs for creating and editing tasks.
//!
//! Forms are validated before any persistence call is made; a form that
//! fails validation never touches the store.

use super::{DueDate, Task, TaskDomainError, TaskFields, TaskId, TaskStatus, UserId};

/// Label given to a quick subtask submitted without one.
pub const DEFAULT_SUBTASK_LABEL: &str = "Subtask";

/// Input of the task creation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskForm {
    label: String,
    description: String,
    responsible: Option<UserId>,
    due_date: Option<DueDate>,
    parent_task: Option<TaskId>,
    status: TaskStatus,
}

impl NewTaskForm {
    /// Creates a form with a label and every other field at its default.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: String::new(),
            responsible: None,
            due_date: None,
            parent_task: None,
            status: TaskStatus::default(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the responsible user.
    #[must_use]
    pub const fn with_responsible(mut self, responsible: UserId) -> Self {
        self.responsible = Some(responsible);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DueDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the parent task.
    #[must_use]
    pub const fn with_parent(mut self, parent: TaskId) -> Self {
        self.parent_task = Some(parent);
        self
    }

    /// Overrides the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Validates the form into the field set sent on creation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyLabel`],
    /// [`TaskDomainError::MissingResponsible`] or
    /// [`TaskDomainError::MissingDueDate`] when a mandatory field is absent.
    pub fn validate(self) -> Result<TaskFields, TaskDomainError> {
        let label = normalized_label(&self.label)?;
        let responsible = self.responsible.ok_or(TaskDomainError::MissingResponsible)?;
        let due_date = self.due_date.ok_or(TaskDomainError::MissingDueDate)?;
        Ok(TaskFields {
            label,
            description: self.description,
            responsible: Some(responsible),
            due_date: Some(due_date),
            parent_task: self.parent_task,
            status: self.status,
        })
    }
}

/// Input of the task detail form; a full replacement of the editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTaskForm {
    label: String,
    description: String,
    responsible: Option<UserId>,
    due_date: Option<DueDate>,
    parent_task: Option<TaskId>,
    status: TaskStatus,
}

impl EditTaskForm {
    /// Prefills the form from the task's current fields.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        let fields = task.fields();
        Self {
            label: fields.label,
            description: fields.description,
            responsible: fields.responsible,
            due_date: fields.due_date,
            parent_task: fields.parent_task,
            status: fields.status,
        }
    }

    /// Replaces the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replaces the responsible user.
    #[must_use]
    pub const fn with_responsible(mut self, responsible: Option<UserId>) -> Self {
        self.responsible = responsible;
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DueDate>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Replaces the parent task.
    #[must_use]
    pub const fn with_parent(mut self, parent: Option<TaskId>) -> Self {
        self.parent_task = parent;
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Validates the form for the task identified by `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyLabel`] for a blank label and
    /// [`TaskDomainError::SelfParent`] when the parent is the task itself.
    pub fn validate(self, task_id: TaskId) -> Result<TaskFields, TaskDomainError> {
        let label = normalized_label(&self.label)?;
        if self.parent_task == Some(task_id) {
            return Err(TaskDomainError::SelfParent(task_id));
        }
        Ok(TaskFields {
            label,
            description: self.description,
            responsible: self.responsible,
            due_date: self.due_date,
            parent_task: self.parent_task,
            status: self.status,
        })
    }
}

/// Input of the quick "add subtask" form shown in the detail view.
///
/// Every field is optional; blanks fall back to defaults derived from the
/// parent task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuickSubtaskForm {
    label: Option<String>,
    responsible: Option<UserId>,
    due_date: Option<DueDate>,
}

impl QuickSubtaskForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the responsible user.
    #[must_use]
    pub const fn with_responsible(mut self, responsible: UserId) -> Self {
        self.responsible = Some(responsible);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DueDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Resolves the form into the creation field set of a subtask of
    /// `parent`.
    ///
    /// The responsible user falls back to the parent's, then to
    /// `fallback_user`; the due date falls back to `today`.
    #[must_use]
    pub fn resolve(
        self,
        parent: &Task,
        fallback_user: Option<UserId>,
        today: DueDate,
    ) -> TaskFields {
        let label = self
            .label
            .map(|label| label.trim().to_owned())
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| DEFAULT_SUBTASK_LABEL.to_owned());
        let responsible = self
            .responsible
            .or_else(|| parent.responsible().map(|assignee| assignee.id()))
            .or(fallback_user);
        TaskFields {
            label,
            description: String::new(),
            responsible,
            due_date: Some(self.due_date.unwrap_or(today)),
            parent_task: Some(parent.id()),
            status: TaskStatus::Todo,
        }
    }
}

fn normalized_label(raw: &str) -> Result<String, TaskDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyLabel);
    }
    Ok(trimmed.to_owned())
}
