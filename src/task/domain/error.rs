//! Error types for task domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or validating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is invalid.
    #[error("invalid task identifier {0}, expected a positive integer")]
    InvalidTaskId(u64),

    /// The user identifier is invalid.
    #[error("invalid user identifier {0}, expected a positive integer")]
    InvalidUserId(u64),

    /// The task label is empty after trimming.
    #[error("task label must not be empty")]
    EmptyLabel,

    /// A task creation form was submitted without a responsible user.
    #[error("a responsible user is required")]
    MissingResponsible,

    /// A task creation form was submitted without a due date.
    #[error("a due date is required")]
    MissingDueDate,

    /// The due date could not be parsed or is out of range.
    #[error("invalid due date: {0}")]
    InvalidDueDate(String),

    /// A task was given itself as parent.
    #[error("task {0} cannot be its own parent")]
    SelfParent(TaskId),

    /// The chosen parent task is not loaded.
    #[error("parent task {0} does not exist")]
    UnknownParent(TaskId),

    /// Page numbers start at one.
    #[error("invalid page number {0}, pages start at 1")]
    InvalidPageNumber(u32),
}

/// Error returned while parsing task statuses from wire or form values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
