//! Domain model for the task board.
//!
//! Tasks, users and the status lifecycle are plain values here; loading,
//! persistence and notification live outside the domain boundary.

mod due_date;
mod error;
mod form;
mod ids;
mod status;
mod task;
mod user;

pub use due_date::DueDate;
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use form::{DEFAULT_SUBTASK_LABEL, EditTaskForm, NewTaskForm, QuickSubtaskForm};
pub use ids::{TaskId, UserId};
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task, TaskFields, TransitionOutcome};
pub use user::{Assignee, User};
