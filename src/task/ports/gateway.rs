//! Persistence port for the remote task and user endpoints.

use crate::task::domain::{Task, TaskFields, TaskId, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// A user together with the tasks assigned to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTasks {
    /// The user.
    pub user: User,
    /// Tasks the user is responsible for.
    pub tasks: Vec<Task>,
}

/// Remote task persistence contract.
///
/// Every call is a single request; retries and authentication failures are
/// the transport's concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Fetches the full task collection.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the request or decoding fails.
    async fn list_tasks(&self) -> GatewayResult<Vec<Task>>;

    /// Fetches the full user collection.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the request or decoding fails.
    async fn list_users(&self) -> GatewayResult<Vec<User>>;

    /// Fetches one user along with the tasks assigned to them.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the request or decoding fails.
    async fn user_with_tasks(&self, id: UserId) -> GatewayResult<UserTasks>;

    /// Creates a task and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Rejected`] when the backend refuses the body.
    async fn create_task(&self, fields: &TaskFields) -> GatewayResult<Task>;

    /// Replaces every editable field of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the task does not exist.
    async fn update_task(&self, id: TaskId, fields: &TaskFields) -> GatewayResult<Task>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the task does not exist.
    async fn delete_task(&self, id: TaskId) -> GatewayResult<()>;
}

/// Errors returned by gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The user was not found.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The backend answered with a non-success status.
    #[error("request rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The payload could not be decoded into domain values.
    #[error("malformed payload: {0}")]
    Decode(String),

    /// Transport-layer failure.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
