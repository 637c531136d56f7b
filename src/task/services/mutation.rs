//! Mutation orchestration between the task store and the persistence
//! gateway.
//!
//! Status changes are optimistic: the store is updated first, the change is
//! persisted, and the full pre-mutation snapshot is restored if persistence
//! fails. Create, edit, delete and subtask creation are pessimistic: the
//! store changes only after the gateway confirms.

use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use super::{BoardAction, SessionToken, TaskStore};
use crate::task::{
    domain::{
        DueDate, EditTaskForm, NewTaskForm, QuickSubtaskForm, Task, TaskDomainError, TaskFields,
        TaskId, TaskStatus, UserId,
    },
    ports::{GatewayError, Notification, Notifier, TaskGateway},
};

/// Service-level errors for board mutations.
#[derive(Debug, Error)]
pub enum MutationError {
    /// Form validation failed; nothing was sent.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The gateway call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// No loaded task has this identifier.
    #[error("task {0} is not loaded")]
    UnknownTask(TaskId),

    /// A status change for this task is still awaiting persistence.
    #[error("a status change for task {0} is already in flight")]
    InFlight(TaskId),

    /// The board's role does not allow the action.
    #[error("action not permitted on this board: {0:?}")]
    NotPermitted(BoardAction),

    /// The action needs an open detail view and none is open.
    #[error("no task is open in the detail view")]
    NoSelection,

    /// The session ended before the gateway answered; the result was
    /// discarded.
    #[error("board session cancelled")]
    Cancelled,
}

/// Result type for board mutations.
pub type MutationResult<T> = Result<T, MutationError>;

/// Outcome of a successful status change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    /// The task already had the requested status; nothing was sent.
    Unchanged,
    /// The new status was applied locally and persisted.
    Persisted(Task),
}

/// Releases a task's in-flight claim when dropped.
struct InFlightClaim {
    registry: Arc<Mutex<HashSet<TaskId>>>,
    id: TaskId,
}

impl Drop for InFlightClaim {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.id);
    }
}

/// Applies board mutations to the store and the gateway.
pub struct MutationController<G, N>
where
    G: TaskGateway,
    N: Notifier,
{
    gateway: Arc<G>,
    notifier: Arc<N>,
    store: TaskStore,
    session: SessionToken,
    in_flight: Arc<Mutex<HashSet<TaskId>>>,
    default_responsible: Option<UserId>,
}

impl<G, N> Clone for MutationController<G, N>
where
    G: TaskGateway,
    N: Notifier,
{
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            notifier: Arc::clone(&self.notifier),
            store: self.store.clone(),
            session: self.session.clone(),
            in_flight: Arc::clone(&self.in_flight),
            default_responsible: self.default_responsible,
        }
    }
}

impl<G, N> MutationController<G, N>
where
    G: TaskGateway,
    N: Notifier,
{
    /// Creates a controller over `store`, bound to `session`.
    #[must_use]
    pub fn new(gateway: Arc<G>, notifier: Arc<N>, store: TaskStore, session: SessionToken) -> Self {
        Self {
            gateway,
            notifier,
            store,
            session,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            default_responsible: None,
        }
    }

    /// Sets the responsible user echoed for tasks that have none.
    #[must_use]
    pub const fn with_default_responsible(mut self, user: Option<UserId>) -> Self {
        self.default_responsible = user;
        self
    }

    /// Returns the store this controller mutates.
    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Returns whether a status change for `id` awaits persistence.
    #[must_use]
    pub fn is_in_flight(&self, id: TaskId) -> bool {
        self.in_flight.lock().contains(&id)
    }

    /// Moves a task to `status` optimistically.
    ///
    /// The store reflects the new status before the gateway is called. If
    /// persistence fails, the whole collection is restored to its state
    /// just before this call.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::UnknownTask`] for an unloaded task,
    /// [`MutationError::InFlight`] when a change for the same task is
    /// pending, [`MutationError::Gateway`] after a rollback, and
    /// [`MutationError::Cancelled`] when the session ends first.
    #[instrument(skip(self))]
    pub async fn apply_status_change(
        &self,
        id: TaskId,
        status: TaskStatus,
    ) -> MutationResult<StatusChange> {
        if self.session.is_cancelled() {
            debug!("session cancelled, status change dropped");
            return Err(MutationError::Cancelled);
        }
        let task = self.store.get(id).ok_or(MutationError::UnknownTask(id))?;
        let outcome = task.transition(status);
        if outcome.is_noop() {
            debug!("status unchanged, nothing to persist");
            return Ok(StatusChange::Unchanged);
        }

        let Some(_claim) = self.claim(id) else {
            warn!("status change rejected, another one is in flight");
            self.notifier
                .notify(Notification::error("Could not change status"));
            return Err(MutationError::InFlight(id));
        };

        let snapshot = self.store.snapshot();
        let updated = outcome.into_task();
        let fields = self.echo_fields(&updated);
        self.store.upsert(updated.clone());

        match self.session.run(self.gateway.update_task(id, &fields)).await {
            None => {
                debug!("session cancelled, status change result discarded");
                Err(MutationError::Cancelled)
            }
            Some(Ok(_)) => {
                info!("status change persisted");
                self.notifier
                    .notify(Notification::success(format!("Status: {}", status.title())));
                Ok(StatusChange::Persisted(self.store.get(id).unwrap_or(updated)))
            }
            Some(Err(err)) => {
                warn!(error = %err, "status change failed, restoring snapshot");
                self.store.restore(snapshot);
                self.notifier
                    .notify(Notification::error("Could not change status"));
                Err(err.into())
            }
        }
    }

    /// Replaces every editable field of a task once the gateway confirms.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::Domain`] when the form is invalid or names a
    /// parent that is not loaded, and [`MutationError::Gateway`] when
    /// persistence fails; the store is unchanged in both cases.
    #[instrument(skip(self, form))]
    pub async fn save_edit(&self, id: TaskId, form: EditTaskForm) -> MutationResult<Task> {
        if !self.store.contains(id) {
            return Err(MutationError::UnknownTask(id));
        }
        let fields = self.validated(form.validate(id).and_then(|fields| self.known_parent(fields)))?;
        let saved = self
            .persist(self.gateway.update_task(id, &fields), "Could not update task")
            .await?;
        self.notifier.notify(Notification::success("Task updated"));
        Ok(self.store_confirmed(saved))
    }

    /// Creates a task from the creation form once the gateway confirms.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::Domain`] when a mandatory field is missing
    /// or the parent is not loaded, and [`MutationError::Gateway`] when
    /// persistence fails.
    #[instrument(skip(self, form))]
    pub async fn create(&self, form: NewTaskForm) -> MutationResult<Task> {
        let fields = self.validated(form.validate().and_then(|fields| self.known_parent(fields)))?;
        let created = self
            .persist(self.gateway.create_task(&fields), "Could not create task")
            .await?;
        info!(task_id = %created.id(), "task created");
        self.notifier.notify(Notification::success("Task created"));
        Ok(self.store_confirmed(created))
    }

    /// Creates a subtask of `parent_id` from the quick form.
    ///
    /// Blank fields default as described on [`QuickSubtaskForm::resolve`],
    /// with the first loaded user as last-resort responsible.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::UnknownTask`] for an unloaded parent and
    /// [`MutationError::Gateway`] when persistence fails.
    #[instrument(skip(self, form))]
    pub async fn add_subtask(
        &self,
        parent_id: TaskId,
        form: QuickSubtaskForm,
        today: DueDate,
    ) -> MutationResult<Task> {
        let parent = self
            .store
            .get(parent_id)
            .ok_or(MutationError::UnknownTask(parent_id))?;
        let fallback_user = self.store.users().first().map(|user| user.id);
        let fields = form.resolve(&parent, fallback_user, today);
        let created = self
            .persist(self.gateway.create_task(&fields), "Could not add subtask")
            .await?;
        self.notifier.notify(Notification::success("Subtask added"));
        Ok(self.store_confirmed(created))
    }

    /// Deletes a task and removes it from the store once the gateway
    /// confirms.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::UnknownTask`] for an unloaded task and
    /// [`MutationError::Gateway`] when persistence fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: TaskId) -> MutationResult<Task> {
        if !self.store.contains(id) {
            return Err(MutationError::UnknownTask(id));
        }
        self.persist(self.gateway.delete_task(id), "Could not delete task")
            .await?;
        let removed = self
            .store
            .remove(id)
            .ok_or(MutationError::UnknownTask(id))?;
        self.notifier.notify(Notification::success("Task deleted"));
        Ok(removed)
    }

    fn claim(&self, id: TaskId) -> Option<InFlightClaim> {
        if !self.in_flight.lock().insert(id) {
            return None;
        }
        Some(InFlightClaim {
            registry: Arc::clone(&self.in_flight),
            id,
        })
    }

    fn echo_fields(&self, task: &Task) -> TaskFields {
        let mut fields = task.fields();
        fields.responsible = fields.responsible.or(self.default_responsible);
        fields
    }

    fn known_parent(&self, fields: TaskFields) -> Result<TaskFields, TaskDomainError> {
        match fields.parent_task {
            Some(parent) if !self.store.contains(parent) => {
                Err(TaskDomainError::UnknownParent(parent))
            }
            _ => Ok(fields),
        }
    }

    fn validated(&self, result: Result<TaskFields, TaskDomainError>) -> MutationResult<TaskFields> {
        result.map_err(|err| {
            debug!(error = %err, "form rejected before persistence");
            self.notifier.notify(Notification::error(err.to_string()));
            MutationError::Domain(err)
        })
    }

    async fn persist<T>(
        &self,
        call: impl Future<Output = Result<T, GatewayError>>,
        failure_message: &str,
    ) -> MutationResult<T> {
        match self.session.run(call).await {
            None => {
                debug!("session cancelled, result discarded");
                Err(MutationError::Cancelled)
            }
            Some(Ok(value)) => Ok(value),
            Some(Err(err)) => {
                warn!(error = %err, "{failure_message}");
                self.notifier.notify(Notification::error(failure_message));
                Err(err.into())
            }
        }
    }

    fn store_confirmed(&self, task: Task) -> Task {
        let id = task.id();
        self.store.upsert(task.clone());
        self.store.get(id).unwrap_or(task)
    }
}
