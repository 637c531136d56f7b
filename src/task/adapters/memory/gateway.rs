//! In-memory task gateway for tests and offline demos.
//!
//! Besides storing tasks, the gateway counts calls per operation, can be
//! told to fail specific operations, and can hold update calls until a
//! test releases them.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::Notify;

use crate::task::{
    domain::{Assignee, PersistedTaskData, Task, TaskFields, TaskId, User, UserId},
    ports::{GatewayError, GatewayResult, TaskGateway, UserTasks},
};

/// Gateway operations, used for failure injection and call counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOperation {
    /// `GET tasks`.
    ListTasks,
    /// `GET users`.
    ListUsers,
    /// `GET users/{id}`.
    UserWithTasks,
    /// `POST tasks`.
    CreateTask,
    /// `PUT tasks/{id}`.
    UpdateTask,
    /// `DELETE tasks/{id}`.
    DeleteTask,
}

/// Thread-safe in-memory task gateway.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskGateway {
    state: Arc<RwLock<InMemoryGatewayState>>,
}

#[derive(Debug, Default)]
struct InMemoryGatewayState {
    tasks: Vec<Task>,
    users: Vec<User>,
    last_id: u64,
    failing: HashSet<GatewayOperation>,
    calls: HashMap<GatewayOperation, usize>,
    update_gate: Option<Arc<Notify>>,
}

impl InMemoryGatewayState {
    fn record(&mut self, operation: GatewayOperation) -> GatewayResult<()> {
        *self.calls.entry(operation).or_default() += 1;
        if self.failing.contains(&operation) {
            return Err(GatewayError::Rejected {
                status: 500,
                message: format!("simulated {operation:?} failure"),
            });
        }
        Ok(())
    }

    fn build_task(&self, id: TaskId, fields: &TaskFields) -> Task {
        let responsible = fields.responsible.map(|user_id| {
            self.users
                .iter()
                .find(|user| user.id == user_id)
                .map_or_else(|| Assignee::from_id(user_id), Assignee::from_user)
        });
        Task::from_persisted(PersistedTaskData {
            id,
            label: fields.label.clone(),
            description: fields.description.clone(),
            responsible,
            due_date: fields.due_date,
            parent_task: fields.parent_task,
            status: fields.status,
        })
    }
}

fn poisoned(err: impl ToString) -> GatewayError {
    GatewayError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryTaskGateway {
    /// Creates an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> GatewayResult<RwLockReadGuard<'_, InMemoryGatewayState>> {
        self.state.read().map_err(poisoned)
    }

    fn write(&self) -> GatewayResult<RwLockWriteGuard<'_, InMemoryGatewayState>> {
        self.state.write().map_err(poisoned)
    }

    /// Adds a user to the served user collection.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the state lock is poisoned.
    pub fn insert_user(&self, user: User) -> GatewayResult<()> {
        let mut state = self.write()?;
        state.users.retain(|existing| existing.id != user.id);
        state.users.push(user);
        Ok(())
    }

    /// Adds or replaces a task with a caller-chosen identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the state lock is poisoned.
    pub fn insert_task(&self, task: Task) -> GatewayResult<()> {
        let mut state = self.write()?;
        state.last_id = state.last_id.max(task.id().value());
        if let Some(slot) = state.tasks.iter_mut().find(|t| t.id() == task.id()) {
            *slot = task;
        } else {
            state.tasks.push(task);
        }
        Ok(())
    }

    /// Makes every later call of `operation` fail with a 500 rejection.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the state lock is poisoned.
    pub fn fail(&self, operation: GatewayOperation) -> GatewayResult<()> {
        self.write()?.failing.insert(operation);
        Ok(())
    }

    /// Lets `operation` succeed again.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the state lock is poisoned.
    pub fn recover(&self, operation: GatewayOperation) -> GatewayResult<()> {
        self.write()?.failing.remove(&operation);
        Ok(())
    }

    /// Holds every later update call until the returned handle is notified
    /// once per call.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the state lock is poisoned.
    pub fn hold_updates(&self) -> GatewayResult<Arc<Notify>> {
        let gate = Arc::new(Notify::new());
        self.write()?.update_gate = Some(Arc::clone(&gate));
        Ok(gate)
    }

    /// Returns how many times `operation` has been called.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the state lock is poisoned.
    pub fn call_count(&self, operation: GatewayOperation) -> GatewayResult<usize> {
        Ok(self.read()?.calls.get(&operation).copied().unwrap_or_default())
    }

    /// Returns the tasks currently held by the gateway.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the state lock is poisoned.
    pub fn tasks(&self) -> GatewayResult<Vec<Task>> {
        Ok(self.read()?.tasks.clone())
    }
}

#[async_trait]
impl TaskGateway for InMemoryTaskGateway {
    async fn list_tasks(&self) -> GatewayResult<Vec<Task>> {
        let mut state = self.write()?;
        state.record(GatewayOperation::ListTasks)?;
        Ok(state.tasks.clone())
    }

    async fn list_users(&self) -> GatewayResult<Vec<User>> {
        let mut state = self.write()?;
        state.record(GatewayOperation::ListUsers)?;
        Ok(state.users.clone())
    }

    async fn user_with_tasks(&self, id: UserId) -> GatewayResult<UserTasks> {
        let mut state = self.write()?;
        state.record(GatewayOperation::UserWithTasks)?;
        let user = state
            .users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or(GatewayError::UserNotFound(id))?;
        let tasks = state
            .tasks
            .iter()
            .filter(|task| task.responsible().is_some_and(|a| a.id() == id))
            .cloned()
            .collect();
        Ok(UserTasks { user, tasks })
    }

    async fn create_task(&self, fields: &TaskFields) -> GatewayResult<Task> {
        let mut state = self.write()?;
        state.record(GatewayOperation::CreateTask)?;
        let next = state.last_id.saturating_add(1);
        let id = TaskId::new(next).map_err(|err| GatewayError::Decode(err.to_string()))?;
        state.last_id = next;
        let task = state.build_task(id, fields);
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, fields: &TaskFields) -> GatewayResult<Task> {
        let gate = {
            let mut state = self.write()?;
            *state.calls.entry(GatewayOperation::UpdateTask).or_default() += 1;
            state.update_gate.clone()
        };
        if let Some(held) = gate {
            held.notified().await;
        }

        let mut state = self.write()?;
        if state.failing.contains(&GatewayOperation::UpdateTask) {
            return Err(GatewayError::Rejected {
                status: 500,
                message: "simulated UpdateTask failure".to_owned(),
            });
        }
        let task = state.build_task(id, fields);
        let slot = state
            .tasks
            .iter_mut()
            .find(|existing| existing.id() == id)
            .ok_or(GatewayError::NotFound(id))?;
        *slot = task.clone();
        Ok(task)
    }

    async fn delete_task(&self, id: TaskId) -> GatewayResult<()> {
        let mut state = self.write()?;
        state.record(GatewayOperation::DeleteTask)?;
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id() != id);
        if state.tasks.len() == before {
            return Err(GatewayError::NotFound(id));
        }
        Ok(())
    }
}
