//! In-session task store.
//!
//! The store is the sole owner of the loaded task and user collections.
//! Views refer to tasks by identifier and read copies; every write goes
//! through the store and is atomic with respect to readers.

use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::BoardScope;
use crate::task::{
    domain::{Task, TaskId, TaskStatus, User},
    ports::{GatewayResult, TaskGateway},
};

/// Full copy of the task collection, taken before an optimistic mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSnapshot(Vec<Task>);

impl TaskSnapshot {
    /// Returns the captured tasks in collection order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.0
    }
}

#[derive(Debug, Default)]
struct StoreState {
    tasks: Vec<Task>,
    users: Vec<User>,
}

/// Shared handle to the in-memory task collection.
///
/// Clones share the same collection.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    state: Arc<RwLock<StoreState>>,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches tasks and users for `scope` and replaces both collections.
    ///
    /// On failure the previous collections are left untouched.
    ///
    /// # Errors
    ///
    /// Returns the first [`crate::task::ports::GatewayError`] raised by
    /// either fetch.
    #[instrument(skip(self, gateway))]
    pub async fn load<G>(&self, gateway: &G, scope: BoardScope) -> GatewayResult<usize>
    where
        G: TaskGateway + ?Sized,
    {
        let (tasks, users) = match scope {
            BoardScope::All => tokio::try_join!(gateway.list_tasks(), gateway.list_users())?,
            BoardScope::AssignedTo(user_id) => {
                let assigned = gateway.user_with_tasks(user_id).await?;
                (assigned.tasks, vec![assigned.user])
            }
        };
        self.replace(tasks, users);
        let count = self.len();
        debug!(count, "task store loaded");
        Ok(count)
    }

    /// Atomically replaces both collections.
    ///
    /// Later duplicates of an identifier replace earlier ones in place, and
    /// responsible users known only by identifier are resolved against
    /// `users`.
    pub fn replace(&self, tasks: Vec<Task>, users: Vec<User>) {
        let mut normalized: Vec<Task> = Vec::with_capacity(tasks.len());
        let mut seen = HashSet::with_capacity(tasks.len());
        for mut task in tasks {
            task.resolve_responsible(&users);
            if seen.insert(task.id()) {
                normalized.push(task);
            } else if let Some(slot) = normalized.iter_mut().find(|t| t.id() == task.id()) {
                *slot = task;
            }
        }
        let mut state = self.state.write();
        state.tasks = normalized;
        state.users = users;
    }

    /// Inserts `task`, or replaces the task with the same identifier in
    /// place.
    pub fn upsert(&self, mut task: Task) {
        let mut state = self.state.write();
        task.resolve_responsible(&state.users);
        if let Some(slot) = state.tasks.iter_mut().find(|t| t.id() == task.id()) {
            *slot = task;
        } else {
            state.tasks.push(task);
        }
    }

    /// Removes and returns the task with `id`.
    #[must_use = "the removed task is returned"]
    pub fn remove(&self, id: TaskId) -> Option<Task> {
        let mut state = self.state.write();
        let position = state.tasks.iter().position(|task| task.id() == id)?;
        Some(state.tasks.remove(position))
    }

    /// Returns a copy of the task with `id`.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<Task> {
        self.state
            .read()
            .tasks
            .iter()
            .find(|task| task.id() == id)
            .cloned()
    }

    /// Returns whether a task with `id` is loaded.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.state.read().tasks.iter().any(|task| task.id() == id)
    }

    /// Returns every task in collection order.
    #[must_use]
    pub fn all(&self) -> Vec<Task> {
        self.state.read().tasks.clone()
    }

    /// Returns the tasks with `status`, in collection order.
    #[must_use]
    pub fn by_status(&self, status: TaskStatus) -> Vec<Task> {
        self.filtered(|task| task.status() == status)
    }

    /// Returns the tasks whose parent is `id`, in collection order.
    #[must_use]
    pub fn children(&self, id: TaskId) -> Vec<Task> {
        self.filtered(|task| task.parent_task() == Some(id))
    }

    /// Returns every task except the one with `id`, in collection order.
    #[must_use]
    pub fn all_except(&self, id: TaskId) -> Vec<Task> {
        self.filtered(|task| task.id() != id)
    }

    /// Returns the loaded users.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.state.read().users.clone()
    }

    /// Returns the number of loaded tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().tasks.len()
    }

    /// Returns whether no task is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().tasks.is_empty()
    }

    /// Copies the full task collection.
    #[must_use]
    pub fn snapshot(&self) -> TaskSnapshot {
        TaskSnapshot(self.all())
    }

    /// Replaces the task collection with `snapshot` verbatim.
    pub fn restore(&self, snapshot: TaskSnapshot) {
        self.state.write().tasks = snapshot.0;
    }

    fn filtered(&self, keep: impl Fn(&Task) -> bool) -> Vec<Task> {
        self.state
            .read()
            .tasks
            .iter()
            .filter(|task| keep(task))
            .cloned()
            .collect()
    }
}
