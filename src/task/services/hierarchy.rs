//! Parent and subtask relationships between loaded tasks.
//!
//! Parent links are weak: a task refers to its parent by identifier only.
//! Self-parenting is prevented where parents are chosen, through
//! [`HierarchyResolver::valid_parents`]; the store does not re-check it.

use super::TaskStore;
use crate::task::domain::{Task, TaskId};

/// Derives hierarchy views from a [`TaskStore`].
#[derive(Debug, Clone)]
pub struct HierarchyResolver {
    store: TaskStore,
}

impl HierarchyResolver {
    /// Creates a resolver reading from `store`.
    #[must_use]
    pub const fn new(store: TaskStore) -> Self {
        Self { store }
    }

    /// Returns the direct subtasks of `task`, never `task` itself.
    #[must_use]
    pub fn subtasks_of(&self, task: &Task) -> Vec<Task> {
        let id = task.id();
        self.store
            .children(id)
            .into_iter()
            .filter(|child| child.id() != id)
            .collect()
    }

    /// Returns every task that may be chosen as parent of the task with
    /// `exclude_id`.
    #[must_use]
    pub fn valid_parents(&self, exclude_id: TaskId) -> Vec<Task> {
        self.store.all_except(exclude_id)
    }

    /// Returns the loaded parent of `task`, if any.
    #[must_use]
    pub fn parent_of(&self, task: &Task) -> Option<Task> {
        task.parent_task()
            .filter(|parent| *parent != task.id())
            .and_then(|parent| self.store.get(parent))
    }

    /// Returns whether `candidate` is a loaded task other than `task_id`.
    #[must_use]
    pub fn is_valid_parent(&self, task_id: TaskId, candidate: TaskId) -> bool {
        candidate != task_id && self.store.contains(candidate)
    }
}
