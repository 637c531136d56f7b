//! Shared test helpers for in-memory task board integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::task::{
    adapters::memory::{InMemoryTaskGateway, RecordingNotifier},
    domain::{Assignee, DueDate, PersistedTaskData, Task, TaskId, TaskStatus, User, UserId},
    services::{BoardRole, TaskBoard},
};

/// Board type used by the integration tests.
pub type TestBoard = TaskBoard<InMemoryTaskGateway, RecordingNotifier, DefaultClock>;

/// Gateway and notifier shared by a test and the boards it opens.
pub struct Backend {
    /// Persistence backend.
    pub gateway: Arc<InMemoryTaskGateway>,
    /// Sink recording every notification.
    pub notifier: Arc<RecordingNotifier>,
}

impl Backend {
    /// Opens a board for `role` over this backend.
    pub fn board(&self, role: BoardRole) -> TestBoard {
        TaskBoard::new(
            role,
            Arc::clone(&self.gateway),
            Arc::clone(&self.notifier),
            Arc::new(DefaultClock),
        )
    }
}

/// Builds a task identifier, panicking on zero.
pub fn task_id(value: u64) -> TaskId {
    TaskId::new(value).expect("task ids in tests are positive")
}

/// Builds a user identifier, panicking on zero.
pub fn user_id(value: u64) -> UserId {
    UserId::new(value).expect("user ids in tests are positive")
}

/// Parses a `YYYY-MM-DD` due date.
pub fn due(raw: &str) -> DueDate {
    DueDate::parse(raw).expect("due dates in tests are valid")
}

/// Builds a task with the given identifier and status assigned to user 3.
pub fn seeded_task(id: u64, status: TaskStatus) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: task_id(id),
        label: format!("Seeded task {id}"),
        description: String::new(),
        responsible: Some(Assignee::from_id(user_id(3))),
        due_date: Some(due("2025-11-01")),
        parent_task: None,
        status,
    })
}

/// Provides a backend with two users and no tasks.
#[fixture]
pub fn empty_backend() -> Backend {
    let gateway = Arc::new(InMemoryTaskGateway::new());
    for user in [
        User::new(user_id(1), "Ada", "Lovelace"),
        User::new(user_id(3), "Grace", "Hopper"),
    ] {
        gateway.insert_user(user).expect("seed user");
    }
    Backend {
        gateway,
        notifier: Arc::new(RecordingNotifier::new()),
    }
}

/// Provides a backend holding task 7 in `todo`.
#[fixture]
pub fn backend(empty_backend: Backend) -> Backend {
    empty_backend
        .gateway
        .insert_task(seeded_task(7, TaskStatus::Todo))
        .expect("seed task");
    empty_backend
}
