//! Shared world state for task board BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::task::{
    adapters::memory::{InMemoryTaskGateway, RecordingNotifier},
    domain::{TaskId, TaskStatus},
    services::{MutationError, TaskBoard},
};

/// Board type used by the BDD world.
pub type TestBoard = TaskBoard<InMemoryTaskGateway, RecordingNotifier, DefaultClock>;

/// Scenario world for task board behaviour tests.
pub struct TaskBoardWorld {
    pub gateway: Arc<InMemoryTaskGateway>,
    pub notifier: Arc<RecordingNotifier>,
    pub board: Option<TestBoard>,
    pub last_error: Option<MutationError>,
}

impl TaskBoardWorld {
    /// Creates a world with an empty backend and no open board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gateway: Arc::new(InMemoryTaskGateway::new()),
            notifier: Arc::new(RecordingNotifier::new()),
            board: None,
            last_error: None,
        }
    }

    /// Returns the open board.
    ///
    /// # Errors
    ///
    /// Returns an error when no board has been opened in the scenario.
    pub fn board(&self) -> Result<&TestBoard, eyre::Report> {
        self.board
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no board opened in scenario world"))
    }

    /// Returns the open board mutably.
    ///
    /// # Errors
    ///
    /// Returns an error when no board has been opened in the scenario.
    pub fn board_mut(&mut self) -> Result<&mut TestBoard, eyre::Report> {
        self.board
            .as_mut()
            .ok_or_else(|| eyre::eyre!("no board opened in scenario world"))
    }
}

impl Default for TaskBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskBoardWorld {
    TaskBoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a status named in a scenario.
///
/// # Errors
///
/// Returns an error when the status is not one of the board columns.
pub fn parse_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

/// Builds a task identifier named in a scenario.
///
/// # Errors
///
/// Returns an error for zero.
pub fn parse_task_id(raw: u64) -> Result<TaskId, eyre::Report> {
    TaskId::new(raw).map_err(|err| eyre::eyre!("invalid task id in scenario: {err}"))
}
