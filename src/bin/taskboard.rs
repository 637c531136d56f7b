//! Loads a task board through the REST API and logs each column.
//!
//! Usage:
//!
//! ```text
//! TASKBOARD_API_URL=https://hr.example.com/api taskboard
//! ```
//!
//! When `TASKBOARD_USER_ID` is set, the board is opened as that employee
//! and shows only their tasks; otherwise it is opened as a manager. The
//! remaining settings are read by [`BoardConfig::from_env`].

use mockable::DefaultClock;
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use taskboard::config::{BoardConfig, ConfigError};
use taskboard::task::adapters::{http::HttpTaskGateway, tracing_notifier::TracingNotifier};
use taskboard::task::domain::{TaskDomainError, UserId};
use taskboard::task::ports::GatewayError;
use taskboard::task::services::{BoardRole, MutationError, TaskBoard};
use taskboard::telemetry::{self, TelemetryError};

const USER_ID_VAR: &str = "TASKBOARD_USER_ID";

/// Errors that stop the binary.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Board(#[from] MutationError),
    #[error("invalid {USER_ID_VAR} '{value}': {reason}")]
    InvalidUser { value: String, reason: String },
}

fn role_from_env() -> Result<BoardRole, CliError> {
    let Ok(raw) = std::env::var(USER_ID_VAR) else {
        return Ok(BoardRole::Manager);
    };
    let parsed = raw
        .trim()
        .parse::<u64>()
        .map_err(|err| err.to_string())
        .and_then(|value| UserId::new(value).map_err(|err: TaskDomainError| err.to_string()));
    match parsed {
        Ok(user) => Ok(BoardRole::Employee(user)),
        Err(reason) => Err(CliError::InvalidUser { value: raw, reason }),
    }
}

async fn run() -> Result<(), CliError> {
    let config = BoardConfig::from_env()?;
    telemetry::init_tracing(config.json_logs)?;
    let role = role_from_env()?;
    info!(api = %config.api_base_url, ?role, "opening task board");

    let gateway = Arc::new(HttpTaskGateway::from_config(&config)?);
    let mut board = TaskBoard::new(
        role,
        gateway,
        Arc::new(TracingNotifier),
        Arc::new(DefaultClock),
    )
    .with_config(&config);
    board.load().await?;

    for column in board.columns() {
        info!(
            column = column.title,
            total = column.total,
            pages = column.total_pages,
            "column"
        );
        for task in &column.tasks {
            info!(
                id = %task.id(),
                label = task.label(),
                responsible = task.responsible().and_then(|a| a.display_name()),
                due = ?task.due_date().map(|due| due.to_string()),
                "  task"
            );
        }
    }
    board.close();
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "taskboard failed");
            ExitCode::FAILURE
        }
    }
}
