//! Tracing subscriber setup.
//!
//! The filter is read from `TASKBOARD_LOG` using `EnvFilter` directive
//! syntax and defaults to `info`.

use thiserror::Error;
use tracing::debug;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Environment variable holding the log filter directives.
pub const LOG_FILTER_VAR: &str = "TASKBOARD_LOG";

const DEFAULT_FILTER: &str = "info";

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// `TASKBOARD_LOG` holds directives `EnvFilter` cannot parse.
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),

    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Installs the global subscriber, emitting JSON lines when `json` is set.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] for unparsable directives and
/// [`TelemetryError::Install`] when a subscriber is already installed.
pub fn init_tracing(json: bool) -> Result<(), TelemetryError> {
    let filter = match std::env::var(LOG_FILTER_VAR) {
        Ok(directives) => EnvFilter::try_new(directives)
            .map_err(|err| TelemetryError::InvalidFilter(err.to_string()))?,
        Err(_) => EnvFilter::new(DEFAULT_FILTER),
    };
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    };
    installed.map_err(|err| TelemetryError::Install(err.to_string()))?;

    debug!(json, "tracing initialised");
    Ok(())
}
