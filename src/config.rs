//! Board configuration loaded from the environment.

use std::time::Duration;
use thiserror::Error;

use crate::task::services::{CursorMode, PAGE_SIZE};

/// Base URL used when `TASKBOARD_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Request timeout used when `TASKBOARD_REQUEST_TIMEOUT_SECS` is unset.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const API_URL_VAR: &str = "TASKBOARD_API_URL";
const API_TOKEN_VAR: &str = "TASKBOARD_API_TOKEN";
const PAGE_SIZE_VAR: &str = "TASKBOARD_PAGE_SIZE";
const SHARED_CURSOR_VAR: &str = "TASKBOARD_SHARED_PAGE_CURSOR";
const TIMEOUT_VAR: &str = "TASKBOARD_REQUEST_TIMEOUT_SECS";
const JSON_LOGS_VAR: &str = "TASKBOARD_LOG_JSON";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value that cannot be used.
    #[error("invalid value '{value}' for {variable}: {reason}")]
    InvalidValue {
        /// Name of the offending variable.
        variable: &'static str,
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Settings for a board session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Base URL of the REST API, without trailing slash.
    pub api_base_url: String,
    /// Bearer token attached to every request, if any.
    pub api_token: Option<String>,
    /// Number of tasks per column page.
    pub page_size: usize,
    /// Whether columns page independently or share one cursor.
    pub cursor_mode: CursorMode,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Whether logs are emitted as JSON lines.
    pub json_logs: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_owned(),
            api_token: None,
            page_size: PAGE_SIZE,
            cursor_mode: CursorMode::PerColumn,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            json_logs: false,
        }
    }
}

impl BoardConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to an
    /// unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps variable names to
    /// values.
    ///
    /// Unset variables take their defaults; blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to an
    /// unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let api_base_url = read(API_URL_VAR).map_or(defaults.api_base_url, |url| {
            url.trim().trim_end_matches('/').to_owned()
        });
        let api_token = read(API_TOKEN_VAR).map(|token| token.trim().to_owned());
        let page_size = read(PAGE_SIZE_VAR)
            .map(|raw| parse_positive(PAGE_SIZE_VAR, &raw))
            .transpose()?
            .unwrap_or(defaults.page_size);
        let cursor_mode = match read(SHARED_CURSOR_VAR) {
            Some(raw) if parse_bool(SHARED_CURSOR_VAR, &raw)? => CursorMode::Shared,
            _ => CursorMode::PerColumn,
        };
        let request_timeout = read(TIMEOUT_VAR)
            .map(|raw| parse_positive(TIMEOUT_VAR, &raw))
            .transpose()?
            .map_or(defaults.request_timeout, |secs| {
                Duration::from_secs(u64::try_from(secs).unwrap_or(u64::MAX))
            });
        let json_logs = read(JSON_LOGS_VAR)
            .map(|raw| parse_bool(JSON_LOGS_VAR, &raw))
            .transpose()?
            .unwrap_or(defaults.json_logs);

        Ok(Self {
            api_base_url,
            api_token,
            page_size,
            cursor_mode,
            request_timeout,
            json_logs,
        })
    }
}

fn parse_positive(variable: &'static str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidValue {
            variable,
            value: raw.to_owned(),
            reason: "expected a positive integer",
        }),
    }
}

fn parse_bool(variable: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            variable,
            value: raw.to_owned(),
            reason: "expected a boolean",
        }),
    }
}
