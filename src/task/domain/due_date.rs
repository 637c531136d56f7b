//! Calendar due dates.
//!
//! Due dates carry day precision only. The persistence layer transmits them
//! as epoch seconds; inbound timestamps are truncated to their UTC day and
//! outbound values are the UTC midnight of the date.

use super::TaskDomainError;
use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Day-precision due date of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DueDate(NaiveDate);

impl DueDate {
    /// Wraps an existing calendar date.
    #[must_use]
    pub const fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Creates a due date from year, month and day.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDueDate`] when the date does not
    /// exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, TaskDomainError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| TaskDomainError::InvalidDueDate(format!("{year}-{month}-{day}")))
    }

    /// Parses a calendar date (`YYYY-MM-DD`) or an RFC 3339 timestamp.
    ///
    /// Timestamps keep only their UTC calendar day.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDueDate`] when the value matches
    /// neither format.
    pub fn parse(value: &str) -> Result<Self, TaskDomainError> {
        let trimmed = value.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Self(date));
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|timestamp| Self(timestamp.naive_utc().date()))
            .map_err(|_| TaskDomainError::InvalidDueDate(value.to_owned()))
    }

    /// Converts seconds since the Unix epoch into the UTC day containing it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDueDate`] when the timestamp is out
    /// of the representable range.
    pub fn from_epoch_seconds(seconds: i64) -> Result<Self, TaskDomainError> {
        DateTime::from_timestamp(seconds, 0)
            .map(|timestamp| Self(timestamp.date_naive()))
            .ok_or_else(|| TaskDomainError::InvalidDueDate(seconds.to_string()))
    }

    /// Returns the epoch seconds of the date's UTC midnight.
    #[must_use]
    pub fn epoch_seconds(self) -> i64 {
        self.0.and_time(NaiveTime::MIN).and_utc().timestamp()
    }

    /// Returns the calendar date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
