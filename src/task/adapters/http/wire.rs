//! JSON wire records for the REST endpoints.
//!
//! Task payloads are loose: `responsible` and `parent_task` arrive either as
//! nested objects or as raw identifiers (numbers or numeric strings), and
//! `due_date` arrives as epoch seconds or as a date string. Decoding
//! normalises every form into domain values.

use serde::{Deserialize, Serialize};

use crate::task::{
    domain::{
        Assignee, DueDate, PersistedTaskData, Task, TaskFields, TaskId, TaskStatus, User, UserId,
    },
    ports::{GatewayError, GatewayResult},
};

/// Reference to another entity, embedded or by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireRef {
    /// Raw numeric identifier.
    Id(u64),
    /// Identifier rendered as a string, possibly empty.
    Text(String),
    /// Embedded record.
    Object {
        /// Identifier of the embedded record.
        id: u64,
        /// Given name, present for embedded users.
        #[serde(default)]
        firstname: Option<String>,
        /// Family name, present for embedded users.
        #[serde(default)]
        lastname: Option<String>,
    },
}

impl WireRef {
    fn id(&self) -> GatewayResult<Option<u64>> {
        match self {
            Self::Id(id) | Self::Object { id, .. } => Ok(Some(*id)),
            Self::Text(text) if text.trim().is_empty() => Ok(None),
            Self::Text(text) => text
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| GatewayError::Decode(format!("invalid reference '{text}'"))),
        }
    }

    fn into_assignee(self) -> GatewayResult<Option<Assignee>> {
        let Some(raw) = self.id()? else {
            return Ok(None);
        };
        let id = UserId::new(raw).map_err(decode)?;
        match self {
            Self::Object {
                firstname,
                lastname,
                ..
            } if firstname.is_some() || lastname.is_some() => Ok(Some(Assignee::from_user(
                &User::new(id, firstname.unwrap_or_default(), lastname.unwrap_or_default()),
            ))),
            _ => Ok(Some(Assignee::from_id(id))),
        }
    }

    fn into_task_id(self) -> GatewayResult<Option<TaskId>> {
        self.id()?
            .map(|raw| TaskId::new(raw).map_err(decode))
            .transpose()
    }
}

/// Due date as transmitted: epoch seconds or a date string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireDate {
    /// Seconds since the Unix epoch.
    Seconds(i64),
    /// `YYYY-MM-DD` or RFC 3339 text.
    Text(String),
}

impl WireDate {
    fn into_due_date(self) -> GatewayResult<Option<DueDate>> {
        let parsed = match self {
            Self::Seconds(seconds) => DueDate::from_epoch_seconds(seconds).map(Some),
            Self::Text(text) if text.trim().is_empty() => Ok(None),
            Self::Text(text) => DueDate::parse(&text).map(Some),
        };
        parsed.map_err(decode)
    }
}

/// Task record returned by `GET tasks`, `POST tasks` and `PUT tasks/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskRecord {
    /// Backend identifier.
    pub id: u64,
    /// Display title; required and non-blank.
    #[serde(default)]
    pub label: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Responsible user.
    #[serde(default)]
    pub responsible: Option<WireRef>,
    /// Due date.
    #[serde(default)]
    pub due_date: Option<WireDate>,
    /// Parent task.
    #[serde(default)]
    pub parent_task: Option<WireRef>,
    /// Lifecycle status; absent means `todo`.
    #[serde(default)]
    pub status: Option<String>,
}

impl TaskRecord {
    /// Normalises the record into a domain task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Decode`] for zero identifiers, missing or
    /// blank labels, unparseable references or dates, and unknown statuses.
    pub fn into_task(self) -> GatewayResult<Task> {
        let label = self
            .label
            .filter(|label| !label.trim().is_empty())
            .ok_or_else(|| GatewayError::Decode(format!("task {} has no label", self.id)))?;
        let status = self
            .status
            .as_deref()
            .map(TaskStatus::try_from)
            .transpose()
            .map_err(decode)?
            .unwrap_or_default();
        Ok(Task::from_persisted(PersistedTaskData {
            id: TaskId::new(self.id).map_err(decode)?,
            label,
            description: self.description.unwrap_or_default(),
            responsible: self
                .responsible
                .map(WireRef::into_assignee)
                .transpose()?
                .flatten(),
            due_date: self
                .due_date
                .map(WireDate::into_due_date)
                .transpose()?
                .flatten(),
            parent_task: self
                .parent_task
                .map(WireRef::into_task_id)
                .transpose()?
                .flatten(),
            status,
        }))
    }
}

/// User record returned by `GET users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    /// Backend identifier.
    pub id: u64,
    /// Given name.
    #[serde(default)]
    pub firstname: Option<String>,
    /// Family name.
    #[serde(default)]
    pub lastname: Option<String>,
}

impl UserRecord {
    /// Normalises the record into a domain user.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Decode`] for a zero identifier.
    pub fn into_user(self) -> GatewayResult<User> {
        Ok(User::new(
            UserId::new(self.id).map_err(decode)?,
            self.firstname.unwrap_or_default(),
            self.lastname.unwrap_or_default(),
        ))
    }
}

/// User record with embedded tasks returned by `GET users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserWithTasksRecord {
    /// Backend identifier.
    pub id: u64,
    /// Given name.
    #[serde(default)]
    pub firstname: Option<String>,
    /// Family name.
    #[serde(default)]
    pub lastname: Option<String>,
    /// Tasks the user is responsible for.
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

/// Body of `POST tasks` and `PUT tasks/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskBody {
    /// Display title.
    pub label: String,
    /// Free-text description.
    pub description: String,
    /// Responsible user identifier.
    pub responsible: Option<u64>,
    /// Due date as epoch seconds of its UTC midnight.
    pub due_date: Option<i64>,
    /// Parent task identifier.
    pub parent_task: Option<u64>,
    /// Lifecycle status.
    pub status: TaskStatus,
}

impl From<&TaskFields> for TaskBody {
    fn from(fields: &TaskFields) -> Self {
        Self {
            label: fields.label.clone(),
            description: fields.description.clone(),
            responsible: fields.responsible.map(UserId::value),
            due_date: fields.due_date.map(DueDate::epoch_seconds),
            parent_task: fields.parent_task.map(TaskId::value),
            status: fields.status,
        }
    }
}

fn decode(err: impl std::fmt::Display) -> GatewayError {
    GatewayError::Decode(err.to_string())
}
