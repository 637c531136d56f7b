//! REST gateway over `reqwest`.

use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::wire::{TaskBody, TaskRecord, UserRecord, UserWithTasksRecord};
use crate::config::BoardConfig;
use crate::task::{
    domain::{Task, TaskFields, TaskId, User, UserId},
    ports::{GatewayError, GatewayResult, TaskGateway, UserTasks},
};

/// Task gateway backed by the dashboard's REST API.
#[derive(Debug, Clone)]
pub struct HttpTaskGateway {
    client: Client,
    base_url: String,
}

impl HttpTaskGateway {
    /// Builds a gateway from the API settings in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the bearer token is not a
    /// valid header value or the HTTP client cannot be built.
    pub fn from_config(config: &BoardConfig) -> GatewayResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = config.api_token.as_deref() {
            let bearer =
                HeaderValue::from_str(&format!("Bearer {token}")).map_err(GatewayError::transport)?;
            headers.insert(AUTHORIZATION, bearer);
        }
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(GatewayError::transport)?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Returns the absolute URL of an endpoint path such as `tasks/7`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(
        request: RequestBuilder,
        not_found: GatewayError,
    ) -> GatewayResult<reqwest::Response> {
        let response = request.send().await.map_err(GatewayError::transport)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(not_found);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|err| {
                debug!(error = %err, "rejected response body unreadable");
                format!("unreadable response body: {err}")
            });
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(
        request: RequestBuilder,
        not_found: GatewayError,
    ) -> GatewayResult<T> {
        Self::send(request, not_found)
            .await?
            .json::<T>()
            .await
            .map_err(|err| GatewayError::Decode(err.to_string()))
    }
}

#[async_trait]
impl TaskGateway for HttpTaskGateway {
    async fn list_tasks(&self) -> GatewayResult<Vec<Task>> {
        let url = self.endpoint("tasks");
        debug!(%url, "fetching tasks");
        let records: Vec<TaskRecord> = Self::fetch(
            self.client.get(&url),
            GatewayError::Rejected {
                status: 404,
                message: url.clone(),
            },
        )
        .await?;
        records.into_iter().map(TaskRecord::into_task).collect()
    }

    async fn list_users(&self) -> GatewayResult<Vec<User>> {
        let url = self.endpoint("users");
        debug!(%url, "fetching users");
        let records: Vec<UserRecord> = Self::fetch(
            self.client.get(&url),
            GatewayError::Rejected {
                status: 404,
                message: url.clone(),
            },
        )
        .await?;
        records.into_iter().map(UserRecord::into_user).collect()
    }

    async fn user_with_tasks(&self, id: UserId) -> GatewayResult<UserTasks> {
        let url = self.endpoint(&format!("users/{id}"));
        debug!(%url, "fetching user with tasks");
        let record: UserWithTasksRecord =
            Self::fetch(self.client.get(&url), GatewayError::UserNotFound(id)).await?;
        let user = UserRecord {
            id: record.id,
            firstname: record.firstname,
            lastname: record.lastname,
        }
        .into_user()?;
        let tasks = record
            .tasks
            .into_iter()
            .map(TaskRecord::into_task)
            .collect::<GatewayResult<Vec<_>>>()?;
        Ok(UserTasks { user, tasks })
    }

    async fn create_task(&self, fields: &TaskFields) -> GatewayResult<Task> {
        let url = self.endpoint("tasks");
        debug!(%url, label = %fields.label, "creating task");
        let record: TaskRecord = Self::fetch(
            self.client.post(&url).json(&TaskBody::from(fields)),
            GatewayError::Rejected {
                status: 404,
                message: url.clone(),
            },
        )
        .await?;
        record.into_task()
    }

    async fn update_task(&self, id: TaskId, fields: &TaskFields) -> GatewayResult<Task> {
        let url = self.endpoint(&format!("tasks/{id}"));
        debug!(%url, status = %fields.status, "updating task");
        let record: TaskRecord = Self::fetch(
            self.client.put(&url).json(&TaskBody::from(fields)),
            GatewayError::NotFound(id),
        )
        .await?;
        record.into_task()
    }

    async fn delete_task(&self, id: TaskId) -> GatewayResult<()> {
        let url = self.endpoint(&format!("tasks/{id}"));
        debug!(%url, "deleting task");
        Self::send(self.client.delete(&url), GatewayError::NotFound(id)).await?;
        Ok(())
    }
}
