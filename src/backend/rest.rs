//! REST backend implementation for the management API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{Backend, BackendError, BackendItem, BackendLane, BackendProject, MoveArgs};
use crate::config::Config;

/// Extract a human-readable message from a JSON error body.
///
/// Tries `message`, then `error`, then falls back to the raw body.
fn extract_error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = json.get("message").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
        if let Some(err) = json.get("error").and_then(|v| v.as_str()) {
            return err.to_string();
        }
    }
    body.to_string()
}

/// Wire representation of a project.
#[derive(Debug, Deserialize)]
struct ApiProject {
    id: String,
    name: String,
}

/// Wire representation of a task status (board column).
#[derive(Debug, Deserialize)]
struct ApiTaskStatus {
    id: String,
    name: String,
    rank: i32,
}

/// Wire representation of a task.
#[derive(Debug, Deserialize)]
struct ApiTask {
    id: String,
    title: String,
    description: Option<String>,
    project_id: String,
    status_id: String,
    assignee: Option<String>,
    due_date: Option<String>,
    priority: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    created_at: Option<String>,
    board_position: Option<i32>,
}

/// Request body for the move endpoint.
#[derive(Debug, Serialize)]
struct MoveBody<'a> {
    status_id: &'a str,
    board_position: usize,
}

/// REST backend talking to the management API.
pub struct RestBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RestBackend {
    /// Create a new REST backend for the given base URL.
    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Other(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Create a REST backend from application configuration.
    ///
    /// The API token is read from the environment variable named in the
    /// config; requests go out unauthenticated when it is unset.
    pub fn from_config(config: &Config) -> Result<Self, BackendError> {
        let token = std::env::var(&config.api.token_env).ok();
        Self::new(
            config.api.base_url.clone(),
            token,
            Duration::from_secs(config.sync.request_timeout_seconds),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token when one is configured.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Map an HTTP response to a `BackendError` based on status code.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body);

        match status.as_u16() {
            401 | 403 => Err(BackendError::Auth(message)),
            404 => Err(BackendError::NotFound(message)),
            400 | 409 | 422 => Err(BackendError::InvalidData(message)),
            _ => Err(BackendError::Other(format!("HTTP {}: {}", status.as_u16(), message))),
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, BackendError> {
        let response = self
            .authorize(self.client.get(self.url(path)))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Self::check_response(response)
            .await?
            .json::<T>()
            .await
            .map_err(|e| BackendError::InvalidData(e.to_string()))
    }

    // Helper: Transform API project -> Backend project
    fn project_to_backend(api_project: &ApiProject) -> BackendProject {
        BackendProject {
            remote_id: api_project.id.clone(),
            name: api_project.name.clone(),
        }
    }

    // Helper: Transform API status -> Backend lane
    fn status_to_backend(api_status: &ApiTaskStatus) -> BackendLane {
        BackendLane {
            remote_id: api_status.id.clone(),
            name: api_status.name.clone(),
            order_index: api_status.rank,
        }
    }

    // Helper: Transform API task -> Backend item
    fn task_to_backend(api_task: &ApiTask) -> BackendItem {
        BackendItem {
            remote_id: api_task.id.clone(),
            title: api_task.title.clone(),
            description: api_task.description.clone(),
            project_remote_id: api_task.project_id.clone(),
            lane_remote_id: api_task.status_id.clone(),
            assignee: api_task.assignee.clone(),
            due_date: api_task.due_date.clone(),
            priority: api_task.priority.clone(),
            tags: api_task.tags.clone(),
            created_at: api_task.created_at.clone(),
            order_index: api_task.board_position,
        }
    }
}

#[async_trait]
impl Backend for RestBackend {
    fn backend_type(&self) -> &str {
        "rest"
    }

    async fn fetch_project(&self, project_remote_id: &str) -> Result<BackendProject, BackendError> {
        let project: ApiProject = self.get_json(&format!("/api/projects/{project_remote_id}")).await?;
        Ok(Self::project_to_backend(&project))
    }

    async fn fetch_lanes(&self) -> Result<Vec<BackendLane>, BackendError> {
        let statuses: Vec<ApiTaskStatus> = self.get_json("/api/task-statuses").await?;
        Ok(statuses.iter().map(Self::status_to_backend).collect())
    }

    async fn fetch_items(&self, project_remote_id: &str) -> Result<Vec<BackendItem>, BackendError> {
        let tasks: Vec<ApiTask> = self.get_json(&format!("/api/projects/{project_remote_id}/tasks")).await?;
        Ok(tasks.iter().map(Self::task_to_backend).collect())
    }

    async fn submit_move(&self, item_remote_id: &str, args: MoveArgs) -> Result<(), BackendError> {
        let body = MoveBody {
            status_id: &args.dest_lane_remote_id,
            board_position: args.dest_index,
        };

        let response = self
            .authorize(self.client.put(self.url(&format!("/api/tasks/{item_remote_id}/move"))))
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Self::check_response(response).await?;
        Ok(())
    }
}
