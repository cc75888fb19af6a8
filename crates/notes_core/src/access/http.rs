//! REST client for the task service.
//!
//! # Responsibility
//! - Map `TaskAccess` operations onto the `api/tasks` endpoints.
//! - Translate HTTP statuses into `TaskAccessError` categories.
//!
//! # Invariants
//! - Exactly one request per call; no retry.
//! - Every call emits one `task_access` log event with duration and outcome.

use super::payload::TaskPayload;
use super::{AccessResult, TaskAccess, TaskAccessError, TaskSort};
use crate::config::ClientConfig;
use crate::model::task::{Task, TaskId};
use async_trait::async_trait;
use log::{info, warn};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use std::time::Instant;

const TASKS_PATH: &str = "api/tasks";

/// `TaskAccess` over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpTaskAccess {
    client: Client,
    base_url: Url,
}

impl HttpTaskAccess {
    /// Builds a client for the configured service.
    pub fn new(config: &ClientConfig) -> AccessResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| TaskAccessError::Transport(format!("client setup failed: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Returns the service root all endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> AccessResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| TaskAccessError::Transport(format!("invalid endpoint `{path}`: {err}")))
    }

    fn task_endpoint(&self, id: TaskId, suffix: Option<&str>) -> AccessResult<Url> {
        match suffix {
            Some(suffix) => self.endpoint(&format!("{TASKS_PATH}/{id}/{suffix}")),
            None => self.endpoint(&format!("{TASKS_PATH}/{id}")),
        }
    }

    /// Sends one request and returns the success body text.
    async fn execute(
        &self,
        op: &'static str,
        id: Option<TaskId>,
        request: RequestBuilder,
    ) -> AccessResult<String> {
        let started_at = Instant::now();

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    "event=task_access module=access op={} status=error duration_ms={} error_code=transport error={}",
                    op,
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(TaskAccessError::Transport(err.to_string()));
            }
        };

        let http_status = response.status();
        let body = response.text().await.map_err(|err| {
            warn!(
                "event=task_access module=access op={} status=error http_status={} duration_ms={} error_code=body_read",
                op,
                http_status.as_u16(),
                started_at.elapsed().as_millis()
            );
            TaskAccessError::Transport(err.to_string())
        })?;

        if http_status.is_success() {
            info!(
                "event=task_access module=access op={} status=ok http_status={} duration_ms={}",
                op,
                http_status.as_u16(),
                started_at.elapsed().as_millis()
            );
            return Ok(body);
        }

        let err = map_error_status(http_status, &body, id);
        warn!(
            "event=task_access module=access op={} status=error http_status={} duration_ms={} error={}",
            op,
            http_status.as_u16(),
            started_at.elapsed().as_millis(),
            err
        );
        Err(err)
    }

    async fn execute_task(
        &self,
        op: &'static str,
        id: Option<TaskId>,
        request: RequestBuilder,
    ) -> AccessResult<Task> {
        let body = self.execute(op, id, request).await?;
        decode_task(&body)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("Accept", "application/json")
    }
}

#[async_trait]
impl TaskAccess for HttpTaskAccess {
    async fn list(&self, sort: Option<TaskSort>) -> AccessResult<Vec<Task>> {
        let mut url = self.endpoint(TASKS_PATH)?;
        if let Some(sort) = sort {
            url.query_pairs_mut().append_pair("sort", sort.as_query());
        }

        let body = self.execute("list", None, self.request(Method::GET, url)).await?;
        let payloads: Vec<TaskPayload> = serde_json::from_str(&body)
            .map_err(|err| TaskAccessError::Decode(err.to_string()))?;
        Ok(payloads.into_iter().map(TaskPayload::into_task).collect())
    }

    async fn get(&self, id: TaskId) -> AccessResult<Task> {
        let url = self.task_endpoint(id, None)?;
        self.execute_task("get", Some(id), self.request(Method::GET, url))
            .await
    }

    async fn create(&self, task: &Task) -> AccessResult<Task> {
        let url = self.endpoint(TASKS_PATH)?;
        let request = self
            .request(Method::POST, url)
            .json(&TaskPayload::for_create(task));
        self.execute_task("create", None, request).await
    }

    async fn update(&self, task: &Task) -> AccessResult<Task> {
        let id = task.id.ok_or(TaskAccessError::MissingId)?;
        let url = self.task_endpoint(id, None)?;
        let request = self
            .request(Method::PUT, url)
            .json(&TaskPayload::from_task(task));
        self.execute_task("update", Some(id), request).await
    }

    async fn delete(&self, id: TaskId) -> AccessResult<()> {
        let url = self.task_endpoint(id, None)?;
        self.execute("delete", Some(id), self.request(Method::DELETE, url))
            .await
            .map(|_| ())
    }

    async fn complete(&self, id: TaskId) -> AccessResult<Task> {
        let url = self.task_endpoint(id, Some("complete"))?;
        self.execute_task("complete", Some(id), self.request(Method::PATCH, url))
            .await
    }

    async fn uncomplete(&self, id: TaskId) -> AccessResult<Task> {
        let url = self.task_endpoint(id, Some("uncomplete"))?;
        self.execute_task("uncomplete", Some(id), self.request(Method::PATCH, url))
            .await
    }
}

fn decode_task(body: &str) -> AccessResult<Task> {
    serde_json::from_str::<TaskPayload>(body)
        .map(TaskPayload::into_task)
        .map_err(|err| TaskAccessError::Decode(err.to_string()))
}

/// Maps a non-success HTTP status to an error category.
///
/// The task service answers a missing id with 400 and a "not found" message,
/// so that combination is reported as `NotFound` for id-addressed calls.
fn map_error_status(status: StatusCode, body: &str, id: Option<TaskId>) -> TaskAccessError {
    match status {
        StatusCode::NOT_FOUND => TaskAccessError::NotFound(id),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let message = server_message(body);
            if id.is_some() && message.as_deref().is_some_and(is_not_found_message) {
                return TaskAccessError::NotFound(id);
            }
            TaskAccessError::Validation {
                status: status.as_u16(),
                message,
            }
        }
        other => TaskAccessError::Server {
            status: other.as_u16(),
        },
    }
}

fn is_not_found_message(message: &str) -> bool {
    message.to_lowercase().contains("not found")
}

/// Extracts the human-readable message of an error body.
///
/// Prefers a non-blank JSON `message` field, then the non-blank raw body.
fn server_message(body: &str) -> Option<String> {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::trim)
                .filter(|message| !message.is_empty())
                .map(str::to_string)
        });

    from_json.or_else(|| {
        let trimmed = body.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}
