//! Task service access contract and its HTTP implementation.
//!
//! # Responsibility
//! - Define the operation set a task backend must offer (`TaskAccess`).
//! - Define the failure categories callers present to users.
//! - Provide the REST client used by the mobile app (`HttpTaskAccess`).
//!
//! # Invariants
//! - No retry, backoff or request deduplication happens at this layer.
//! - Display status is never sent; it is derived client-side.
//! - A cancelled `update`/`complete`/`uncomplete` has an unknown outcome;
//!   callers re-fetch to confirm.

mod http;
mod payload;

pub use http::HttpTaskAccess;
pub use payload::TaskPayload;

use crate::model::task::{LabelError, Task, TaskId};
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub type AccessResult<T> = Result<T, TaskAccessError>;

/// Server-side list ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskSort {
    /// Earliest deadline first.
    Deadline,
    /// Newest first.
    Created,
}

impl TaskSort {
    /// Value of the `sort` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            Self::Deadline => "deadline",
            Self::Created => "created",
        }
    }
}

impl FromStr for TaskSort {
    type Err = LabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "deadline" => Ok(Self::Deadline),
            "created" => Ok(Self::Created),
            _ => Err(LabelError {
                kind: "sort",
                value: value.to_string(),
            }),
        }
    }
}

/// Failure categories of task service calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAccessError {
    /// Service rejected the payload (HTTP 400/422).
    Validation { status: u16, message: Option<String> },
    /// Referenced task does not exist.
    NotFound(Option<TaskId>),
    /// `update` was called for a task that has no id yet.
    MissingId,
    /// Any other non-success HTTP status.
    Server { status: u16 },
    /// Service unreachable or request could not be sent.
    Transport(String),
    /// Success response whose body could not be read.
    Decode(String),
}

impl TaskAccessError {
    /// Message suitable for an error dialog.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation {
                status,
                message: Some(message),
            } => format!("{status}: {message}"),
            Self::Validation {
                status,
                message: None,
            } => format!("request rejected (HTTP {status})"),
            Self::NotFound(_) => "note not found".to_string(),
            Self::MissingId => "note has not been saved yet".to_string(),
            Self::Server { status } => format!("server error: {status}"),
            Self::Transport(_) | Self::Decode(_) => "unexpected error, please retry".to_string(),
        }
    }

    /// Whether repeating the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Server { status } => *status >= 500,
            _ => false,
        }
    }
}

impl Display for TaskAccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { status, message } => match message {
                Some(message) => write!(f, "request rejected with HTTP {status}: {message}"),
                None => write!(f, "request rejected with HTTP {status}"),
            },
            Self::NotFound(Some(id)) => write!(f, "task not found: {id}"),
            Self::NotFound(None) => write!(f, "task not found"),
            Self::MissingId => write!(f, "task id is required for update"),
            Self::Server { status } => write!(f, "task service returned HTTP {status}"),
            Self::Transport(message) => write!(f, "transport error: {message}"),
            Self::Decode(message) => write!(f, "invalid task service response: {message}"),
        }
    }
}

impl Error for TaskAccessError {}

/// Operations a task backend exposes over the network boundary.
#[async_trait]
pub trait TaskAccess: Send + Sync {
    /// Lists tasks, optionally in a server-defined order.
    async fn list(&self, sort: Option<TaskSort>) -> AccessResult<Vec<Task>>;
    /// Gets one task by id.
    async fn get(&self, id: TaskId) -> AccessResult<Task>;
    /// Creates a task; any id on `task` is ignored. Returns the stored task.
    async fn create(&self, task: &Task) -> AccessResult<Task>;
    /// Replaces the editable fields of an existing task.
    async fn update(&self, task: &Task) -> AccessResult<Task>;
    /// Deletes a task.
    async fn delete(&self, id: TaskId) -> AccessResult<()>;
    /// Marks a task completed.
    async fn complete(&self, id: TaskId) -> AccessResult<Task>;
    /// Marks a task open again.
    async fn uncomplete(&self, id: TaskId) -> AccessResult<Task>;
}
