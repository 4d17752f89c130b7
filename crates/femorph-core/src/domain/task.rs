//! Task domain types.
//!
//! A task is the server-side morph job. The client never creates or mutates
//! tasks; it only observes the updates the server pushes for them.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Server-issued task identifier.
pub type TaskId = Uuid;

/// Fallback message for a failed task that carries no error text.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Status of a server-side task.
///
/// Only `completed` and `failed` are terminal. Statuses the client does not
/// know are preserved verbatim in [`TaskStatus::Other`] and treated as
/// non-terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    /// Queued on the server.
    Pending,
    /// Being processed.
    Running,
    /// Finished successfully.
    Completed,
    /// Finished with an error.
    Failed,
    /// Any status string not listed above.
    Other(String),
}

impl TaskStatus {
    /// Parse a wire status string.
    pub fn parse(s: &str) -> Self {
        match s {
            "pending" => Self::Pending,
            "running" => Self::Running,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            other => Self::Other(other.to_string()),
        }
    }

    /// Wire representation of this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Other(s) => s,
        }
    }

    /// Whether the task can no longer change.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors decoding a `task_update` payload.
///
/// These are recoverable: the watcher logs them and keeps listening.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The payload did not have the expected shape.
    #[error("Invalid task update format: {0}")]
    Decode(#[from] serde_json::Error),

    /// `task_id` was not a valid UUID.
    #[error("Invalid task id '{value}': {source}")]
    InvalidTaskId {
        /// The raw task id string.
        value: String,
        /// Underlying parse error.
        source: uuid::Error,
    },

    /// `updatedAt` was not an ISO-8601 timestamp.
    #[error("Invalid updatedAt timestamp '{value}'")]
    InvalidTimestamp {
        /// The raw timestamp string.
        value: String,
    },

    /// The frame had no `payload` object.
    #[error("Task update has no payload")]
    MissingPayload,
}

/// Wire shape of a `task_update` payload.
#[derive(Debug, Deserialize)]
struct RawTaskUpdate {
    task_id: String,
    status: String,
    #[serde(rename = "updatedAt")]
    updated_at: String,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

/// A decoded task status update.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskUpdate {
    /// Task the update refers to.
    pub task_id: TaskId,
    /// New status.
    pub status: TaskStatus,
    /// When the server recorded the change.
    pub updated_at: DateTime<Utc>,
    /// Opaque result payload, if any.
    pub result: Option<Value>,
    /// Server error text, if any.
    pub error: Option<String>,
}

impl TaskUpdate {
    /// Decode a `task_update` payload object.
    pub fn from_payload(payload: &Value) -> Result<Self, UpdateError> {
        let raw = RawTaskUpdate::deserialize(payload)?;

        let task_id = Uuid::parse_str(&raw.task_id).map_err(|source| UpdateError::InvalidTaskId {
            value: raw.task_id.clone(),
            source,
        })?;
        let updated_at = parse_timestamp(&raw.updated_at).ok_or_else(|| {
            UpdateError::InvalidTimestamp {
                value: raw.updated_at.clone(),
            }
        })?;

        Ok(Self {
            task_id,
            status: TaskStatus::parse(&raw.status),
            updated_at,
            result: raw.result,
            error: raw.error.and_then(error_text),
        })
    }

    /// Error text to report for a failed task.
    pub fn error_message(&self) -> &str {
        match self.error.as_deref() {
            Some(msg) if !msg.is_empty() => msg,
            _ => UNKNOWN_ERROR,
        }
    }
}

/// Render the `error` field as text. Non-string values are kept as JSON.
fn error_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 timestamp.
///
/// Seconds are optional, offsets may be written `+00:00`, `+0000` or `Z`,
/// and offset-less timestamps are taken as UTC. A bare date is midnight UTC.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = s.strip_suffix('Z').unwrap_or(s);
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(naive, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}
