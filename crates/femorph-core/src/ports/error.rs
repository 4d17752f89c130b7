//! Error types for femorph port operations.

use thiserror::Error;

use crate::domain::TaskId;

/// Errors from femorph port operations.
///
/// These are domain-level errors that consumers can handle.
/// Implementation-specific errors (HTTP, WebSocket, JSON) are mapped to these
/// by the adapter.
#[derive(Debug, Error)]
pub enum FemorphError {
    /// The service did not report itself healthy.
    #[error("Service unhealthy (status {status}): {message}")]
    Unhealthy {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Authentication was rejected.
    #[error("Authentication failed (status {status}): {message}")]
    Auth {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// A file upload was rejected.
    #[error("Upload failed (status {status}): {message}")]
    Upload {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Any other authenticated request was rejected.
    #[error("Request failed (status {status}): {message}")]
    Request {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// The server reported the awaited task as failed.
    #[error("Task {task_id} failed: {message}")]
    TaskFailed {
        /// The task that failed
        task_id: TaskId,
        /// Server error text, or "Unknown error"
        message: String,
    },

    /// The notification channel could not be opened or broke irrecoverably.
    #[error("Notification channel error: {message}")]
    Channel {
        /// Description of the channel error
        message: String,
    },

    /// Network or connectivity error.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
    },

    /// The server answered with an unexpected body.
    #[error("Invalid API response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// Local file I/O failed.
    #[error("I/O error ({kind}): {message}")]
    Io {
        /// The kind of I/O error
        kind: String,
        /// Detailed error message
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}

impl From<std::io::Error> for FemorphError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for femorph port operations.
pub type FemorphResult<T> = Result<T, FemorphError>;
