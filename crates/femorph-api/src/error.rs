//! Error types for femorph API operations.
//!
//! These errors carry transport detail. They are mapped to the core
//! `FemorphError` at the port boundary (see `port.rs`).

use femorph_core::TaskId;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Result type alias for femorph API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors related to femorph API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The health endpoint did not answer `{"status": "ok"}`.
    #[error("Application not healthy (status {status}): {body}")]
    Unhealthy {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// The auth endpoint rejected the credentials.
    #[error("Authentication failed with status {status}: {body}")]
    Auth {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// An upload was rejected.
    #[error("Upload failed with status {status}: {body}")]
    Upload {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Any other authenticated request was rejected.
    #[error("Request to {url} failed with status {status}: {body}")]
    Request {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// Response body
        body: String,
    },

    /// The API returned an invalid or unexpected response.
    #[error("Invalid response from femorph API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// The awaited task reported `failed`.
    #[error("Task {task_id} failed: {message}")]
    TaskFailed {
        /// The task that failed
        task_id: TaskId,
        /// Server error text
        message: String,
    },

    /// The peer closed the notification channel before a terminal update.
    ///
    /// Handled inside the watcher by re-subscribing.
    #[error("Notification channel closed by peer")]
    ChannelClosed,

    /// The given path has no usable file name.
    #[error("Invalid upload path: {path}")]
    InvalidPath {
        /// The offending path
        path: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// WebSocket error on the notification channel.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Local file I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
