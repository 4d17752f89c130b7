//! Port trait implementations for the femorph adapters.
//!
//! Implements the core-owned `SessionPort` for `FemorphClient` and
//! `TaskWatcherPort` for `TaskWatcher`, converting internal `ApiError`s into
//! core `FemorphError`s.

use std::path::Path;

use async_trait::async_trait;
use femorph_core::{
    ArtifactId, ArtifactKind, FemorphError, FemorphResult, Session, SessionPort, TaskId,
    TaskWatcherPort,
};

use crate::client::FemorphClient;
use crate::error::ApiError;
use crate::watcher::{Subscriber, TaskWatcher};

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `ApiError` to core `FemorphError`.
fn map_error(err: ApiError) -> FemorphError {
    match err {
        ApiError::Unhealthy { status, body } => FemorphError::Unhealthy {
            status,
            message: body,
        },
        ApiError::Auth { status, body } => FemorphError::Auth {
            status,
            message: body,
        },
        ApiError::Upload { status, body } => FemorphError::Upload {
            status,
            message: body,
        },
        ApiError::Request { status, url, body } => FemorphError::Request {
            status,
            message: format!("{url}: {body}"),
        },
        ApiError::InvalidResponse { message } => FemorphError::InvalidResponse { message },
        ApiError::TaskFailed { task_id, message } => FemorphError::TaskFailed { task_id, message },
        err @ ApiError::ChannelClosed => FemorphError::Channel {
            message: err.to_string(),
        },
        ApiError::InvalidPath { path } => FemorphError::Io {
            kind: std::io::ErrorKind::InvalidInput.to_string(),
            message: format!("no file name in path {path}"),
        },
        ApiError::Network(e) if e.is_decode() => FemorphError::InvalidResponse {
            message: e.to_string(),
        },
        ApiError::Network(e) => FemorphError::Network {
            message: e.to_string(),
        },
        ApiError::WebSocket(e) => FemorphError::Channel {
            message: e.to_string(),
        },
        ApiError::InvalidUrl(e) => FemorphError::Configuration {
            message: e.to_string(),
        },
        ApiError::JsonParse(e) => FemorphError::InvalidResponse {
            message: e.to_string(),
        },
        ApiError::Io(e) => FemorphError::from(e),
    }
}

// ============================================================================
// Port Implementations
// ============================================================================

#[async_trait]
impl SessionPort for FemorphClient {
    async fn health(&self) -> FemorphResult<()> {
        Self::health(self).await.map_err(map_error)
    }

    async fn authenticate(&self, username: &str, password: &str) -> FemorphResult<Session> {
        Self::authenticate(self, username, password)
            .await
            .map_err(map_error)
    }

    async fn upload_file(
        &self,
        path: &Path,
        kind: ArtifactKind,
        session: &Session,
    ) -> FemorphResult<ArtifactId> {
        Self::upload_file(self, path, kind, session)
            .await
            .map_err(map_error)
    }

    async fn trigger_morph(
        &self,
        fem: &ArtifactId,
        target: &ArtifactId,
        session: &Session,
    ) -> FemorphResult<TaskId> {
        Self::trigger_morph(self, fem, target, session)
            .await
            .map_err(map_error)
    }

    async fn download_result(
        &self,
        fem: &ArtifactId,
        out_path: &Path,
        session: &Session,
    ) -> FemorphResult<u64> {
        Self::download_result(self, fem, out_path, session)
            .await
            .map_err(map_error)
    }

    async fn create_user(
        &self,
        email: &str,
        password: &str,
        session: &Session,
    ) -> FemorphResult<()> {
        Self::create_user(self, email, password, session)
            .await
            .map_err(map_error)
    }

    async fn clear_user_data(&self, session: &Session) -> FemorphResult<()> {
        Self::clear_user_data(self, session).await.map_err(map_error)
    }
}

#[async_trait]
impl<S: Subscriber> TaskWatcherPort for TaskWatcher<S> {
    async fn wait_for_completion(&self, task_id: TaskId, user_id: &str) -> FemorphResult<()> {
        self.watch(task_id, user_id)
            .await
            .map(|_report| ())
            .map_err(map_error)
    }
}
