//! Session client port trait.

use std::path::Path;

use async_trait::async_trait;

use super::error::FemorphResult;
use crate::domain::{ArtifactId, ArtifactKind, Session, TaskId};

/// Port trait for the femorph request/response API.
///
/// The implementation lives in `femorph-api`. Every call is a single
/// request with no retry; any failure is returned to the caller.
#[async_trait]
pub trait SessionPort: Send + Sync {
    /// Check that the service reports `{"status": "ok"}`.
    async fn health(&self) -> FemorphResult<()>;

    /// Exchange credentials for a session.
    async fn authenticate(&self, username: &str, password: &str) -> FemorphResult<Session>;

    /// Upload a mesh or surface file and return its server id.
    async fn upload_file(
        &self,
        path: &Path,
        kind: ArtifactKind,
        session: &Session,
    ) -> FemorphResult<ArtifactId>;

    /// Start a morph job of `fem` onto `target` and return its task id.
    async fn trigger_morph(
        &self,
        fem: &ArtifactId,
        target: &ArtifactId,
        session: &Session,
    ) -> FemorphResult<TaskId>;

    /// Stream the morphed node block of `fem` into `out_path`.
    ///
    /// Returns the number of bytes written.
    async fn download_result(
        &self,
        fem: &ArtifactId,
        out_path: &Path,
        session: &Session,
    ) -> FemorphResult<u64>;

    /// Create another user with the caller's credentials.
    async fn create_user(&self, email: &str, password: &str, session: &Session)
    -> FemorphResult<()>;

    /// Delete every artifact previously uploaded by the session's user.
    async fn clear_user_data(&self, session: &Session) -> FemorphResult<()>;
}
