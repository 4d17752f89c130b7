//! Task watcher port trait.

use async_trait::async_trait;

use super::error::FemorphResult;
use crate::domain::TaskId;

/// Port trait for waiting on a task's terminal status.
#[async_trait]
pub trait TaskWatcherPort: Send + Sync {
    /// Block until `task_id` completes or fails.
    ///
    /// Returns `Ok(())` on completion and [`FemorphError::TaskFailed`] on
    /// failure. Waits without a timeout.
    ///
    /// [`FemorphError::TaskFailed`]: super::FemorphError::TaskFailed
    async fn wait_for_completion(&self, task_id: TaskId, user_id: &str) -> FemorphResult<()>;
}
