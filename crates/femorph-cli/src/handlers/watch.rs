//! Watch command handler.

use femorph_core::TaskId;

use super::login;
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the watch command.
///
/// Blocks until `task_id` completes or fails. There is no timeout.
pub async fn execute(ctx: &CliContext, task_id: TaskId) -> Result<(), CliError> {
    let session = login(ctx).await?;
    ctx.watcher()
        .wait_for_completion(task_id, &session.user_id)
        .await?;
    println!("Task {task_id} completed");
    Ok(())
}
