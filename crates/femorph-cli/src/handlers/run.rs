//! Run command handler: the end-to-end morph workflow.
//!
//! health → authenticate → (clear) → upload mesh → upload surface → morph →
//! wait for completion → download → verify. Any failing step ends the run.

use std::path::PathBuf;

use femorph_core::ArtifactKind;
use tracing::info;

use super::login;
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Arguments for the run command.
#[derive(Debug, Clone)]
pub struct RunArgs {
    pub fem: PathBuf,
    pub surface: PathBuf,
    pub output: PathBuf,
    pub clear: bool,
}

/// Execute the run command.
///
/// Prints `Application Healthy` once the service answers and `PASS` when the
/// morphed node block has been written to `args.output`.
pub async fn execute(ctx: &CliContext, args: &RunArgs) -> Result<(), CliError> {
    let session_port = ctx.session();

    session_port.health().await?;
    println!("Application Healthy");

    let session = login(ctx).await?;

    if args.clear {
        session_port.clear_user_data(&session).await?;
    }

    let fem = session_port
        .upload_file(&args.fem, ArtifactKind::Fem, &session)
        .await?;
    let surface = session_port
        .upload_file(&args.surface, ArtifactKind::Surface, &session)
        .await?;

    let task_id = session_port.trigger_morph(&fem, &surface, &session).await?;
    ctx.watcher()
        .wait_for_completion(task_id, &session.user_id)
        .await?;
    info!(task_id = %task_id, "Morph task completed");

    let bytes = session_port
        .download_result(&fem, &args.output, &session)
        .await?;

    let metadata = tokio::fs::metadata(&args.output).await.map_err(|e| {
        CliError::Io(format!(
            "output {} missing after download: {e}",
            args.output.display()
        ))
    })?;
    if !metadata.is_file() {
        return Err(CliError::Io(format!(
            "output {} is not a file",
            args.output.display()
        )));
    }
    info!(bytes, output = %args.output.display(), "Result verified");

    println!("PASS");
    Ok(())
}
