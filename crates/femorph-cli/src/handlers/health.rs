//! Health command handler.

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the health command.
pub async fn execute(ctx: &CliContext) -> Result<(), CliError> {
    ctx.session().health().await?;
    println!("Application Healthy");
    Ok(())
}
