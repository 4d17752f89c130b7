//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<(), CliError>`
//! - Thin wrappers that call the core ports and format terminal output.

pub mod create_user;
pub mod health;
pub mod run;
pub mod watch;

use femorph_core::Session;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Log in with the configured account.
async fn login(ctx: &CliContext) -> Result<Session, CliError> {
    Ok(ctx
        .session()
        .authenticate(&ctx.username, &ctx.password)
        .await?)
}

// ============================================================================
// Port mocks for handler tests
// ============================================================================
