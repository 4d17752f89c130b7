//! Create-user command handler.

use super::login;
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the create-user command, authorized by the configured account.
pub async fn execute(ctx: &CliContext, email: &str, password: &str) -> Result<(), CliError> {
    let session = login(ctx).await?;
    ctx.session()
        .create_user(email, password, &session)
        .await?;
    println!("User created: {email}");
    Ok(())
}
