//! CLI entry point - the composition root.
//!
//! Loads configuration, bootstraps the adapters and dispatches to the
//! command handlers. Failures are logged and turned into the process exit
//! code.

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use femorph_cli::handlers::run::RunArgs;
use femorph_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

async fn dispatch(command: Commands) -> Result<(), CliError> {
    let config = CliConfig::from_env()?;
    let ctx = bootstrap(config)?;

    match command {
        Commands::Run {
            fem,
            surface,
            output,
            clear,
        } => {
            let args = RunArgs {
                fem,
                surface,
                output,
                clear,
            };
            handlers::run::execute(&ctx, &args).await
        }
        Commands::Health => handlers::health::execute(&ctx).await,
        Commands::Watch { task_id } => handlers::watch::execute(&ctx, task_id).await,
        Commands::CreateUser { email, password } => {
            handlers::create_user::execute(&ctx, &email, &password).await
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(cli.default_log_level()))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = dispatch(cli.command).await {
        error!(exit_code = err.exit_code(), "{err}");
        std::process::exit(err.exit_code());
    }

    Ok(())
}
