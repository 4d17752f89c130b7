//! CLI-specific error types and mappings.
//!
//! Maps `FemorphError` to exit codes and user-facing messages.

use femorph_core::FemorphError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The service or a call against it failed.
    #[error("{0}")]
    Core(String),

    /// The service could not be reached or did not report healthy.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// IO error (file not found, output missing, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,          // EX_IOERR
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<FemorphError> for CliError {
    fn from(err: FemorphError) -> Self {
        match err {
            FemorphError::Unhealthy { .. }
            | FemorphError::Network { .. }
            | FemorphError::Channel { .. } => Self::Unavailable(err.to_string()),
            FemorphError::Io { .. } => Self::Io(err.to_string()),
            FemorphError::Configuration { message } => Self::Config(message),
            FemorphError::Auth { .. }
            | FemorphError::Upload { .. }
            | FemorphError::Request { .. }
            | FemorphError::TaskFailed { .. }
            | FemorphError::InvalidResponse { .. } => Self::Core(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
