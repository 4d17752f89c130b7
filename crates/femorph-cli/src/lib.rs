//! The `femorph` command-line client.
//!
//! `main.rs` is the composition root: it loads configuration, wires the
//! `femorph-api` adapters into a [`CliContext`] and dispatches to the command
//! handlers, which only talk to the core ports.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs only
use anyhow as _;
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
