//! Client adapters for the femorph web API.
//!
//! - [`FemorphClient`] issues the request/response calls: health, auth,
//!   uploads, the morph trigger and the result download.
//! - [`TaskWatcher`] waits for a task's terminal status on the per-user
//!   WebSocket notification channel, re-subscribing whenever the peer drops
//!   the connection.
//!
//! Both implement the ports defined in `femorph-core`, so callers can be
//! written against `SessionPort` / `TaskWatcherPort` and tested with fakes.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod models;
mod port;
mod url;
mod watcher;

// ============================================================================
// Public API
// ============================================================================

// Session client
pub use client::{CHUNK_SIZE, FemorphClient};

// Configuration
pub use config::{ApiClientConfig, DEFAULT_HOST};

// Errors
pub use error::{ApiError, ApiResult};

// Task watcher
pub use watcher::{
    DefaultTaskWatcher, EventChannel, Inbound, Subscriber, TaskWatcher, WatchReport, WsChannel,
    WsSubscriber,
};

// Silence unused dev-dependency warnings
#[cfg(test)]
use axum as _;
#[cfg(test)]
use pretty_assertions as _;
#[cfg(test)]
use tempfile as _;
