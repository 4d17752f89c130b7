//! Core domain types, the task watch protocol and port definitions for
//! femorph clients.
//!
//! This crate performs no network I/O. Adapters implement the traits in
//! [`ports`]; the pure frame protocol in [`watch`] is shared by every watcher
//! implementation.
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod watch;

// Re-export commonly used types for convenience
pub use domain::{
    ArtifactId, ArtifactKind, Session, TaskId, TaskStatus, TaskUpdate, UNKNOWN_ERROR, UpdateError,
};
pub use ports::{FemorphError, FemorphResult, SessionPort, TaskWatcherPort};
pub use watch::{FrameOutcome, handle_frame};
