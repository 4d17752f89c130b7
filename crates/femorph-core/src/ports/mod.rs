//! Port definitions for external collaborators.
//!
//! The core owns these traits; `femorph-api` implements them and the CLI
//! consumes them, so handlers can be exercised against mocks.

mod error;
mod session;
mod watcher;

pub use error::{FemorphError, FemorphResult};
pub use session::SessionPort;
pub use watcher::TaskWatcherPort;
