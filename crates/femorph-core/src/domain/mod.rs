//! Domain types shared by every femorph adapter.

mod session;
mod task;

pub use session::{ArtifactId, ArtifactKind, Session};
pub use task::{TaskId, TaskStatus, TaskUpdate, UNKNOWN_ERROR, UpdateError};
