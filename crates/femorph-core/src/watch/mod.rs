//! Task completion protocol.
//!
//! The server pushes JSON text frames on a per-user channel:
//!
//! ```json
//! { "type": "task_update",
//!   "payload": { "task_id": "…", "status": "running", "updatedAt": "…",
//!                "result": null, "error": null } }
//! ```
//!
//! [`handle_frame`] interprets one frame against the awaited task and says
//! whether the wait is over. It performs no I/O beyond logging, so the
//! connection loop that drives it lives in the adapter crate.

mod frame;

use tracing::{error, info, warn};

use crate::domain::{TaskId, TaskStatus, TaskUpdate, UpdateError};

pub use frame::{InboundFrame, TASK_UPDATE};

/// Result of handling one inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Keep listening.
    Continue,
    /// The awaited task completed.
    Completed,
    /// The awaited task failed with the given reason.
    Failed(String),
}

impl FrameOutcome {
    /// Whether the wait ends with this outcome.
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Continue)
    }
}

/// Interpret one text frame for the task being awaited.
///
/// Frames of other types, updates for other tasks and non-terminal statuses
/// all yield [`FrameOutcome::Continue`]. Malformed frames are logged and
/// also yield `Continue`.
pub fn handle_frame(text: &str, awaited: TaskId) -> FrameOutcome {
    let frame = match InboundFrame::parse(text) {
        Ok(frame) => frame,
        Err(e) => {
            warn!(error = %e, "Invalid message format, skipping frame");
            return FrameOutcome::Continue;
        }
    };

    if !frame.is_task_update() {
        return FrameOutcome::Continue;
    }

    let update = match decode_update(&frame) {
        Ok(update) => update,
        Err(e) => {
            error!(error = %e, "Invalid task update format");
            return FrameOutcome::Continue;
        }
    };

    apply_update(&update, awaited)
}

/// Map a decoded update to an outcome for the awaited task.
pub fn apply_update(update: &TaskUpdate, awaited: TaskId) -> FrameOutcome {
    if update.task_id != awaited {
        return FrameOutcome::Continue;
    }

    info!(task_id = %awaited, status = %update.status, "Task status update");

    match update.status {
        TaskStatus::Completed => FrameOutcome::Completed,
        TaskStatus::Failed => {
            let reason = update.error_message().to_string();
            error!(task_id = %awaited, error = %reason, "Task failed");
            FrameOutcome::Failed(reason)
        }
        _ => FrameOutcome::Continue,
    }
}

fn decode_update(frame: &InboundFrame) -> Result<TaskUpdate, UpdateError> {
    let payload = frame.payload.as_ref().ok_or(UpdateError::MissingPayload)?;
    TaskUpdate::from_payload(payload)
}
