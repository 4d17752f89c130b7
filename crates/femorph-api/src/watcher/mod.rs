//! Task completion watcher.
//!
//! Waits for a task's terminal status by subscribing to the per-user
//! notification channel instead of polling. The wait survives dropped
//! connections: when the peer closes the channel before a terminal update
//! the watcher sleeps a fixed delay and subscribes again, with no attempt
//! limit and no overall timeout.

mod channel;

use std::time::Duration;

use femorph_core::watch::{FrameOutcome, handle_frame};
use femorph_core::TaskId;
use tracing::{info, warn};
use url::Url;

use crate::config::ApiClientConfig;
use crate::error::{ApiError, ApiResult};

pub use channel::{EventChannel, Inbound, Subscriber, WsChannel, WsSubscriber};

/// Default watcher over a real WebSocket connection.
pub type DefaultTaskWatcher = TaskWatcher<WsSubscriber>;

/// Summary of a finished wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchReport {
    /// Number of subscriptions opened, including the first.
    pub attempts: u32,
}

/// Waits on task updates pushed over a [`Subscriber`]'s channels.
pub struct TaskWatcher<S: Subscriber> {
    subscriber: S,
    reconnect_delay: Duration,
}

impl DefaultTaskWatcher {
    /// Create a WebSocket watcher from the client configuration.
    pub fn new(config: &ApiClientConfig) -> ApiResult<Self> {
        let base = Url::parse(&config.ws_url)?;
        Ok(Self::with_subscriber(
            WsSubscriber::new(base),
            config.reconnect_delay,
        ))
    }
}

impl<S: Subscriber> TaskWatcher<S> {
    /// Create a watcher over a custom subscriber.
    pub const fn with_subscriber(subscriber: S, reconnect_delay: Duration) -> Self {
        Self {
            subscriber,
            reconnect_delay,
        }
    }

    /// Block until `task_id` reaches a terminal status.
    ///
    /// Returns [`ApiError::TaskFailed`] if the server reports the task as
    /// failed. Channel closures are absorbed by re-subscribing; any other
    /// channel error is returned.
    pub async fn watch(&self, task_id: TaskId, user_id: &str) -> ApiResult<WatchReport> {
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            let mut channel = self.subscriber.subscribe(user_id).await?;
            info!(
                task_id = %task_id,
                user_id,
                attempt = attempts,
                "Connected to notification channel, waiting for task updates"
            );

            match listen(&mut channel, task_id).await {
                Err(ApiError::ChannelClosed) => {
                    warn!(
                        task_id = %task_id,
                        attempt = attempts,
                        delay_ms = u64::try_from(self.reconnect_delay.as_millis()).unwrap_or(u64::MAX),
                        "Notification channel lost, reconnecting"
                    );
                    tokio::time::sleep(self.reconnect_delay).await;
                }
                outcome => {
                    channel.close().await;
                    return outcome.map(|()| WatchReport { attempts });
                }
            }
        }
    }
}

/// Consume frames from one connection until the wait ends or the peer
/// closes the channel.
async fn listen<C: EventChannel>(channel: &mut C, task_id: TaskId) -> ApiResult<()> {
    loop {
        match channel.recv().await? {
            Inbound::Text(text) => match handle_frame(&text, task_id) {
                FrameOutcome::Continue => {}
                FrameOutcome::Completed => return Ok(()),
                FrameOutcome::Failed(message) => {
                    return Err(ApiError::TaskFailed { task_id, message });
                }
            },
            Inbound::Ignored => {}
            Inbound::Closed => return Err(ApiError::ChannelClosed),
        }
    }
}

// ============================================================================
// Scripted Subscriber for Testing
// ============================================================================
