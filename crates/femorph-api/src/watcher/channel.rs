//! Notification channel abstraction and its WebSocket implementation.
//!
//! The watcher loop is written against [`Subscriber`] / [`EventChannel`] so
//! it can be driven by scripted channels in tests.

use std::io::ErrorKind;

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::error::ProtocolError;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::debug;
use url::Url;

use crate::error::ApiResult;
use crate::url::build_subscribe_url;

/// One receive step on a notification channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// A text frame.
    Text(String),
    /// A frame the watcher does not interpret (binary, ping, pong).
    Ignored,
    /// The peer closed the channel.
    Closed,
}

/// A receive-only stream of server events.
#[async_trait]
pub trait EventChannel: Send {
    /// Wait for the next inbound frame.
    ///
    /// Peer closure is reported as `Ok(Inbound::Closed)`; `Err` is reserved
    /// for failures the watcher cannot recover from.
    async fn recv(&mut self) -> ApiResult<Inbound>;

    /// Close the channel. Errors are ignored.
    async fn close(&mut self);
}

/// Opens per-user notification channels.
#[async_trait]
pub trait Subscriber: Send + Sync {
    /// Channel type produced by this subscriber.
    type Channel: EventChannel;

    /// Open a fresh subscription for `user_id`.
    async fn subscribe(&self, user_id: &str) -> ApiResult<Self::Channel>;
}

// ============================================================================
// WebSocket implementation
// ============================================================================

/// Subscriber connecting to `{ws_base}/{user_id}` over WebSocket.
#[derive(Debug, Clone)]
pub struct WsSubscriber {
    base: Url,
}

impl WsSubscriber {
    /// Create a subscriber for the given channel base URL.
    pub const fn new(base: Url) -> Self {
        Self { base }
    }
}

#[async_trait]
impl Subscriber for WsSubscriber {
    type Channel = WsChannel;

    async fn subscribe(&self, user_id: &str) -> ApiResult<WsChannel> {
        let url = build_subscribe_url(&self.base, user_id);
        debug!(url = %url, "Opening notification channel");
        let (stream, _response) = connect_async(url.as_str()).await?;
        Ok(WsChannel { stream })
    }
}

/// An open WebSocket subscription.
pub struct WsChannel {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl EventChannel for WsChannel {
    async fn recv(&mut self) -> ApiResult<Inbound> {
        match self.stream.next().await {
            None => Ok(Inbound::Closed),
            Some(Ok(Message::Text(text))) => Ok(Inbound::Text(text.as_str().to_owned())),
            Some(Ok(Message::Close(frame))) => {
                debug!(frame = ?frame, "Peer sent close frame");
                Ok(Inbound::Closed)
            }
            Some(Ok(_)) => Ok(Inbound::Ignored),
            Some(Err(e)) if is_peer_closure(&e) => {
                debug!(error = %e, "Notification channel dropped");
                Ok(Inbound::Closed)
            }
            Some(Err(e)) => Err(e.into()),
        }
    }

    async fn close(&mut self) {
        if let Err(e) = self.stream.close(None).await {
            debug!(error = %e, "Error closing notification channel");
        }
    }
}

/// Whether a receive error means the peer went away rather than a protocol
/// or local failure.
fn is_peer_closure(err: &WsError) -> bool {
    match err {
        WsError::ConnectionClosed
        | WsError::AlreadyClosed
        | WsError::Protocol(ProtocolError::ResetWithoutClosingHandshake) => true,
        WsError::Io(io) => matches!(
            io.kind(),
            ErrorKind::ConnectionReset
                | ErrorKind::ConnectionAborted
                | ErrorKind::BrokenPipe
                | ErrorKind::UnexpectedEof
        ),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peer_closure_classification() {
        assert!(is_peer_closure(&WsError::ConnectionClosed));
        assert!(is_peer_closure(&WsError::AlreadyClosed));
        assert!(is_peer_closure(&WsError::Protocol(
            ProtocolError::ResetWithoutClosingHandshake
        )));
        assert!(is_peer_closure(&WsError::Io(std::io::Error::from(
            ErrorKind::ConnectionReset
        ))));
    }

    #[test]
    fn test_other_errors_are_fatal() {
        assert!(!is_peer_closure(&WsError::Io(std::io::Error::from(
            ErrorKind::PermissionDenied
        ))));
        assert!(!is_peer_closure(&WsError::Protocol(
            ProtocolError::HandshakeIncomplete
        )));
    }
}
