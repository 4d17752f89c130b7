//! Public configuration for the femorph client.
//!
//! One `ApiClientConfig` is built at process start and handed to both the
//! session client and the task watcher; nothing in this crate reads the
//! environment.

use std::time::Duration;

/// Production API host.
pub const DEFAULT_HOST: &str = "api.femorph.com";

/// Path of the per-user notification channel, without the user id.
const SUBSCRIBE_PATH: &str = "/ws/subscribe";

/// Configuration for the femorph client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use femorph_api::ApiClientConfig;
/// use std::time::Duration;
///
/// let config = ApiClientConfig::for_host("localhost:8000", false)
///     .with_timeout(Duration::from_secs(10))
///     .with_reconnect_delay(Duration::from_millis(250));
/// ```
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for HTTP requests
    pub(crate) base_url: String,
    /// Base URL of the notification channel, without the user id
    pub(crate) ws_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Connect timeout, and whole-request timeout for non-transfer calls
    pub(crate) timeout: Duration,
    /// Fixed pause before re-subscribing after the channel drops
    pub(crate) reconnect_delay: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: format!("https://{DEFAULT_HOST}"),
            ws_url: format!("ws://{DEFAULT_HOST}{SUBSCRIBE_PATH}"),
            user_agent: concat!("femorph-api/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(60),
            reconnect_delay: Duration::from_secs(1),
        }
    }
}

impl ApiClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive both endpoints from a host name (optionally with port).
    ///
    /// `secure` selects `https` for HTTP calls. The notification channel is
    /// always addressed as `ws://{host}/ws/subscribe`.
    #[must_use]
    pub fn for_host(host: &str, secure: bool) -> Self {
        let scheme = if secure { "https" } else { "http" };
        Self {
            base_url: format!("{scheme}://{host}"),
            ws_url: format!("ws://{host}{SUBSCRIBE_PATH}"),
            ..Self::default()
        }
    }

    /// Set the base URL for HTTP requests.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the notification channel base URL (the user id is appended).
    #[must_use]
    pub fn with_ws_url(mut self, url: impl Into<String>) -> Self {
        self.ws_url = url.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the HTTP timeout.
    ///
    /// Defaults to 60 seconds. It bounds connection setup for every call and
    /// the full exchange for the JSON calls. Uploads and downloads may run
    /// longer once connected. Does not apply to the notification channel,
    /// which waits indefinitely.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the pause before re-subscribing after a dropped channel.
    ///
    /// Defaults to 1 second.
    #[must_use]
    pub const fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Base URL for HTTP requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Notification channel base URL.
    pub fn ws_url(&self) -> &str {
        &self.ws_url
    }
}
