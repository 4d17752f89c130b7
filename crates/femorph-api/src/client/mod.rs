//! Session client for the femorph HTTP API.
//!
//! Every operation is a single request: non-2xx answers become typed errors
//! and nothing is retried.

mod auth;
mod files;
mod morph;

use std::time::Duration;

use reqwest::Response;
use url::Url;

use crate::config::ApiClientConfig;
use crate::error::{ApiError, ApiResult};

pub use files::CHUNK_SIZE;

/// Client for the femorph request/response API.
#[derive(Debug, Clone)]
pub struct FemorphClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: Url,
    /// Whole-request deadline for the small JSON calls. Transfers are only
    /// bounded by the connect timeout.
    pub(crate) request_timeout: Duration,
}

impl FemorphClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &ApiClientConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            base_url: Url::parse(&config.base_url)?,
            request_timeout: config.timeout,
        })
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Pass successful responses through; turn anything else into an error.
///
/// The response body is read so the server's explanation ends up in the
/// error message.
pub(crate) async fn ensure_success<F>(response: Response, on_error: F) -> ApiResult<Response>
where
    F: FnOnce(u16, String) -> ApiError,
{
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(on_error(status.as_u16(), body))
}
