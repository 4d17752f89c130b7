//! Health, authentication and user management calls.

use femorph_core::Session;
use tracing::info;

use super::{FemorphClient, ensure_success};
use crate::error::{ApiError, ApiResult};
use crate::models::{AuthResponse, Credentials, HealthResponse};
use crate::url::{build_auth_url, build_create_user_url, build_health_url, build_user_data_url};

impl FemorphClient {
    /// Check that the service answers `{"status": "ok"}` on `/health`.
    pub async fn health(&self) -> ApiResult<()> {
        let response = self
            .http
            .get(build_health_url(&self.base_url))
            .timeout(self.request_timeout)
            .send()
            .await?;
        let status = response.status().as_u16();
        let response =
            ensure_success(response, |status, body| ApiError::Unhealthy { status, body }).await?;

        // Any 200 that is not the expected JSON still means the service is not healthy.
        let body = response.text().await?;
        let health: HealthResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Unhealthy {
                status,
                body: format!("unreadable health response: {e}"),
            })?;
        if health.status != "ok" {
            return Err(ApiError::Unhealthy {
                status,
                body: format!("reported status '{}'", health.status),
            });
        }

        info!("Application healthy");
        Ok(())
    }

    /// Exchange credentials for a user id and bearer token.
    pub async fn authenticate(&self, username: &str, password: &str) -> ApiResult<Session> {
        let response = self
            .http
            .post(build_auth_url(&self.base_url))
            .timeout(self.request_timeout)
            .json(&Credentials {
                email: username,
                password,
            })
            .send()
            .await?;
        let status = response.status().as_u16();
        let response =
            ensure_success(response, |status, body| ApiError::Auth { status, body }).await?;

        let auth: AuthResponse = response.json().await?;
        if auth.access_token.is_empty() {
            return Err(ApiError::Auth {
                status,
                body: "no access token in response".to_string(),
            });
        }

        info!(user_id = %auth.user_id, "Received access token for {username}");
        Ok(Session::new(auth.user_id, auth.access_token))
    }

    /// Create another user, authorized by an existing session.
    pub async fn create_user(&self, email: &str, password: &str, session: &Session) -> ApiResult<()> {
        let url = build_create_user_url(&self.base_url, &session.user_id);
        let response = self
            .http
            .post(url.clone())
            .timeout(self.request_timeout)
            .bearer_auth(session.access_token())
            .json(&Credentials { email, password })
            .send()
            .await?;
        ensure_success(response, |status, body| ApiError::Request {
            status,
            url: url.to_string(),
            body,
        })
        .await?;

        info!("User created: {email}");
        Ok(())
    }

    /// Delete all artifacts owned by the session's user.
    pub async fn clear_user_data(&self, session: &Session) -> ApiResult<()> {
        let url = build_user_data_url(&self.base_url, &session.user_id);
        let response = self
            .http
            .delete(url.clone())
            .timeout(self.request_timeout)
            .bearer_auth(session.access_token())
            .send()
            .await?;
        ensure_success(response, |status, body| ApiError::Request {
            status,
            url: url.to_string(),
            body,
        })
        .await?;

        info!(user_id = %session.user_id, "Cleared user session data");
        Ok(())
    }
}
