//! Morph job trigger.

use femorph_core::{ArtifactId, Session, TaskId};
use tracing::info;

use super::{FemorphClient, ensure_success};
use crate::error::{ApiError, ApiResult};
use crate::models::{MorphRequest, MorphResponse};
use crate::url::build_morph_url;

impl FemorphClient {
    /// Submit a morph of `fem` onto `target` and return the task id to watch.
    pub async fn trigger_morph(
        &self,
        fem: &ArtifactId,
        target: &ArtifactId,
        session: &Session,
    ) -> ApiResult<TaskId> {
        let url = build_morph_url(&self.base_url, &session.user_id, fem);
        let response = self
            .http
            .post(url.clone())
            .timeout(self.request_timeout)
            .bearer_auth(session.access_token())
            .json(&MorphRequest {
                target: target.as_str(),
            })
            .send()
            .await?;
        let response = ensure_success(response, |status, body| ApiError::Request {
            status,
            url: url.to_string(),
            body,
        })
        .await?;

        let morph: MorphResponse = response.json().await?;
        let task_id = parse_task_id(morph.task_id.as_deref())?;

        info!(task_id = %task_id, "Morph task started");
        Ok(task_id)
    }
}

fn parse_task_id(raw: Option<&str>) -> ApiResult<TaskId> {
    let raw = raw
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::InvalidResponse {
            message: "morph task id missing in response".to_string(),
        })?;
    TaskId::parse_str(raw).map_err(|e| ApiError::InvalidResponse {
        message: format!("morph task id '{raw}' is not a UUID: {e}"),
    })
}
