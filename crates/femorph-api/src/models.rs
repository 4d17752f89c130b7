//! Request and response bodies of the femorph HTTP API.
//!
//! These types are internal to `femorph-api`. Consumers see the domain types
//! from `femorph-core` instead.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `GET /health`.
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
}

/// Body of `POST /auth` and `POST /users/{id}/create`.
#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response of `POST /auth`.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(default)]
    pub access_token: String,
}

/// Response of an upload.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
}

/// Body of `POST /users/{id}/fems/{fem}/morph`.
#[derive(Debug, Serialize)]
pub struct MorphRequest<'a> {
    pub target: &'a str,
}

/// Response of the morph trigger.
#[derive(Debug, Deserialize)]
pub struct MorphResponse {
    #[serde(default)]
    pub task_id: Option<String>,
}

/// Accept identifiers the server may encode as either strings or integers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    opt_string_or_number(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("expected a string or number, found null"))
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}
