//! Inbound frame envelope.

use serde::Deserialize;
use serde_json::Value;

/// Event type carrying a task status change.
pub const TASK_UPDATE: &str = "task_update";

/// Envelope of every text frame pushed on the subscription channel.
///
/// Only `type` is inspected up front; `payload` is decoded lazily and only
/// for event types the watcher cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundFrame {
    /// Event type discriminator.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Event body.
    #[serde(default)]
    pub payload: Option<Value>,
}

impl InboundFrame {
    /// Parse a text frame.
    ///
    /// Only JSON objects are accepted; arrays and scalars are rejected even
    /// when their shape would fill the fields positionally.
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        match serde_json::from_str::<Value>(text)? {
            value @ Value::Object(_) => serde_json::from_value(value),
            other => Err(serde::de::Error::custom(format!(
                "expected a JSON object frame, found {}",
                kind_of(&other)
            ))),
        }
    }

    /// Whether this frame is a task status update.
    pub fn is_task_update(&self) -> bool {
        self.kind.as_deref() == Some(TASK_UPDATE)
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
