use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// `GET /api/{type}/count` response body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CountResponse {
    /// Left as a raw value: servers have been seen returning `null` here.
    #[serde(default)]
    pub count: Option<Value>,
}

impl CountResponse {
    /// The displayed count. Integral floats and numeric strings are accepted;
    /// anything else shows as 0.
    pub fn value(&self) -> u64 {
        self.count.as_ref().and_then(count_from_value).unwrap_or(0)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_from_value(value: &Value) -> Option<u64> {
    if let Some(exact) = value.as_u64() {
        return Some(exact);
    }
    let float = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (float.is_finite() && float >= 0.0 && float.fract() == 0.0).then_some(float as u64)
}

/// `POST /api/{type}/search` request body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchRequest {
    pub search_term: String,
}

/// Body returned by the add, update and delete endpoints.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Identifier of the inserted record (add only). Servers send strings or
    /// numbers; it is never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(flatten)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl ActionResponse {
    /// Server-provided message, ignoring empty strings.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}
