//! Normalization of every remote failure into one operator-facing error.

use serde_json::Value;
use thiserror::Error;

use workforce_core::DomainError;

/// Normalized remote-call error. `Display` is the message shown to the
/// operator and never exposes raw transport errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Per-field validation failure (`field: message, ...`).
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    /// 5xx or an error reply the client does not recognize.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// No response was received (connect failure, timeout).
    #[error("{0}")]
    Network(String),

    /// A success reply whose body did not match the expected shape.
    #[error("unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build an error from a non-2xx reply.
    ///
    /// `body` is the raw reply text; `fallback` is used when it carries no
    /// usable `detail`.
    pub fn from_response(status: u16, body: &str, fallback: &str) -> Self {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("detail").cloned());

        match (status, detail) {
            (_, Some(Value::Array(items))) if (400..500).contains(&status) => {
                ApiError::Validation(join_field_errors(&items))
            }
            (401, detail) => ApiError::Unauthorized(scalar(detail).unwrap_or_else(|| fallback.to_string())),
            (404, detail) => ApiError::NotFound(scalar(detail).unwrap_or_else(|| fallback.to_string())),
            (status, detail) => ApiError::Server {
                status,
                message: scalar(detail).unwrap_or_else(|| fallback.to_string()),
            },
        }
    }

    pub fn network(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("the server did not respond in time".to_string())
        } else {
            ApiError::Network("could not connect to the server".to_string())
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

fn scalar(detail: Option<Value>) -> Option<String> {
    match detail? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `[{loc: ["body","name"], msg: "Field required"}]` → `body.name: Field required`.
fn join_field_errors(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| {
            let field = item
                .get("loc")
                .and_then(Value::as_array)
                .map(|loc| {
                    loc.iter()
                        .map(|part| match part {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join(".")
                })
                .unwrap_or_else(|| "field".to_string());
            let msg = item.get("msg").and_then(Value::as_str).unwrap_or("invalid value");
            format!("{field}: {msg}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}
