//! API error types.

use serde_json::Value;
use thiserror::Error;

/// Errors from the coordinating service.
///
/// Remote failures keep the structured error body the service returned, so
/// operators see the service's own diagnosis verbatim instead of a
/// paraphrase.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Non-success status from the service.
    #[error("Service returned HTTP {status}: {}", payload_summary(.payload))]
    Status { status: u16, payload: Option<Value> },

    /// Response body did not decode into the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The structured error body returned by the service, when present.
    pub fn remote_payload(&self) -> Option<&Value> {
        match self {
            Self::Status { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }
}

fn payload_summary(payload: &Option<Value>) -> String {
    match payload {
        Some(value) => value.to_string(),
        None => "<no body>".to_string(),
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
