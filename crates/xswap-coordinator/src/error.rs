//! Stage error taxonomy.
//!
//! One typed failure per stage, each carrying the stage's raw underlying
//! failure — including any structured error payload the remote service
//! returned, surfaced verbatim for operator diagnosis. Configuration
//! errors are local, fatal, and raised before any network call.

use serde_json::Value;
use thiserror::Error;

use xswap_api::ApiError;
use xswap_chain::ChainError;
use xswap_core::CoreError;

/// The raw failure behind one stage.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}{}", payload_suffix(.payload))]
pub struct StageFailure {
    pub message: String,
    /// Structured error body from the remote service, when available.
    pub payload: Option<Value>,
}

impl StageFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            payload: None,
        }
    }

    pub fn with_payload(message: impl Into<String>, payload: Value) -> Self {
        Self {
            message: message.into(),
            payload: Some(payload),
        }
    }
}

fn payload_suffix(payload: &Option<Value>) -> String {
    match payload {
        Some(value) => format!(" ({value})"),
        None => String::new(),
    }
}

impl From<ApiError> for StageFailure {
    fn from(err: ApiError) -> Self {
        let payload = err.remote_payload().cloned();
        Self {
            message: err.to_string(),
            payload,
        }
    }
}

impl From<ChainError> for StageFailure {
    fn from(err: ChainError) -> Self {
        Self::new(err.to_string())
    }
}

/// One failure per stage of the swap lifecycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SwapError {
    /// Invalid local input. Fatal, never retried, raised before any
    /// network call.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Approval failed: {0}")]
    Approval(StageFailure),

    #[error("Quote request failed: {0}")]
    Quote(StageFailure),

    #[error("Order creation failed: {0}")]
    CreateOrder(StageFailure),

    #[error("Order submission failed: {0}")]
    SubmitOrder(StageFailure),
}

impl SwapError {
    /// The remote payload behind this failure, when one exists.
    pub fn remote_payload(&self) -> Option<&Value> {
        match self {
            Self::Configuration(_) => None,
            Self::Approval(f) | Self::Quote(f) | Self::CreateOrder(f) | Self::SubmitOrder(f) => {
                f.payload.as_ref()
            }
        }
    }
}

impl From<CoreError> for SwapError {
    fn from(err: CoreError) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl From<xswap_commit::CommitError> for SwapError {
    fn from(err: xswap_commit::CommitError) -> Self {
        Self::Configuration(err.to_string())
    }
}
