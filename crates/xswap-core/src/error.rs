//! Core error types.

use thiserror::Error;

use crate::quote::PresetKind;

/// Core validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Fee must be between 0 and 10000 basis points, got {0}")]
    InvalidFeeBps(u16),

    #[error("Hash lock covers {lock_fills} fills but {hashes} secret hashes were supplied")]
    FillCountMismatch { lock_fills: usize, hashes: usize },

    #[error("Quote does not carry the {0} preset")]
    PresetUnavailable(PresetKind),

    #[error("Malformed quote payload: {0}")]
    MalformedQuote(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
