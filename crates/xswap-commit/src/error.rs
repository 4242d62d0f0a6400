//! Commitment error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    /// A hash lock cannot be built over zero fills. The fill count comes
    /// from the quote's chosen preset; a zero there is a caller bug, never
    /// something to default.
    #[error("Cannot build a hash lock for zero fills")]
    NoFills,
}

pub type CommitResult<T> = Result<T, CommitError>;
