//! Chain collaborator error types.

use alloy::primitives::Address;
use thiserror::Error;

/// Errors from loading the wallet key.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Failed to read key file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid hex in private key: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Address mismatch: expected {expected}, derived {actual}")]
    AddressMismatch { expected: Address, actual: Address },
}

/// Errors from on-chain calls.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Key error: {0}")]
    Key(#[from] KeyError),

    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("RPC call failed: {0}")]
    Rpc(String),
}

pub type ChainResult<T> = Result<T, ChainError>;
