//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Key error: {0}")]
    Key(#[from] xswap_chain::KeyError),

    #[error("API error: {0}")]
    Api(#[from] xswap_api::ApiError),

    #[error("Swap error: {0}")]
    Swap(#[from] xswap_coordinator::SwapError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
