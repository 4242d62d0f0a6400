//! Cross-chain swap order submission bot.
//!
//! Wires the collaborators together and runs one swap attempt per
//! invocation:
//! - wallet key loading and ERC-20 approval
//! - quote fetch from the coordinating service
//! - secret generation and hash-lock commitment
//! - order creation and submission with per-stage outcome reporting

pub mod app;
pub mod config;
pub mod error;
pub mod logging;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
