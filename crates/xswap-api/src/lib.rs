//! HTTP client for the swap coordinating service.
//!
//! Wraps the remote quote and order lifecycle endpoints
//! (quote → create order → submit order). Payload shapes beyond the fields
//! the coordinator inspects are owned by the service and passed through
//! opaquely.

pub mod client;
pub mod error;

pub use client::SwapApiClient;
pub use error::{ApiError, ApiResult};
