//! Core domain types for the cross-chain swap coordinator.
//!
//! This crate provides the types shared across the swap pipeline:
//! - `ChainId`: EVM network identifiers
//! - `QuoteParams`, `Quote`, `Preset`: quote request and the service's reply
//! - `OrderRequest`: assembled order payload (quote + maker + hash lock)
//! - `FeeTerms`: optional integrator fee
//! - `PreparedOrder`, `OrderSubmission`: service-owned lifecycle results

pub mod chain;
pub mod error;
pub mod order;
pub mod quote;

pub use chain::ChainId;
pub use error::{CoreError, Result};
pub use order::{FeeTerms, OrderRequest, OrderSubmission, PreparedOrder, MAX_FEE_BPS};
pub use quote::{Preset, PresetKind, Presets, Quote, QuoteParams};
