//! Staged swap-order lifecycle coordinator.
//!
//! Drives one swap attempt through its stages:
//! approval → quote → commitment → order creation → order submission,
//! with one typed outcome per stage and no cross-stage error conflation.
//! The top-level caller always receives a normal `SwapReport`, never a
//! propagated fault.

pub mod coordinator;
pub mod error;
pub mod services;
pub mod traits;

pub use coordinator::{SwapConfig, SwapCoordinator, SwapReport, SwapState};
pub use error::{StageFailure, SwapError};
pub use traits::{
    ApprovalGate, BoxFuture, DynApprovalGate, DynOrderService, DynQuoteService, MockApprovalGate,
    MockOrderService, MockQuoteService, OrderService, QuoteService,
};
