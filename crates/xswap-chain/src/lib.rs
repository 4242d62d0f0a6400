//! Wallet key loading and the ERC-20 approval gate.
//!
//! The approval gate is the one on-chain collaborator of the swap
//! pipeline: it ensures the settlement spender has allowance over the
//! source token before any quote is requested.

pub mod approver;
pub mod error;
pub mod wallet;

pub use approver::{ApprovalReceipt, Erc20Approver};
pub use error::{ChainError, ChainResult, KeyError};
pub use wallet::{KeySource, Wallet};
