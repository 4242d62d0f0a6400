//! Collaborator traits for the swap stages.
//!
//! Trait-based abstraction over the network-bound collaborators so the
//! coordinator can be exercised against mocks. Methods return boxed
//! futures to stay dyn-compatible.

use std::pin::Pin;
use std::sync::Arc;

use alloy::primitives::{Address, U256};
use parking_lot::Mutex;

use xswap_chain::ApprovalReceipt;
use xswap_commit::SecretHash;
use xswap_core::{ChainId, OrderRequest, OrderSubmission, PreparedOrder, Quote, QuoteParams};

use crate::error::StageFailure;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Token allowance collaborator.
///
/// An `Ok(None)` means the approval transaction went through the motions
/// but produced no usable receipt (e.g. reverted); the coordinator treats
/// it exactly like an error and halts.
pub trait ApprovalGate: Send + Sync {
    fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> BoxFuture<'_, Result<Option<ApprovalReceipt>, StageFailure>>;
}

/// Remote pricing collaborator.
pub trait QuoteService: Send + Sync {
    fn get_quote(&self, params: QuoteParams) -> BoxFuture<'_, Result<Quote, StageFailure>>;
}

/// Remote order lifecycle collaborator.
pub trait OrderService: Send + Sync {
    fn create_order(
        &self,
        quote: Quote,
        request: OrderRequest,
    ) -> BoxFuture<'_, Result<PreparedOrder, StageFailure>>;

    fn submit_order(
        &self,
        src_chain_id: ChainId,
        prepared: PreparedOrder,
        secret_hashes: Vec<SecretHash>,
    ) -> BoxFuture<'_, Result<OrderSubmission, StageFailure>>;
}

pub type DynApprovalGate = Arc<dyn ApprovalGate>;
pub type DynQuoteService = Arc<dyn QuoteService>;
pub type DynOrderService = Arc<dyn OrderService>;

// ============================================================================
// Mock collaborators
// ============================================================================

/// Mock approval gate for testing.
#[derive(Default)]
pub struct MockApprovalGate {
    calls: Mutex<Vec<(Address, Address, U256)>>,
    next_result: Mutex<Option<Result<Option<ApprovalReceipt>, StageFailure>>>,
}

impl MockApprovalGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next approval outcome. Defaults to a successful receipt.
    pub fn set_next_result(&self, result: Result<Option<ApprovalReceipt>, StageFailure>) {
        *self.next_result.lock() = Some(result);
    }

    pub fn calls(&self) -> Vec<(Address, Address, U256)> {
        self.calls.lock().clone()
    }
}

impl ApprovalGate for MockApprovalGate {
    fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> BoxFuture<'_, Result<Option<ApprovalReceipt>, StageFailure>> {
        Box::pin(async move {
            self.calls.lock().push((token, spender, amount));
            self.next_result.lock().take().unwrap_or_else(|| {
                Ok(Some(ApprovalReceipt {
                    tx_hash: Default::default(),
                    block_number: Some(1),
                }))
            })
        })
    }
}

/// Mock quote service for testing.
#[derive(Default)]
pub struct MockQuoteService {
    calls: Mutex<Vec<QuoteParams>>,
    next_result: Mutex<Option<Result<Quote, StageFailure>>>,
}

impl MockQuoteService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_next_result(&self, result: Result<Quote, StageFailure>) {
        *self.next_result.lock() = Some(result);
    }

    pub fn calls(&self) -> Vec<QuoteParams> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl QuoteService for MockQuoteService {
    fn get_quote(&self, params: QuoteParams) -> BoxFuture<'_, Result<Quote, StageFailure>> {
        Box::pin(async move {
            self.calls.lock().push(params);
            self.next_result
                .lock()
                .take()
                .unwrap_or_else(|| Err(StageFailure::new("no quote scripted")))
        })
    }
}

/// Mock order service for testing.
#[derive(Default)]
pub struct MockOrderService {
    create_calls: Mutex<Vec<(Quote, OrderRequest)>>,
    submit_calls: Mutex<Vec<(ChainId, PreparedOrder, Vec<SecretHash>)>>,
    next_create: Mutex<Option<Result<PreparedOrder, StageFailure>>>,
    next_submit: Mutex<Option<Result<OrderSubmission, StageFailure>>>,
}

impl MockOrderService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_next_create(&self, result: Result<PreparedOrder, StageFailure>) {
        *self.next_create.lock() = Some(result);
    }

    pub fn set_next_submit(&self, result: Result<OrderSubmission, StageFailure>) {
        *self.next_submit.lock() = Some(result);
    }

    pub fn create_calls(&self) -> Vec<(Quote, OrderRequest)> {
        self.create_calls.lock().clone()
    }

    pub fn submit_calls(&self) -> Vec<(ChainId, PreparedOrder, Vec<SecretHash>)> {
        self.submit_calls.lock().clone()
    }
}

impl OrderService for MockOrderService {
    fn create_order(
        &self,
        quote: Quote,
        request: OrderRequest,
    ) -> BoxFuture<'_, Result<PreparedOrder, StageFailure>> {
        Box::pin(async move {
            self.create_calls.lock().push((quote, request));
            self.next_create
                .lock()
                .take()
                .unwrap_or_else(|| Err(StageFailure::new("no create result scripted")))
        })
    }

    fn submit_order(
        &self,
        src_chain_id: ChainId,
        prepared: PreparedOrder,
        secret_hashes: Vec<SecretHash>,
    ) -> BoxFuture<'_, Result<OrderSubmission, StageFailure>> {
        Box::pin(async move {
            self.submit_calls
                .lock()
                .push((src_chain_id, prepared, secret_hashes));
            self.next_submit
                .lock()
                .take()
                .unwrap_or_else(|| Err(StageFailure::new("no submit result scripted")))
        })
    }
}
