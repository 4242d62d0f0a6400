//! The swap-order state machine.
//!
//! One attempt moves strictly linearly:
//!
//! ```text
//! Idle → Approved → Quoted → Committed → Created → Submitted
//! ```
//!
//! with a terminal failure state per stage: `ApprovalFailed`,
//! `QuoteFailed`, `CommitFailed`, `CreateFailed`, `SubmitFailed`. A
//! failure at submission must not be conflated with a failure at creation:
//! they leave the remote system in different states (order exists vs. does
//! not) and demand different operator recovery. No stage retries, no stage
//! rolls back a prior stage — there is no compensating transaction to
//! un-create an order.

use alloy::primitives::Address;
use tracing::{debug, info, warn};

use xswap_commit::{HashLock, Secret, SecretHash, SecretVault};
use xswap_core::{
    FeeTerms, OrderRequest, OrderSubmission, PreparedOrder, PresetKind, Quote, QuoteParams,
};

use crate::error::{StageFailure, SwapError};
use crate::traits::{DynApprovalGate, DynOrderService, DynQuoteService};

/// Where one swap attempt ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapState {
    Idle,
    Approved,
    Quoted,
    Committed,
    Created,
    /// Terminal success.
    Submitted,
    /// Terminal: approval failed or returned no receipt; no further stages
    /// were attempted.
    ApprovalFailed,
    /// Terminal: quote fetch failed.
    QuoteFailed,
    /// Terminal: local commitment construction failed (invalid
    /// `secrets_count` or order assembly input).
    CommitFailed,
    /// Terminal: order creation failed; nothing exists server-side.
    CreateFailed,
    /// Terminal: submission failed after creation succeeded. The order may
    /// exist server-side in an orphaned state.
    SubmitFailed,
}

impl SwapState {
    pub fn is_terminal_failure(&self) -> bool {
        matches!(
            self,
            Self::ApprovalFailed
                | Self::QuoteFailed
                | Self::CommitFailed
                | Self::CreateFailed
                | Self::SubmitFailed
        )
    }
}

impl std::fmt::Display for SwapState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Approved => "approved",
            Self::Quoted => "quoted",
            Self::Committed => "committed",
            Self::Created => "created",
            Self::Submitted => "submitted",
            Self::ApprovalFailed => "approval_failed",
            Self::QuoteFailed => "quote_failed",
            Self::CommitFailed => "commit_failed",
            Self::CreateFailed => "create_failed",
            Self::SubmitFailed => "submit_failed",
        };
        write!(f, "{name}")
    }
}

/// Outcome of one swap attempt. Always returned normally; a stage failure
/// is a reported state, not a propagated fault.
#[derive(Debug, Clone)]
pub struct SwapReport {
    pub state: SwapState,
    pub error: Option<SwapError>,
    /// Creation result. Retained on `SubmitFailed` too: the order may
    /// already exist server-side and the operator needs its identifiers.
    pub created: Option<PreparedOrder>,
    /// Submission acknowledgement on success.
    pub submission: Option<OrderSubmission>,
}

impl SwapReport {
    fn failed(state: SwapState, error: SwapError) -> Self {
        Self {
            state,
            error: Some(error),
            created: None,
            submission: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.state == SwapState::Submitted
    }
}

/// Static parameters of one swap attempt.
#[derive(Debug, Clone)]
pub struct SwapConfig {
    pub params: QuoteParams,
    /// Settlement contract to grant allowance to.
    pub spender: Address,
    pub preset: PresetKind,
    pub fee: Option<FeeTerms>,
    /// Referrer/source tag forwarded with the order.
    pub source: Option<String>,
}

/// Drives one swap attempt at a time through its stages.
///
/// Each attempt constructs its own [`SecretVault`] and owns its secrets
/// exclusively; independent coordinators may run concurrently without
/// shared state. No timeout is enforced here — that policy belongs to the
/// network collaborators.
pub struct SwapCoordinator {
    config: SwapConfig,
    gate: DynApprovalGate,
    quotes: DynQuoteService,
    orders: DynOrderService,
}

impl std::fmt::Debug for SwapCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapCoordinator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SwapCoordinator {
    /// Create a coordinator, validating local configuration up front so a
    /// `Configuration` error surfaces before any network call.
    pub fn new(
        config: SwapConfig,
        gate: DynApprovalGate,
        quotes: DynQuoteService,
        orders: DynOrderService,
    ) -> Result<Self, SwapError> {
        if let Some(fee) = &config.fee {
            fee.validate()?;
        }
        if config.params.amount.is_zero() {
            return Err(SwapError::Configuration(
                "swap amount must be non-zero".to_string(),
            ));
        }

        Ok(Self {
            config,
            gate,
            quotes,
            orders,
        })
    }

    /// Run one attempt to completion.
    pub async fn run(&self) -> SwapReport {
        // Stage: approval. A falsy result halts everything; no quote is
        // ever requested.
        let receipt = match self
            .gate
            .approve(
                self.config.params.src_token_address,
                self.config.spender,
                self.config.params.amount,
            )
            .await
        {
            Ok(Some(receipt)) => receipt,
            Ok(None) => {
                info!("Approval returned no receipt, stopping before quote");
                return SwapReport::failed(
                    SwapState::ApprovalFailed,
                    SwapError::Approval(StageFailure::new("approval produced no receipt")),
                );
            }
            Err(failure) => {
                return SwapReport::failed(SwapState::ApprovalFailed, SwapError::Approval(failure));
            }
        };
        info!(tx_hash = %receipt.tx_hash, state = %SwapState::Approved, "Allowance confirmed");

        // Stage: quote.
        let quote = match self.quotes.get_quote(self.config.params.clone()).await {
            Ok(quote) => quote,
            Err(failure) => {
                return SwapReport::failed(SwapState::QuoteFailed, SwapError::Quote(failure));
            }
        };
        info!(quote_id = ?quote.quote_id, state = %SwapState::Quoted, "Quote received");

        // Stage: commitment. Pure local computation; can only fail on
        // invalid configuration (zero secrets, absent preset).
        let (request, secret_hashes) = match self.commit(&quote) {
            Ok(artifacts) => artifacts,
            Err(error) => {
                return SwapReport::failed(SwapState::CommitFailed, error);
            }
        };
        info!(
            fills = secret_hashes.len(),
            state = %SwapState::Committed,
            "Hash lock committed"
        );

        // Stage: order creation.
        let created = match self
            .orders
            .create_order(quote.clone(), request.clone())
            .await
        {
            Ok(created) => created,
            Err(failure) => {
                return SwapReport::failed(SwapState::CreateFailed, SwapError::CreateOrder(failure));
            }
        };
        info!(
            order_hash = %created.hash,
            quote_id = %created.quote_id,
            state = %SwapState::Created,
            "Order created"
        );

        // Stage: submission. On failure the created order is retained for
        // the caller: it may already exist server-side in an orphaned
        // state, and that inconsistency is for an operator to resolve, not
        // for us to retry away.
        match self
            .orders
            .submit_order(quote.src_chain_id, created.clone(), secret_hashes)
            .await
        {
            Ok(submission) => {
                info!(order_hash = %created.hash, state = %SwapState::Submitted, "Order submitted");
                SwapReport {
                    state: SwapState::Submitted,
                    error: None,
                    created: Some(created),
                    submission: Some(submission),
                }
            }
            Err(failure) => {
                warn!(
                    order_hash = %created.hash,
                    quote_id = %created.quote_id,
                    "Submission failed after creation; order may exist server-side in an orphaned state"
                );
                SwapReport {
                    state: SwapState::SubmitFailed,
                    error: Some(SwapError::SubmitOrder(failure)),
                    created: Some(created),
                    submission: None,
                }
            }
        }
    }

    /// Build the commitment artifacts for a fresh attempt: a new vault,
    /// `secrets_count` secrets in fill order, the hash lock over them, and
    /// the assembled order request.
    fn commit(&self, quote: &Quote) -> Result<(OrderRequest, Vec<SecretHash>), SwapError> {
        let preset = quote.preset(self.config.preset)?;
        let secrets_count = preset.secrets_count as usize;
        debug!(secrets_count, "Generating fill secrets");

        let vault = SecretVault::new();
        let secrets = vault.generate(secrets_count);
        let secret_hashes: Vec<SecretHash> = secrets.iter().map(Secret::hash).collect();
        // Zero secrets is rejected here, never defaulted.
        let hash_lock = HashLock::build(&secrets)?;

        let request = OrderRequest::assemble(
            quote,
            self.config.params.wallet_address,
            hash_lock,
            secret_hashes.clone(),
            self.config.preset,
            self.config.fee,
            self.config.source.clone(),
        )?;

        Ok((request, secret_hashes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MockApprovalGate, MockOrderService, MockQuoteService};
    use alloy::primitives::U256 as TestU256;
    use serde_json::json;
    use std::sync::Arc;
    use xswap_core::ChainId;

    fn params() -> QuoteParams {
        QuoteParams {
            src_chain_id: ChainId::BASE,
            dst_chain_id: ChainId::ARBITRUM,
            src_token_address: "0xc5fecC3a29Fb57B5024eEc8a2239d4621e111CBE"
                .parse()
                .unwrap(),
            dst_token_address: "0xaf88d065e77c8cC2239327C5EDb3A432268e5831"
                .parse()
                .unwrap(),
            amount: TestU256::from(10_000_000_000_000_000_000u128),
            enable_estimate: true,
            wallet_address: Address::ZERO,
        }
    }

    fn config() -> SwapConfig {
        SwapConfig {
            params: params(),
            spender: "0x111111125421ca6dc452d289314280a0f8842a65"
                .parse()
                .unwrap(),
            preset: PresetKind::Fast,
            fee: None,
            source: Some("xswap".to_string()),
        }
    }

    fn quote(secrets_count: u32) -> Quote {
        Quote::from_value(
            json!({
                "quoteId": "q-1",
                "srcChainId": 8453,
                "recommendedPreset": "fast",
                "presets": { "fast": { "secretsCount": secrets_count } }
            }),
            ChainId::BASE,
        )
        .unwrap()
    }

    fn prepared() -> PreparedOrder {
        PreparedOrder {
            hash: "0xorder".to_string(),
            quote_id: "q-1".to_string(),
            order: json!({ "salt": "42" }),
        }
    }

    struct Harness {
        gate: Arc<MockApprovalGate>,
        quotes: Arc<MockQuoteService>,
        orders: Arc<MockOrderService>,
        coordinator: SwapCoordinator,
    }

    fn harness(config: SwapConfig) -> Harness {
        let gate = Arc::new(MockApprovalGate::new());
        let quotes = Arc::new(MockQuoteService::new());
        let orders = Arc::new(MockOrderService::new());
        let coordinator = SwapCoordinator::new(
            config,
            gate.clone(),
            quotes.clone(),
            orders.clone(),
        )
        .unwrap();
        Harness {
            gate,
            quotes,
            orders,
            coordinator,
        }
    }

    #[test]
    fn test_invalid_fee_is_rejected_before_any_network_call() {
        let mut cfg = config();
        cfg.fee = Some(FeeTerms {
            bps: 10_001,
            receiver: Address::ZERO,
        });
        let err = SwapCoordinator::new(
            cfg,
            Arc::new(MockApprovalGate::new()),
            Arc::new(MockQuoteService::new()),
            Arc::new(MockOrderService::new()),
        )
        .unwrap_err();
        assert!(matches!(err, SwapError::Configuration(_)));
    }

    #[test]
    fn test_zero_amount_is_rejected() {
        let mut cfg = config();
        cfg.params.amount = TestU256::ZERO;
        let err = SwapCoordinator::new(
            cfg,
            Arc::new(MockApprovalGate::new()),
            Arc::new(MockQuoteService::new()),
            Arc::new(MockOrderService::new()),
        )
        .unwrap_err();
        assert!(matches!(err, SwapError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_falsy_approval_halts_before_quote() {
        let h = harness(config());
        h.gate.set_next_result(Ok(None));

        let report = h.coordinator.run().await;

        assert_eq!(report.state, SwapState::ApprovalFailed);
        assert!(matches!(report.error, Some(SwapError::Approval(_))));
        assert_eq!(h.quotes.call_count(), 0);
        assert!(h.orders.create_calls().is_empty());
    }

    #[tokio::test]
    async fn test_approval_error_halts_before_quote() {
        let h = harness(config());
        h.gate
            .set_next_result(Err(StageFailure::new("rpc unreachable")));

        let report = h.coordinator.run().await;

        assert_eq!(report.state, SwapState::ApprovalFailed);
        assert_eq!(h.quotes.call_count(), 0);
    }

    #[tokio::test]
    async fn test_quote_failure_is_terminal() {
        let h = harness(config());
        h.quotes
            .set_next_result(Err(StageFailure::new("quote timed out")));

        let report = h.coordinator.run().await;

        assert_eq!(report.state, SwapState::QuoteFailed);
        assert!(matches!(report.error, Some(SwapError::Quote(_))));
        assert!(h.orders.create_calls().is_empty());
    }

    #[tokio::test]
    async fn test_zero_secrets_count_is_a_commit_failure() {
        let h = harness(config());
        h.quotes.set_next_result(Ok(quote(0)));

        let report = h.coordinator.run().await;

        assert_eq!(report.state, SwapState::CommitFailed);
        assert!(matches!(report.error, Some(SwapError::Configuration(_))));
        assert!(h.orders.create_calls().is_empty());
    }

    #[tokio::test]
    async fn test_single_fill_flow_submits_one_hash() {
        let h = harness(config());
        h.quotes.set_next_result(Ok(quote(1)));
        h.orders.set_next_create(Ok(prepared()));
        h.orders
            .set_next_submit(Ok(OrderSubmission(json!({ "status": "pending" }))));

        let report = h.coordinator.run().await;

        assert_eq!(report.state, SwapState::Submitted);
        assert!(report.is_success());
        assert!(report.error.is_none());

        let create_calls = h.orders.create_calls();
        assert_eq!(create_calls.len(), 1);
        let (_, request) = &create_calls[0];
        assert_eq!(request.secret_hashes.len(), 1);
        assert!(matches!(request.hash_lock, HashLock::Single(_)));

        let submit_calls = h.orders.submit_calls();
        assert_eq!(submit_calls.len(), 1);
        let (chain, submitted_order, hashes) = &submit_calls[0];
        assert_eq!(*chain, ChainId::BASE);
        assert_eq!(submitted_order.hash, "0xorder");
        assert_eq!(hashes, &request.secret_hashes);
    }

    #[tokio::test]
    async fn test_multi_fill_flow_builds_ordered_leaves() {
        let h = harness(config());
        h.quotes.set_next_result(Ok(quote(3)));
        h.orders.set_next_create(Ok(prepared()));
        h.orders
            .set_next_submit(Ok(OrderSubmission(json!({ "status": "pending" }))));

        let report = h.coordinator.run().await;
        assert_eq!(report.state, SwapState::Submitted);

        let (_, request) = &h.orders.create_calls()[0];
        assert_eq!(request.secret_hashes.len(), 3);
        let leaves = request.hash_lock.leaves().unwrap().to_vec();
        assert_eq!(leaves.len(), 3);
        for (i, hash) in request.secret_hashes.iter().enumerate() {
            assert_eq!(leaves[i], HashLock::leaf(i as u64, hash));
        }
    }

    #[tokio::test]
    async fn test_create_failure_is_terminal_and_submit_is_never_called() {
        let h = harness(config());
        h.quotes.set_next_result(Ok(quote(1)));
        h.orders.set_next_create(Err(StageFailure::with_payload(
            "HTTP 400",
            json!({ "error": "invalid signature" }),
        )));

        let report = h.coordinator.run().await;

        assert_eq!(report.state, SwapState::CreateFailed);
        assert!(report.created.is_none());
        assert!(h.orders.submit_calls().is_empty());
        let error = report.error.unwrap();
        assert_eq!(
            error.remote_payload(),
            Some(&json!({ "error": "invalid signature" }))
        );
    }

    #[tokio::test]
    async fn test_submit_failure_retains_created_order() {
        let h = harness(config());
        h.quotes.set_next_result(Ok(quote(1)));
        h.orders.set_next_create(Ok(prepared()));
        h.orders.set_next_submit(Err(StageFailure::with_payload(
            "HTTP 503",
            json!({ "error": "relayer unavailable" }),
        )));

        let report = h.coordinator.run().await;

        assert_eq!(report.state, SwapState::SubmitFailed);
        assert!(matches!(report.error, Some(SwapError::SubmitOrder(_))));
        // The creation result survives so an operator can find the
        // possibly-orphaned order.
        let created = report.created.unwrap();
        assert_eq!(created.hash, "0xorder");
        assert_eq!(created.quote_id, "q-1");
        assert!(report.submission.is_none());
    }

    #[tokio::test]
    async fn test_approval_receives_configured_spender_and_amount() {
        let h = harness(config());
        h.quotes.set_next_result(Ok(quote(1)));
        h.orders.set_next_create(Ok(prepared()));
        h.orders
            .set_next_submit(Ok(OrderSubmission(json!({}))));

        h.coordinator.run().await;

        let calls = h.gate.calls();
        assert_eq!(calls.len(), 1);
        let (token, spender, amount) = calls[0];
        assert_eq!(token, params().src_token_address);
        assert_eq!(spender, config().spender);
        assert_eq!(amount, params().amount);
    }
}
