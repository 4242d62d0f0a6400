//! Adapters binding the real collaborators to the stage traits.

use alloy::primitives::{Address, U256};

use xswap_api::SwapApiClient;
use xswap_chain::{ApprovalReceipt, Erc20Approver};
use xswap_commit::SecretHash;
use xswap_core::{ChainId, OrderRequest, OrderSubmission, PreparedOrder, Quote, QuoteParams};

use crate::error::StageFailure;
use crate::traits::{ApprovalGate, BoxFuture, OrderService, QuoteService};

impl ApprovalGate for Erc20Approver {
    fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> BoxFuture<'_, Result<Option<ApprovalReceipt>, StageFailure>> {
        Box::pin(async move {
            Erc20Approver::approve(self, token, spender, amount)
                .await
                .map_err(Into::into)
        })
    }
}

impl QuoteService for SwapApiClient {
    fn get_quote(&self, params: QuoteParams) -> BoxFuture<'_, Result<Quote, StageFailure>> {
        Box::pin(async move {
            SwapApiClient::get_quote(self, &params)
                .await
                .map_err(Into::into)
        })
    }
}

impl OrderService for SwapApiClient {
    fn create_order(
        &self,
        quote: Quote,
        request: OrderRequest,
    ) -> BoxFuture<'_, Result<PreparedOrder, StageFailure>> {
        Box::pin(async move {
            SwapApiClient::create_order(self, &quote, &request)
                .await
                .map_err(Into::into)
        })
    }

    fn submit_order(
        &self,
        src_chain_id: ChainId,
        prepared: PreparedOrder,
        secret_hashes: Vec<SecretHash>,
    ) -> BoxFuture<'_, Result<OrderSubmission, StageFailure>> {
        Box::pin(async move {
            SwapApiClient::submit_order(self, src_chain_id, &prepared, &secret_hashes)
                .await
                .map_err(Into::into)
        })
    }
}
