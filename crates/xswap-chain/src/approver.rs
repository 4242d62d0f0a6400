//! ERC-20 approval gate.
//!
//! Ensures the settlement spender holds allowance over the source token
//! before a swap attempt proceeds. A reverted approval is reported as an
//! absent receipt, not an error: the coordinator treats both the same way
//! and halts.

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, B256, U256};
use alloy::providers::ProviderBuilder;
use alloy::sol;
use tracing::{info, warn};

use crate::error::{ChainError, ChainResult};
use crate::wallet::Wallet;

sol! {
    #[sol(rpc)]
    interface IErc20 {
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

/// Receipt of a mined approval transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalReceipt {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
}

/// Token-approval collaborator backed by a JSON-RPC provider.
pub struct Erc20Approver {
    rpc_url: String,
    wallet: EthereumWallet,
    maker: Address,
}

impl Erc20Approver {
    pub fn new(rpc_url: impl Into<String>, wallet: &Wallet) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            wallet: EthereumWallet::from(wallet.signer().clone()),
            maker: wallet.address(),
        }
    }

    /// Approve `spender` for `amount` of `token` and wait for the receipt.
    ///
    /// Returns `Ok(None)` when the transaction mined but reverted; the
    /// caller must treat that as a failed approval.
    pub async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> ChainResult<Option<ApprovalReceipt>> {
        info!(%token, %spender, %amount, maker = %self.maker, "Sending approval transaction");

        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(self.wallet.clone())
            .on_builtin(&self.rpc_url)
            .await
            .map_err(|e| ChainError::InvalidRpcUrl(e.to_string()))?;

        let erc20 = IErc20::new(token, provider);
        let pending = erc20
            .approve(spender, amount)
            .send()
            .await
            .map_err(|e| ChainError::Rpc(format!("approve send failed: {e}")))?;

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| ChainError::Rpc(format!("approve receipt failed: {e}")))?;

        if !receipt.status() {
            warn!(tx_hash = %receipt.transaction_hash, "Approval transaction reverted");
            return Ok(None);
        }

        info!(
            tx_hash = %receipt.transaction_hash,
            block = ?receipt.block_number,
            "Approval confirmed"
        );
        Ok(Some(ApprovalReceipt {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
        }))
    }
}
