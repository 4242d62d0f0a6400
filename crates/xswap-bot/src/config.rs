//! Application configuration.
//!
//! Secrets never live in the config file: the private key and API key are
//! referenced by environment variable name only.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::path::Path;

use xswap_core::{ChainId, FeeTerms, PresetKind, QuoteParams};
use xswap_coordinator::SwapConfig;

use crate::error::{AppError, AppResult};

/// Swap trade parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapSection {
    /// Source chain id. Default: Base.
    #[serde(default = "default_src_chain_id")]
    pub src_chain_id: u64,
    /// Destination chain id. Default: Arbitrum.
    #[serde(default = "default_dst_chain_id")]
    pub dst_chain_id: u64,
    /// Source token address.
    pub src_token: String,
    /// Destination token address.
    pub dst_token: String,
    /// Trade amount in base units (decimal string).
    pub amount: String,
    /// Ask the service for an execution estimate with the quote.
    #[serde(default = "default_enable_estimate")]
    pub enable_estimate: bool,
    /// Pricing preset to commit to.
    #[serde(default)]
    pub preset: PresetKind,
    /// Source/referrer tag forwarded with the order.
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_src_chain_id() -> u64 {
    ChainId::BASE.as_u64()
}

fn default_dst_chain_id() -> u64 {
    ChainId::ARBITRUM.as_u64()
}

fn default_enable_estimate() -> bool {
    true
}

fn default_source() -> String {
    "xswap".to_string()
}

/// Coordinating service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable holding the bearer token.
    #[serde(default = "default_auth_key_env")]
    pub auth_key_env: String,
}

fn default_base_url() -> String {
    "https://api.1inch.dev/fusion-plus".to_string()
}

fn default_auth_key_env() -> String {
    "SWAP_API_KEY".to_string()
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_key_env: default_auth_key_env(),
        }
    }
}

/// Source-chain RPC and approval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSection {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Settlement contract granted allowance over the source token.
    #[serde(default = "default_spender")]
    pub spender: String,
    /// Environment variable holding the maker private key.
    #[serde(default = "default_private_key_env")]
    pub private_key_env: String,
    /// Optional check that the loaded key derives this address.
    #[serde(default)]
    pub expected_address: Option<String>,
}

fn default_rpc_url() -> String {
    "https://base-rpc.publicnode.com".to_string()
}

fn default_spender() -> String {
    "0x111111125421ca6dc452d289314280a0f8842a65".to_string()
}

fn default_private_key_env() -> String {
    "PRIVATE_KEY".to_string()
}

impl Default for ChainSection {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            spender: default_spender(),
            private_key_env: default_private_key_env(),
            expected_address: None,
        }
    }
}

/// Optional integrator fee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeSection {
    pub bps: u16,
    pub receiver: String,
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub swap: SwapSection,
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub chain: ChainSection,
    #[serde(default)]
    pub fee: Option<FeeSection>,
}

impl AppConfig {
    /// Load from a file.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Build the coordinator's swap configuration from the file values.
    pub fn swap_config(&self, maker: Address) -> AppResult<SwapConfig> {
        let params = QuoteParams {
            src_chain_id: ChainId(self.swap.src_chain_id),
            dst_chain_id: ChainId(self.swap.dst_chain_id),
            src_token_address: parse_address("swap.src_token", &self.swap.src_token)?,
            dst_token_address: parse_address("swap.dst_token", &self.swap.dst_token)?,
            amount: self.swap.amount.parse::<U256>().map_err(|e| {
                AppError::Config(format!("swap.amount is not a base-unit integer: {e}"))
            })?,
            enable_estimate: self.swap.enable_estimate,
            wallet_address: maker,
        };

        let fee = self
            .fee
            .as_ref()
            .map(|f| -> AppResult<FeeTerms> {
                let receiver = parse_address("fee.receiver", &f.receiver)?;
                FeeTerms::new(f.bps, receiver)
                    .map_err(|e| AppError::Config(e.to_string()))
            })
            .transpose()?;

        Ok(SwapConfig {
            params,
            spender: parse_address("chain.spender", &self.chain.spender)?,
            preset: self.swap.preset,
            fee,
            source: Some(self.swap.source.clone()),
        })
    }

    /// Optional expected maker address, parsed.
    pub fn expected_address(&self) -> AppResult<Option<Address>> {
        self.chain
            .expected_address
            .as_deref()
            .map(|raw| parse_address("chain.expected_address", raw))
            .transpose()
    }
}

fn parse_address(field: &str, raw: &str) -> AppResult<Address> {
    raw.parse()
        .map_err(|e| AppError::Config(format!("{field} is not a valid address: {e}")))
}
