//! Quote request parameters and the quote service's reply.
//!
//! The quote payload is owned by the remote service; only the fields the
//! coordinator inspects (`quoteId`, `srcChainId`, presets and their
//! `secretsCount`) are lifted into typed form. Everything else rides along
//! opaquely in `Quote::raw` so order creation can pass the quote back
//! verbatim.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::chain::ChainId;
use crate::error::{CoreError, Result};

/// Serialize a `U256` as a decimal string of base units (and back).
///
/// The quote API speaks decimal strings, not the 0x-hex form alloy emits by
/// default.
pub mod u256_decimal {
    use alloy::primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<U256>().map_err(serde::de::Error::custom)
    }
}

/// Parameters for a quote request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteParams {
    pub src_chain_id: ChainId,
    pub dst_chain_id: ChainId,
    pub src_token_address: Address,
    pub dst_token_address: Address,
    /// Trade amount in base units of the source token.
    #[serde(with = "u256_decimal")]
    pub amount: U256,
    pub enable_estimate: bool,
    pub wallet_address: Address,
}

/// Named pricing/execution strategy offered by the quote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetKind {
    #[default]
    Fast,
    Medium,
    Slow,
    Custom,
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fast => write!(f, "fast"),
            Self::Medium => write!(f, "medium"),
            Self::Slow => write!(f, "slow"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// The slice of a preset the coordinator inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    /// Number of fills, and therefore secrets, this preset requires.
    pub secrets_count: u32,
}

/// Presets offered by a quote, keyed by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fast: Option<Preset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<Preset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slow: Option<Preset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Preset>,
}

impl Presets {
    pub fn get(&self, kind: PresetKind) -> Option<&Preset> {
        match kind {
            PresetKind::Fast => self.fast.as_ref(),
            PresetKind::Medium => self.medium.as_ref(),
            PresetKind::Slow => self.slow.as_ref(),
            PresetKind::Custom => self.custom.as_ref(),
        }
    }
}

/// A quote from the remote pricing service.
///
/// Immutable once fetched. Re-fetching may yield a different
/// `secrets_count`, so a new quote always restarts secret generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Source chain, echoed by the service (falls back to the request's).
    pub src_chain_id: ChainId,
    /// Service-assigned quote identifier, when present.
    pub quote_id: Option<String>,
    /// Preset the service recommends.
    pub recommended_preset: PresetKind,
    /// Presets with the fields the coordinator inspects.
    pub presets: Presets,
    /// Full service payload, passed through verbatim on order creation.
    pub raw: Value,
}

/// Typed fields lifted out of the raw quote payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteFields {
    #[serde(default)]
    quote_id: Option<String>,
    #[serde(default)]
    src_chain_id: Option<u64>,
    #[serde(default)]
    recommended_preset: Option<PresetKind>,
    presets: Presets,
}

impl Quote {
    /// Lift the inspected fields out of a raw service payload.
    pub fn from_value(raw: Value, request_src_chain: ChainId) -> Result<Self> {
        let fields: QuoteFields = serde_json::from_value(raw.clone())
            .map_err(|e| CoreError::MalformedQuote(e.to_string()))?;

        Ok(Self {
            src_chain_id: fields
                .src_chain_id
                .map(ChainId)
                .unwrap_or(request_src_chain),
            quote_id: fields.quote_id,
            recommended_preset: fields.recommended_preset.unwrap_or_default(),
            presets: fields.presets,
            raw,
        })
    }

    /// The chosen preset, which dictates how many secrets to generate.
    pub fn preset(&self, kind: PresetKind) -> Result<&Preset> {
        self.presets
            .get(kind)
            .ok_or(CoreError::PresetUnavailable(kind))
    }
}
