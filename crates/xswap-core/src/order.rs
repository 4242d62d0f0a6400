//! Order request assembly and service-owned order lifecycle results.
//!
//! `OrderRequest::assemble` is the only constructor: a pure transformation
//! of (quote, maker, hash lock, secret hashes, optional fee, source tag)
//! into the payload the order service expects. It performs no I/O and is
//! deterministic over its inputs.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use xswap_commit::{HashLock, SecretHash};

use crate::error::{CoreError, Result};
use crate::quote::{PresetKind, Quote};

/// Upper bound for a fee rate: 10000 bps = 100%.
pub const MAX_FEE_BPS: u16 = 10_000;

/// Optional integrator fee: `bps / 10000` of proceeds to `receiver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeTerms {
    pub bps: u16,
    /// Fee receiver. The all-zero address is accepted literally — some
    /// integrations use it as an explicit placeholder, so it is the
    /// caller's responsibility, not an error.
    pub receiver: Address,
}

impl FeeTerms {
    pub fn new(bps: u16, receiver: Address) -> Result<Self> {
        let terms = Self { bps, receiver };
        terms.validate()?;
        Ok(terms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bps > MAX_FEE_BPS {
            return Err(CoreError::InvalidFeeBps(self.bps));
        }
        Ok(())
    }
}

/// Assembled order payload for the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub maker_address: Address,
    pub hash_lock: HashLock,
    pub secret_hashes: Vec<SecretHash>,
    pub preset: PresetKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<FeeTerms>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl OrderRequest {
    /// Assemble an order request from a quote and the commitment artifacts.
    ///
    /// Validates that the fee (when present) is within bounds, that the
    /// quote actually offers the chosen preset, and that the hash lock
    /// covers exactly as many fills as the preset demands; settlement later
    /// maps revealed secrets back to fill indices, so a mismatch here would
    /// be unrecoverable downstream.
    pub fn assemble(
        quote: &Quote,
        maker_address: Address,
        hash_lock: HashLock,
        secret_hashes: Vec<SecretHash>,
        preset: PresetKind,
        fee: Option<FeeTerms>,
        source: Option<String>,
    ) -> Result<Self> {
        if let Some(fee) = &fee {
            fee.validate()?;
        }
        let chosen = quote.preset(preset)?;
        if hash_lock.fill_count() != secret_hashes.len()
            || secret_hashes.len() != chosen.secrets_count as usize
        {
            return Err(CoreError::FillCountMismatch {
                lock_fills: hash_lock.fill_count(),
                hashes: secret_hashes.len(),
            });
        }

        Ok(Self {
            maker_address,
            hash_lock,
            secret_hashes,
            preset,
            fee,
            source,
        })
    }
}

/// Result of server-side order creation.
///
/// The `order` payload is owned by the service and passed back verbatim on
/// submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedOrder {
    /// Order hash, the service-side identifier from here on.
    pub hash: String,
    pub quote_id: String,
    pub order: Value,
}

/// Acknowledgement of a submitted order. Shape is service-owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderSubmission(pub Value);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainId;
    use serde_json::json;
    use xswap_commit::{Secret, SecretVault};

    fn quote(secrets_count: u32) -> Quote {
        Quote::from_value(
            json!({ "presets": { "fast": { "secretsCount": secrets_count } } }),
            ChainId::BASE,
        )
        .unwrap()
    }

    fn commitment(count: usize) -> (HashLock, Vec<SecretHash>) {
        let secrets = SecretVault::new().generate(count);
        let hashes = secrets.iter().map(Secret::hash).collect();
        (HashLock::build(&secrets).unwrap(), hashes)
    }

    #[test]
    fn test_fee_bounds() {
        assert!(FeeTerms::new(0, Address::ZERO).is_ok());
        assert!(FeeTerms::new(MAX_FEE_BPS, Address::ZERO).is_ok());
        assert_eq!(
            FeeTerms::new(MAX_FEE_BPS + 1, Address::ZERO),
            Err(CoreError::InvalidFeeBps(10_001))
        );
    }

    #[test]
    fn test_zero_fee_receiver_is_valid() {
        // Explicit placeholder address, deliberately not rejected.
        let terms = FeeTerms::new(25, Address::ZERO).unwrap();
        assert_eq!(terms.receiver, Address::ZERO);
    }

    #[test]
    fn test_assemble_single_fill_carries_one_hash() {
        let (lock, hashes) = commitment(1);
        let request = OrderRequest::assemble(
            &quote(1),
            Address::ZERO,
            lock,
            hashes.clone(),
            PresetKind::Fast,
            None,
            Some("xswap".to_string()),
        )
        .unwrap();
        assert_eq!(request.secret_hashes, hashes);
        assert_eq!(request.secret_hashes.len(), 1);
    }

    #[test]
    fn test_assemble_rejects_fill_count_mismatch() {
        let (lock, mut hashes) = commitment(3);
        hashes.pop();
        let err = OrderRequest::assemble(
            &quote(3),
            Address::ZERO,
            lock,
            hashes,
            PresetKind::Fast,
            None,
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            CoreError::FillCountMismatch {
                lock_fills: 3,
                hashes: 2
            }
        );
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let (lock, hashes) = commitment(2);
        let build = || {
            OrderRequest::assemble(
                &quote(2),
                Address::ZERO,
                lock.clone(),
                hashes.clone(),
                PresetKind::Fast,
                Some(FeeTerms { bps: 10, receiver: Address::ZERO }),
                None,
            )
            .unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_request_wire_shape() {
        let (lock, hashes) = commitment(1);
        let request = OrderRequest::assemble(
            &quote(1),
            Address::ZERO,
            lock,
            hashes,
            PresetKind::Fast,
            None,
            Some("xswap".to_string()),
        )
        .unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["preset"], json!("fast"));
        assert_eq!(value["source"], json!("xswap"));
        assert!(value["secretHashes"].is_array());
        assert!(value.get("fee").is_none());
    }
}
