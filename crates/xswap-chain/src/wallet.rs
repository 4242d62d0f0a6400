//! Maker wallet key loading.
//!
//! Security notes:
//! - Private keys are parsed through zeroizing buffers and held in
//!   `PrivateKeySigner`, which handles secure memory.
//! - Keys are loaded once at startup; there is no runtime rotation.
//! - Never log private key material.

use std::path::PathBuf;

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use zeroize::Zeroizing;

use crate::error::KeyError;

/// Source of the maker private key.
#[derive(Debug, Clone)]
pub enum KeySource {
    /// Load from an environment variable (development).
    EnvVar { var_name: String },
    /// Load from a file (production, recommend 0600 permissions).
    File { path: PathBuf },
}

/// The maker wallet: signer plus derived address.
pub struct Wallet {
    signer: PrivateKeySigner,
    address: Address,
}

impl Wallet {
    /// Load the key from the given source and verify the derived address.
    ///
    /// # Errors
    /// Returns `KeyError` if the source is missing, the hex is invalid,
    /// the key is rejected, or the derived address does not match
    /// `expected_address` (when provided).
    pub fn load(source: KeySource, expected_address: Option<Address>) -> Result<Self, KeyError> {
        let secret_bytes: Zeroizing<Vec<u8>> = match source {
            KeySource::EnvVar { ref var_name } => {
                let raw = std::env::var(var_name)
                    .map_err(|_| KeyError::EnvVarNotFound(var_name.clone()))?;
                parse_hex_key(&raw)?
            }
            KeySource::File { ref path } => {
                let content = std::fs::read_to_string(path)?;
                parse_hex_key(&content)?
            }
        };

        Self::from_secret_bytes(&secret_bytes, expected_address)
    }

    /// Build from raw key bytes.
    pub fn from_secret_bytes(
        secret_bytes: &[u8],
        expected_address: Option<Address>,
    ) -> Result<Self, KeyError> {
        let signer = PrivateKeySigner::from_slice(secret_bytes)
            .map_err(|e| KeyError::InvalidKey(e.to_string()))?;

        let address = signer.address();
        if let Some(expected) = expected_address {
            if address != expected {
                return Err(KeyError::AddressMismatch {
                    expected,
                    actual: address,
                });
            }
        }

        Ok(Self { signer, address })
    }

    /// The maker address derived from the key.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The signing key, for attaching to an RPC provider.
    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Parse a hex key string, tolerating a `0x` prefix and whitespace.
fn parse_hex_key(raw: &str) -> Result<Zeroizing<Vec<u8>>, KeyError> {
    let trimmed = raw.trim().trim_start_matches("0x");
    Ok(Zeroizing::new(hex::decode(trimmed)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    // secp256k1 private key 0x...01 derives this well-known address.
    const KEY_ONE_ADDRESS: &str = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf";

    fn key_one() -> [u8; 32] {
        let mut key = [0u8; 32];
        key[31] = 1;
        key
    }

    #[test]
    fn test_derives_expected_address() {
        let wallet = Wallet::from_secret_bytes(&key_one(), None).unwrap();
        assert_eq!(wallet.address(), KEY_ONE_ADDRESS.parse::<Address>().unwrap());
    }

    #[test]
    fn test_address_mismatch_is_rejected() {
        let err = Wallet::from_secret_bytes(&key_one(), Some(Address::ZERO)).unwrap_err();
        assert!(matches!(err, KeyError::AddressMismatch { .. }));
    }

    #[test]
    fn test_parse_hex_key_tolerates_prefix_and_whitespace() {
        let plain = parse_hex_key("0000000000000000000000000000000000000000000000000000000000000001")
            .unwrap();
        let prefixed = parse_hex_key(
            " 0x0000000000000000000000000000000000000000000000000000000000000001\n",
        )
        .unwrap();
        assert_eq!(plain.as_slice(), prefixed.as_slice());
    }

    #[test]
    fn test_invalid_key_is_rejected() {
        assert!(matches!(
            Wallet::from_secret_bytes(&[0u8; 32], None),
            Err(KeyError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_debug_hides_key_material() {
        let wallet = Wallet::from_secret_bytes(&key_one(), None).unwrap();
        let rendered = format!("{wallet:?}");
        assert!(rendered.contains("address"));
        assert!(!rendered.contains("signer"));
    }
}
