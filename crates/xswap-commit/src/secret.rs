//! Fill secrets and their public commitments.
//!
//! Each partial fill of an order is unlocked by revealing a 32-byte secret.
//! Secrets are generated from the OS CSPRNG, held in zeroizing buffers, and
//! rendered only in the `0x`-prefixed hex form the downstream commitment
//! consumer requires (a bare fixed-width hex string is rejected by
//! convention).

use std::fmt;

use alloy::primitives::{keccak256, B256};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Length of a fill secret in bytes.
pub const SECRET_LEN: usize = 32;

/// A 32-byte fill secret.
///
/// Owned exclusively by the coordinator for the lifetime of one swap
/// attempt. Never serialized; the wire only ever carries [`SecretHash`] or
/// hash-lock leaves derived from it. The buffer is zeroized on drop.
#[derive(Clone)]
pub struct Secret(Zeroizing<[u8; SECRET_LEN]>);

impl Secret {
    /// Draw a fresh secret from the OS CSPRNG.
    pub fn random() -> Self {
        let mut bytes = Zeroizing::new([0u8; SECRET_LEN]);
        OsRng.fill_bytes(bytes.as_mut());
        Self(bytes)
    }

    /// Construct from raw bytes (for settlement reveal of a known secret).
    pub fn from_bytes(bytes: [u8; SECRET_LEN]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Raw secret bytes.
    pub fn as_bytes(&self) -> &[u8; SECRET_LEN] {
        &self.0
    }

    /// `0x`-prefixed hex rendering.
    ///
    /// The leading marker is required: downstream commitment functions
    /// expect a self-describing encoding, not a bare 64-char hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0.as_ref()))
    }

    /// Public commitment to this secret: `keccak256(secret bytes)`.
    ///
    /// Pure and deterministic, so hash-lock construction can be retried
    /// without regenerating secrets.
    pub fn hash(&self) -> SecretHash {
        SecretHash(keccak256(self.0.as_ref()))
    }
}

impl PartialEq for Secret {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_ref() == other.0.as_ref()
    }
}

impl Eq for Secret {}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never log secret material.
        write!(f, "Secret(<redacted>)")
    }
}

/// One-way commitment to a [`Secret`]. Public; safe to transmit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretHash(pub B256);

impl SecretHash {
    pub fn as_b256(&self) -> &B256 {
        &self.0
    }
}

impl fmt::Display for SecretHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // B256 renders as 0x-prefixed hex.
        write!(f, "{}", self.0)
    }
}

/// Generator for per-fill secrets.
///
/// Each swap attempt constructs its own vault; secrets are never cached or
/// reused across calls or attempts. The requested count must equal the
/// quote's `secrets_count` — that is the caller's responsibility, the vault
/// does not re-validate against any external source.
#[derive(Debug, Default)]
pub struct SecretVault;

impl SecretVault {
    pub fn new() -> Self {
        Self
    }

    /// Generate `count` fresh, independent secrets, in fill order.
    pub fn generate(&self, count: usize) -> Vec<Secret> {
        (0..count).map(|_| Secret::random()).collect()
    }

    /// Hash a secret into its public commitment.
    pub fn hash(secret: &Secret) -> SecretHash {
        secret.hash()
    }
}
