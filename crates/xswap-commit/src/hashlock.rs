//! Hash-lock construction for single- and multi-fill orders.
//!
//! A hash lock is the cryptographic commitment the settlement protocol must
//! see satisfied (by a revealed secret) before releasing funds. The two
//! shapes are deliberately asymmetric, as required by the external
//! settlement protocol:
//!
//! - one fill commits to the raw secret directly,
//! - multiple fills commit to an ordered leaf set where
//!   `leaf_i = keccak256(be_u64(i) ++ secret_hash_i)`.
//!
//! Leaf order is fixed: settlement maps a revealed secret back to its fill
//! index by position, so the leaves must match the order the secrets were
//! generated in.

use alloy::primitives::{keccak256, B256};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::error::{CommitError, CommitResult};
use crate::secret::{Secret, SecretHash};

/// Commitment over the fills of one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashLock {
    /// Single fill: wraps the raw secret, not a derived leaf.
    Single(Secret),
    /// Multiple fills: ordered leaf commitments, one per fill.
    Multiple(Vec<B256>),
}

impl HashLock {
    /// Build the hash lock for an ordered sequence of fill secrets.
    ///
    /// Rebuilding from the same secrets in the same order yields a
    /// bit-identical lock; downstream verification depends on this.
    pub fn build(secrets: &[Secret]) -> CommitResult<Self> {
        match secrets {
            [] => Err(CommitError::NoFills),
            [single] => Ok(Self::for_single_fill(single.clone())),
            many => {
                let hashes: Vec<SecretHash> = many.iter().map(Secret::hash).collect();
                Self::for_multiple_fills(&hashes)
            }
        }
    }

    /// Single-fill lock over the raw secret.
    pub fn for_single_fill(secret: Secret) -> Self {
        Self::Single(secret)
    }

    /// Multi-fill lock over ordered secret hashes.
    ///
    /// `leaf_i` is a pure function of `(i, secret_hash_i)` only. An empty
    /// hash set is rejected: a leafless `Multiple` has no commitment.
    pub fn for_multiple_fills(secret_hashes: &[SecretHash]) -> CommitResult<Self> {
        if secret_hashes.is_empty() {
            return Err(CommitError::NoFills);
        }
        let leaves = secret_hashes
            .iter()
            .enumerate()
            .map(|(i, hash)| Self::leaf(i as u64, hash))
            .collect();
        Ok(Self::Multiple(leaves))
    }

    /// `keccak256(be_u64(fill_index) ++ secret_hash)`, the packed encoding
    /// the settlement contracts verify against.
    pub fn leaf(fill_index: u64, secret_hash: &SecretHash) -> B256 {
        let mut packed = [0u8; 8 + 32];
        packed[..8].copy_from_slice(&fill_index.to_be_bytes());
        packed[8..].copy_from_slice(secret_hash.as_b256().as_slice());
        keccak256(packed)
    }

    /// Number of fills this lock covers.
    pub fn fill_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multiple(leaves) => leaves.len(),
        }
    }

    /// Ordered leaves of a multi-fill lock, if any.
    pub fn leaves(&self) -> Option<&[B256]> {
        match self {
            Self::Single(_) => None,
            Self::Multiple(leaves) => Some(leaves),
        }
    }

    /// The single commitment value transmitted with the order.
    ///
    /// Single fill: `keccak256(secret)`. Multiple fills: a Merkle-style
    /// root over the ordered leaves (odd node promoted unchanged). Raw
    /// secret bytes never leave this type.
    pub fn commitment(&self) -> B256 {
        match self {
            Self::Single(secret) => secret.hash().0,
            Self::Multiple(leaves) => merkle_root(leaves),
        }
    }
}

/// Root of a Merkle-style tree over the leaf sequence.
fn merkle_root(leaves: &[B256]) -> B256 {
    debug_assert!(!leaves.is_empty());
    let mut level: Vec<B256> = leaves.to_vec();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| match pair {
                [left, right] => {
                    let mut packed = [0u8; 64];
                    packed[..32].copy_from_slice(left.as_slice());
                    packed[32..].copy_from_slice(right.as_slice());
                    keccak256(packed)
                }
                [odd] => *odd,
                _ => unreachable!(),
            })
            .collect();
    }
    level[0]
}

impl Serialize for HashLock {
    /// Wire form: the leaf sequence for multi-fill locks, the secret's
    /// commitment for single-fill locks. Secrets are never serialized.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(secret) => secret.hash().0.serialize(serializer),
            Self::Multiple(leaves) => {
                let mut seq = serializer.serialize_seq(Some(leaves.len()))?;
                for leaf in leaves {
                    seq.serialize_element(leaf)?;
                }
                seq.end()
            }
        }
    }
}
