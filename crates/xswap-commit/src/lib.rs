//! Secret generation and hash-lock commitment construction.
//!
//! This crate owns the cryptographic half of a swap attempt:
//! - `SecretVault`: per-fill secret generation from a CSPRNG
//! - `Secret` / `SecretHash`: fill secrets and their public commitments
//! - `HashLock`: single-fill and multi-fill commitment construction
//!
//! Secrets exist only for the lifetime of one swap attempt and are
//! zeroized on drop.

pub mod error;
pub mod hashlock;
pub mod secret;

pub use error::{CommitError, CommitResult};
pub use hashlock::HashLock;
pub use secret::{Secret, SecretHash, SecretVault, SECRET_LEN};
