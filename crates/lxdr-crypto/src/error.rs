//! # Cryptographic Error Types
//!
//! Structured errors for key parsing and signature verification.

use thiserror::Error;

/// Errors from cryptographic operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The secret seed could not be parsed. The seed itself is never included.
    #[error("invalid secret seed: {0}")]
    InvalidSeed(String),

    /// The public key could not be parsed or is not a valid curve point.
    #[error("invalid Ed25519 public key: {0}")]
    InvalidPublicKey(String),

    /// A signature was not exactly 64 bytes.
    #[error("invalid Ed25519 signature length: expected 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    /// Signature verification failed.
    #[error("Ed25519 verification failed: {0}")]
    VerificationFailed(String),
}
