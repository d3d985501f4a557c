//! # lxdr-crypto — Signing Collaborator
//!
//! Ed25519 key handling for ledger transactions:
//!
//! - [`KeyPair`] holds a signing key built from a 32-byte seed or an `S…`
//!   secret seed and signs transaction hashes.
//! - [`Ed25519PublicKey`] renders as a `G…` account StrKey and yields the
//!   four-byte signature hint.
//! - [`Signer`] is the seam the envelope layer signs through, so hardware or
//!   remote signers can stand in for an in-memory key.
//!
//! ## Crate Policy
//!
//! - Depends only on `lxdr-core` internally.
//! - Signing input is always a [`Hash`](lxdr_core::Hash), never raw bytes.
//! - Secret material is never serialized, logged, or echoed in errors.

pub mod ed25519;
pub mod error;

pub use ed25519::{verify, Ed25519PublicKey, Ed25519Signature, KeyPair, SignatureHint, Signer};
pub use error::CryptoError;
