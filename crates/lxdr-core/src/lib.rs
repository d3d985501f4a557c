//! # lxdr-core — Foundational Types for the Ledger XDR Object Model
//!
//! This crate is the leaf of the workspace DAG. Every other `lxdr-*` crate
//! depends on it; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Amounts are fixed-point.** [`Amount`] wraps the signed 64-bit stroop
//!    count. Decimal strings enter the model only through [`descale`], which is
//!    the single place where precision and overflow errors can occur.
//!
//! 2. **One codec, two traits.** Every wire type implements [`XdrEncode`] and
//!    [`XdrDecode`] over the big-endian, 4-byte aligned XDR primitives in
//!    [`codec`]. Unions write their discriminator first; bounded sequences
//!    refuse to encode past their declared maximum.
//!
//! 3. **[`CanonicalXdr`] is the sole path to identifier hashing.** Pool IDs,
//!    balance IDs and transaction hashes are computed with [`sha256_digest`],
//!    which accepts nothing but `&CanonicalXdr`. A struct that cannot be fully
//!    encoded never reaches the hash function.
//!
//! 4. **Closed enumerations.** [`xdr_enum!`] declares an enumeration's ordinal
//!    and name tables once; unknown ordinals and names are hard errors.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod amount;
pub mod canonical;
pub mod codec;
pub mod digest;
pub mod enumeration;
pub mod error;
pub mod sequence;
pub mod strkey;

// Re-export primary types at crate root for ergonomic imports.
pub use amount::{descale, is_valid_amount, normalize_amount, scale, Amount, AmountInput};
pub use canonical::CanonicalXdr;
pub use codec::{ExtensionPoint, XdrDecode, XdrEncode, XdrReader, XdrWriter};
pub use digest::{sha256_digest, sha256_raw, Hash, Uint256};
pub use enumeration::XdrEnum;
pub use error::{LxdrError, ValidationError, XdrError};
pub use sequence::{BoundedBytes, BoundedString, BoundedVec, Loose};
pub use strkey::StrKeyVersion;
