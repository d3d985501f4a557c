//! # Digests and 256-bit Values
//!
//! [`Hash`] is the XDR `typedef opaque Hash[32]`; [`Uint256`] is the XDR
//! `typedef opaque uint256[32]` used for raw public keys. Both serialize as
//! lowercase hex.
//!
//! ## Security Invariant
//!
//! [`sha256_digest()`] accepts only `&CanonicalXdr`, never raw bytes, so every
//! protocol identifier is computed over a complete encoding. [`sha256_raw()`]
//! exists for the one input that is not XDR: the network passphrase.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalXdr;
use crate::codec::{XdrDecode, XdrEncode, XdrReader, XdrWriter};
use crate::error::{ValidationError, XdrError};

macro_rules! opaque32 {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(into = "String", try_from = "String")]
        pub struct $name(pub [u8; 32]);

        impl $name {
            /// Wrap raw bytes.
            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// The raw 32 bytes.
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Lowercase hex rendering.
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            /// Parse exactly 64 hex characters.
            pub fn from_hex(text: &str) -> Result<Self, ValidationError> {
                let mut out = [0u8; 32];
                hex::decode_to_slice(text.trim(), &mut out)
                    .map_err(|e| ValidationError::InvalidHex(format!("{text}: {e}")))?;
                Ok(Self(out))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.to_hex()
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::from_hex(&value)
            }
        }

        impl XdrEncode for $name {
            fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
                w.write_fixed_opaque(&self.0);
                Ok(())
            }
        }

        impl XdrDecode for $name {
            fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
                r.read_fixed_opaque::<32>().map(Self)
            }
        }
    };
}

opaque32! {
    /// A 32-byte SHA-256 digest.
    Hash
}

opaque32! {
    /// A raw 256-bit value, such as an ed25519 public key.
    Uint256
}

/// Compute the SHA-256 digest of canonical XDR bytes.
pub fn sha256_digest(data: &CanonicalXdr) -> Hash {
    sha256_raw(data.as_bytes())
}

/// Compute the SHA-256 digest of arbitrary bytes.
///
/// Prefer [`sha256_digest()`] for anything derived from model values.
pub fn sha256_raw(bytes: &[u8]) -> Hash {
    let digest = Sha256::digest(bytes);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Hash(out)
}
