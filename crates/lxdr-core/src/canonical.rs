//! # Canonical XDR Bytes
//!
//! This module defines `CanonicalXdr`, the sole construction path for bytes
//! used in identifier derivation (pool IDs, claimable-balance IDs,
//! transaction hashes).
//!
//! ## Security Invariant
//!
//! The `CanonicalXdr` newtype has a private inner field. The only way to
//! construct it is [`CanonicalXdr::new()`], which runs the value's full XDR
//! encoding into a fresh buffer. If any field is unset or any bound is
//! exceeded the constructor fails and no bytes exist to hash. A truncated
//! buffer that still hashes is therefore structurally impossible.

use crate::codec::XdrEncode;
use crate::error::XdrError;

/// Bytes produced exclusively by a complete XDR encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalXdr(Vec<u8>);

impl CanonicalXdr {
    /// Encode `value` into canonical bytes.
    ///
    /// # Errors
    ///
    /// Any [`XdrError`] raised by the value's encoder, e.g.
    /// [`XdrError::MissingField`] or [`XdrError::LengthExceeded`].
    pub fn new(value: &impl XdrEncode) -> Result<Self, XdrError> {
        value.to_xdr().map(Self)
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalXdr {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::XdrWriter;

    struct Incomplete;

    impl XdrEncode for Incomplete {
        fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
            w.write_u32(1);
            Err(XdrError::MissingField {
                type_name: "Incomplete",
                field: "second",
            })
        }
    }

    #[test]
    fn canonical_bytes_match_encoding() {
        let cb = CanonicalXdr::new(&7u32).unwrap();
        assert_eq!(cb.as_bytes(), &[0, 0, 0, 7]);
        assert_eq!(cb.len(), 4);
        assert!(!cb.is_empty());
    }

    #[test]
    fn partial_encoding_yields_no_bytes() {
        let err = CanonicalXdr::new(&Incomplete).unwrap_err();
        assert_eq!(
            err,
            XdrError::MissingField {
                type_name: "Incomplete",
                field: "second"
            }
        );
    }
}
