//! # Bounded Sequences
//!
//! XDR arrays and variable opaque data carry a declared maximum length
//! (`T elements<MAX>`, `opaque data<MAX>`, `string text<MAX>`). The bound is
//! part of the type here, as a const generic.
//!
//! ## Invariant
//!
//! A sequence may be *built* past its bound, but it cannot be *encoded* past
//! it: encoding fails with [`XdrError::LengthExceeded`] and never truncates.
//! Decoding rejects over-long length prefixes before reading any element.
//!
//! Mutation is copy-on-write: [`BoundedVec::pushed`] returns a new sequence
//! and leaves the receiver untouched.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{XdrDecode, XdrEncode, XdrReader, XdrWriter};
use crate::error::XdrError;

// ---------------------------------------------------------------------------
// BoundedVec
// ---------------------------------------------------------------------------

/// An ordered list of at most `MAX` elements on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundedVec<T, const MAX: usize>(Vec<T>);

/// One entry of loosely-typed sequence input: either an already typed
/// element or text to be parsed with the element's `FromStr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loose<T> {
    /// An element that is already typed.
    Typed(T),
    /// Canonical text for an element.
    Text(String),
}

impl<T, const MAX: usize> BoundedVec<T, MAX> {
    /// The declared maximum length.
    pub const MAX_LEN: usize = MAX;

    /// An empty sequence.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// A sequence holding exactly one element.
    pub fn single(item: T) -> Self {
        Self(vec![item])
    }

    /// Elements as a slice, in insertion order.
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Consume the sequence and return its elements.
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }

    /// Returns a new sequence with `item` appended.
    pub fn pushed(&self, item: T) -> Self
    where
        T: Clone,
    {
        let mut items = self.0.clone();
        items.push(item);
        Self(items)
    }

    /// Fail if the sequence is longer than `MAX`.
    pub fn check_bounds(&self) -> Result<(), XdrError> {
        if self.0.len() > MAX {
            return Err(XdrError::LengthExceeded {
                type_name: std::any::type_name::<Self>(),
                max: MAX,
                actual: self.0.len(),
            });
        }
        Ok(())
    }

    /// Normalize loosely-typed input into a typed sequence.
    ///
    /// Text entries are parsed with the element type's canonical-string
    /// parser; the first parse failure aborts normalization.
    pub fn normalize<I>(items: I) -> Result<Self, T::Err>
    where
        T: FromStr,
        I: IntoIterator<Item = Loose<T>>,
    {
        items
            .into_iter()
            .map(|item| match item {
                Loose::Typed(value) => Ok(value),
                Loose::Text(text) => text.parse(),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl<T, const MAX: usize> Default for BoundedVec<T, MAX> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const MAX: usize> Deref for BoundedVec<T, MAX> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T, const MAX: usize> From<Vec<T>> for BoundedVec<T, MAX> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<T, const MAX: usize> FromIterator<T> for BoundedVec<T, MAX> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a, T, const MAX: usize> IntoIterator for &'a BoundedVec<T, MAX> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: XdrEncode, const MAX: usize> XdrEncode for BoundedVec<T, MAX> {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.check_bounds()?;
        w.write_len(self.0.len(), MAX, std::any::type_name::<Self>())?;
        for item in &self.0 {
            item.encode_xdr(w)?;
        }
        Ok(())
    }
}

impl<T: XdrDecode, const MAX: usize> XdrDecode for BoundedVec<T, MAX> {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        let len = r.read_len(MAX, std::any::type_name::<Self>())?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(T::decode_xdr(r)?);
        }
        Ok(Self(items))
    }
}

impl<T: Serialize, const MAX: usize> Serialize for BoundedVec<T, MAX> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>, const MAX: usize> Deserialize<'de> for BoundedVec<T, MAX> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        if items.len() > MAX {
            return Err(serde::de::Error::custom(format!(
                "sequence length {} exceeds maximum {MAX}",
                items.len()
            )));
        }
        Ok(Self(items))
    }
}

// ---------------------------------------------------------------------------
// BoundedBytes
// ---------------------------------------------------------------------------

/// Variable-length opaque data of at most `MAX` bytes (`opaque<MAX>`).
///
/// Serializes as lowercase hex.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BoundedBytes<const MAX: usize>(Vec<u8>);

impl<const MAX: usize> BoundedBytes<MAX> {
    /// Wrap `bytes`, rejecting more than `MAX` bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, XdrError> {
        let bytes = bytes.into();
        if bytes.len() > MAX {
            return Err(XdrError::LengthExceeded {
                type_name: "opaque",
                max: MAX,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes))
    }

    /// Wrap a full-length array; always within bound.
    pub fn from_array(bytes: [u8; MAX]) -> Self {
        Self(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl<const MAX: usize> XdrEncode for BoundedBytes<MAX> {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_var_opaque(&self.0, MAX, "opaque")
    }
}

impl<const MAX: usize> XdrDecode for BoundedBytes<MAX> {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_var_opaque(MAX, "opaque").map(Self)
    }
}

impl<const MAX: usize> Serialize for BoundedBytes<MAX> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de, const MAX: usize> Deserialize<'de> for BoundedBytes<MAX> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let bytes = hex::decode(text.trim()).map_err(serde::de::Error::custom)?;
        Self::new(bytes).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// BoundedString
// ---------------------------------------------------------------------------

/// An XDR `string<MAX>`: at most `MAX` bytes.
///
/// The wire form is raw bytes and need not be UTF-8; [`fmt::Display`]
/// renders invalid sequences lossily.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BoundedString<const MAX: usize>(Vec<u8>);

impl<const MAX: usize> BoundedString<MAX> {
    /// Wrap `text`, rejecting more than `MAX` bytes.
    pub fn new(text: impl Into<Vec<u8>>) -> Result<Self, XdrError> {
        let bytes = text.into();
        if bytes.len() > MAX {
            return Err(XdrError::LengthExceeded {
                type_name: "string",
                max: MAX,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }
}

impl<const MAX: usize> fmt::Display for BoundedString<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl<const MAX: usize> XdrEncode for BoundedString<MAX> {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_var_opaque(&self.0, MAX, "string")
    }
}

impl<const MAX: usize> XdrDecode for BoundedString<MAX> {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_var_opaque(MAX, "string").map(Self)
    }
}

impl<const MAX: usize> Serialize for BoundedString<MAX> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de, const MAX: usize> Deserialize<'de> for BoundedString<MAX> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::new(text).map_err(serde::de::Error::custom)
    }
}
