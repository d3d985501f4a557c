//! # XDR Codec Primitives
//!
//! Big-endian External Data Representation as used on the ledger wire:
//!
//! - 32- and 64-bit integers are written big-endian, four-byte aligned.
//! - Booleans are a 32-bit word, `0` or `1`; anything else is a decode error.
//! - Fixed opaque data is written verbatim and zero-padded to a multiple of
//!   four bytes. Variable opaque data and arrays carry a 32-bit length prefix.
//! - Optionals are a boolean presence word followed by the value if present.
//!
//! [`XdrEncode`] and [`XdrDecode`] are the two traits every wire type
//! implements. Encoding always targets a fresh [`XdrWriter`]; a failure part
//! way through drops the buffer, so a caller never observes a truncated
//! encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::XdrError;

/// Maximum nesting depth accepted by [`XdrReader::nested`].
pub const MAX_DECODE_DEPTH: usize = 64;

fn padding(len: usize) -> usize {
    (4 - len % 4) % 4
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Append-only XDR output buffer.
#[derive(Debug, Default)]
pub struct XdrWriter {
    buf: Vec<u8>,
}

impl XdrWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the writer and return the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u32(u32::from(value));
    }

    /// Write fixed-length opaque data followed by zero padding.
    pub fn write_fixed_opaque(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
        self.buf.extend(std::iter::repeat(0u8).take(padding(bytes.len())));
    }

    /// Write a length prefix, refusing lengths above `max`.
    pub fn write_len(
        &mut self,
        len: usize,
        max: usize,
        type_name: &'static str,
    ) -> Result<(), XdrError> {
        if len > max {
            return Err(XdrError::LengthExceeded {
                type_name,
                max,
                actual: len,
            });
        }
        let word = u32::try_from(len).map_err(|_| XdrError::LengthExceeded {
            type_name,
            max,
            actual: len,
        })?;
        self.write_u32(word);
        Ok(())
    }

    /// Write variable-length opaque data: length prefix, bytes, padding.
    pub fn write_var_opaque(
        &mut self,
        bytes: &[u8],
        max: usize,
        type_name: &'static str,
    ) -> Result<(), XdrError> {
        self.write_len(bytes.len(), max, type_name)?;
        self.write_fixed_opaque(bytes);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Cursor over an XDR input buffer.
#[derive(Debug)]
pub struct XdrReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> XdrReader<'a> {
    /// Start reading at the beginning of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            depth: 0,
        }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], XdrError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(XdrError::UnexpectedEof {
                needed: n,
                remaining,
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], XdrError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn skip_padding(&mut self, len: usize) -> Result<(), XdrError> {
        let pad = self.take(padding(len))?;
        if pad.iter().any(|b| *b != 0) {
            return Err(XdrError::NonZeroPadding);
        }
        Ok(())
    }

    pub fn read_i32(&mut self) -> Result<i32, XdrError> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, XdrError> {
        Ok(u32::from_be_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, XdrError> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, XdrError> {
        Ok(u64::from_be_bytes(self.take_array()?))
    }

    pub fn read_bool(&mut self) -> Result<bool, XdrError> {
        match self.read_u32()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(XdrError::InvalidBool(other)),
        }
    }

    /// Read `N` bytes of fixed opaque data and verify the zero padding.
    pub fn read_fixed_opaque<const N: usize>(&mut self) -> Result<[u8; N], XdrError> {
        let out = self.take_array::<N>()?;
        self.skip_padding(N)?;
        Ok(out)
    }

    /// Read a length prefix, refusing lengths above `max`.
    pub fn read_len(&mut self, max: usize, type_name: &'static str) -> Result<usize, XdrError> {
        let len = self.read_u32()? as usize;
        if len > max {
            return Err(XdrError::LengthExceeded {
                type_name,
                max,
                actual: len,
            });
        }
        Ok(len)
    }

    /// Read variable-length opaque data bounded by `max`.
    pub fn read_var_opaque(
        &mut self,
        max: usize,
        type_name: &'static str,
    ) -> Result<Vec<u8>, XdrError> {
        let len = self.read_len(max, type_name)?;
        let bytes = self.take(len)?.to_vec();
        self.skip_padding(len)?;
        Ok(bytes)
    }

    /// Run `f` one nesting level deeper, failing past [`MAX_DECODE_DEPTH`].
    ///
    /// Recursive types (claim predicates) decode their children through this
    /// guard so hostile input cannot exhaust the stack.
    pub fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, XdrError>,
    ) -> Result<T, XdrError> {
        if self.depth >= MAX_DECODE_DEPTH {
            return Err(XdrError::DepthLimitExceeded(MAX_DECODE_DEPTH));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Assert that the whole buffer was consumed.
    pub fn finish(self) -> Result<(), XdrError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(XdrError::TrailingBytes(n)),
        }
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// A value with a canonical XDR encoding.
pub trait XdrEncode {
    /// Append this value's encoding to `w`.
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError>;

    /// Encode into a fresh buffer.
    fn to_xdr(&self) -> Result<Vec<u8>, XdrError> {
        let mut w = XdrWriter::new();
        self.encode_xdr(&mut w)?;
        Ok(w.into_bytes())
    }

    /// Encode and frame as standard padded base64.
    fn to_xdr_base64(&self) -> Result<String, XdrError> {
        Ok(STANDARD.encode(self.to_xdr()?))
    }
}

/// A value that can be decoded from its XDR encoding.
pub trait XdrDecode: Sized {
    /// Read one value from `r`.
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError>;

    /// Decode a value that must occupy the whole of `bytes`.
    fn from_xdr(bytes: &[u8]) -> Result<Self, XdrError> {
        let mut r = XdrReader::new(bytes);
        let value = Self::decode_xdr(&mut r)?;
        r.finish()?;
        Ok(value)
    }

    /// Decode from standard padded base64.
    fn from_xdr_base64(encoded: &str) -> Result<Self, XdrError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| XdrError::Base64(e.to_string()))?;
        Self::from_xdr(&bytes)
    }
}

macro_rules! impl_xdr_int {
    ($($ty:ty => $write:ident, $read:ident;)+) => {
        $(
            impl XdrEncode for $ty {
                fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
                    w.$write(*self);
                    Ok(())
                }
            }

            impl XdrDecode for $ty {
                fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
                    r.$read()
                }
            }
        )+
    };
}

impl_xdr_int! {
    i32 => write_i32, read_i32;
    u32 => write_u32, read_u32;
    i64 => write_i64, read_i64;
    u64 => write_u64, read_u64;
    bool => write_bool, read_bool;
}

impl<const N: usize> XdrEncode for [u8; N] {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_fixed_opaque(self);
        Ok(())
    }
}

impl<const N: usize> XdrDecode for [u8; N] {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_fixed_opaque::<N>()
    }
}

impl<T: XdrEncode> XdrEncode for Option<T> {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Some(value) => {
                w.write_bool(true);
                value.encode_xdr(w)
            }
            None => {
                w.write_bool(false);
                Ok(())
            }
        }
    }
}

impl<T: XdrDecode> XdrDecode for Option<T> {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        if r.read_bool()? {
            Ok(Some(T::decode_xdr(r)?))
        } else {
            Ok(None)
        }
    }
}

impl<T: XdrEncode + ?Sized> XdrEncode for Box<T> {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        (**self).encode_xdr(w)
    }
}

impl<T: XdrDecode> XdrDecode for Box<T> {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        T::decode_xdr(r).map(Box::new)
    }
}

impl<T: XdrEncode + ?Sized> XdrEncode for &T {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        (**self).encode_xdr(w)
    }
}

/// The reserved `union switch (int v) { case 0: void; }` extension slot.
///
/// Only arm `0` exists in this model; any other arm decodes as
/// [`XdrError::UnsupportedArm`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtensionPoint;

impl XdrEncode for ExtensionPoint {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_i32(0);
        Ok(())
    }
}

impl XdrDecode for ExtensionPoint {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_i32()? {
            0 => Ok(Self),
            other => Err(XdrError::UnsupportedArm {
                type_name: "ExtensionPoint",
                discriminant: other,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_big_endian() {
        let mut w = XdrWriter::new();
        w.write_i32(-2);
        w.write_u64(0x0102_0304_0506_0708);
        assert_eq!(
            w.into_bytes(),
            vec![0xff, 0xff, 0xff, 0xfe, 1, 2, 3, 4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn fixed_opaque_is_zero_padded() {
        let mut w = XdrWriter::new();
        w.write_fixed_opaque(b"abcde");
        assert_eq!(w.into_bytes(), b"abcde\0\0\0".to_vec());
    }

    #[test]
    fn var_opaque_has_length_prefix_and_padding() {
        let mut w = XdrWriter::new();
        w.write_var_opaque(b"hello", 28, "test").unwrap();
        assert_eq!(w.into_bytes(), b"\0\0\0\x05hello\0\0\0".to_vec());
    }

    #[test]
    fn var_opaque_over_max_rejected() {
        let mut w = XdrWriter::new();
        let err = w.write_var_opaque(&[0u8; 5], 4, "test").unwrap_err();
        assert_eq!(
            err,
            XdrError::LengthExceeded {
                type_name: "test",
                max: 4,
                actual: 5
            }
        );
        assert!(w.is_empty());
    }

    #[test]
    fn bool_word_must_be_zero_or_one() {
        assert_eq!(bool::from_xdr(&[0, 0, 0, 1]), Ok(true));
        assert_eq!(bool::from_xdr(&[0, 0, 0, 2]), Err(XdrError::InvalidBool(2)));
    }

    #[test]
    fn non_zero_padding_rejected() {
        let mut r = XdrReader::new(b"abc\x01");
        assert_eq!(r.read_fixed_opaque::<3>(), Err(XdrError::NonZeroPadding));
    }

    #[test]
    fn truncated_input_reports_eof() {
        let err = i64::from_xdr(&[0, 0, 0, 1]).unwrap_err();
        assert_eq!(
            err,
            XdrError::UnexpectedEof {
                needed: 8,
                remaining: 4
            }
        );
    }

    #[test]
    fn trailing_bytes_rejected() {
        assert_eq!(
            u32::from_xdr(&[0, 0, 0, 1, 0]),
            Err(XdrError::TrailingBytes(1))
        );
    }

    #[test]
    fn optional_presence_word() {
        assert_eq!(Some(7u32).to_xdr().unwrap(), vec![0, 0, 0, 1, 0, 0, 0, 7]);
        assert_eq!(None::<u32>.to_xdr().unwrap(), vec![0, 0, 0, 0]);
        assert_eq!(
            Option::<u32>::from_xdr(&[0, 0, 0, 1, 0, 0, 0, 7]),
            Ok(Some(7))
        );
    }

    #[test]
    fn extension_point_only_accepts_arm_zero() {
        assert_eq!(ExtensionPoint.to_xdr().unwrap(), vec![0, 0, 0, 0]);
        assert_eq!(
            ExtensionPoint::from_xdr(&[0, 0, 0, 1]),
            Err(XdrError::UnsupportedArm {
                type_name: "ExtensionPoint",
                discriminant: 1
            })
        );
    }

    #[test]
    fn base64_framing_roundtrip() {
        let encoded = 42u32.to_xdr_base64().unwrap();
        assert_eq!(encoded, "AAAAKg==");
        assert_eq!(u32::from_xdr_base64(&encoded), Ok(42));
        assert!(matches!(
            u32::from_xdr_base64("not base64!"),
            Err(XdrError::Base64(_))
        ));
    }

    #[test]
    fn nesting_depth_is_bounded() {
        fn descend(r: &mut XdrReader<'_>, levels: usize) -> Result<(), XdrError> {
            if levels == 0 {
                return Ok(());
            }
            r.nested(|r| descend(r, levels - 1))
        }
        let mut r = XdrReader::new(&[]);
        assert!(descend(&mut r, MAX_DECODE_DEPTH).is_ok());
        assert_eq!(
            descend(&mut r, MAX_DECODE_DEPTH + 1),
            Err(XdrError::DepthLimitExceeded(MAX_DECODE_DEPTH))
        );
    }
}
