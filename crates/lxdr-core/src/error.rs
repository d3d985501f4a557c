//! # Error Hierarchy
//!
//! Structured error types for the ledger XDR object model, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Two families exist because they fail at different points:
//!
//! - [`ValidationError`] is raised while *constructing* a value from loose
//!   input (decimal strings, canonical asset strings, StrKeys).
//! - [`XdrError`] is raised while *encoding or decoding* a value. Encoding
//!   errors are raised before any byte reaches the caller.
//!
//! [`LxdrError`] unifies both for callers that do not care which stage failed.

use thiserror::Error;

/// Top-level error type for the ledger XDR object model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LxdrError {
    /// Encoding or decoding failure.
    #[error("xdr error: {0}")]
    Xdr(#[from] XdrError),

    /// Construction-time validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors raised by the XDR codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XdrError {
    /// An ordinal or name outside an enumeration's closed option set.
    #[error("invalid {type_name} value: {value}")]
    InvalidEnumValue {
        /// The enumeration type.
        type_name: &'static str,
        /// The rejected ordinal or name, rendered as text.
        value: String,
    },

    /// A bounded sequence holds more elements than its declared maximum.
    #[error("{type_name} length {actual} exceeds maximum {max}")]
    LengthExceeded {
        /// The bounded type.
        type_name: &'static str,
        /// Declared maximum length.
        max: usize,
        /// Actual length.
        actual: usize,
    },

    /// A required field was unset when the struct was encoded or built.
    #[error("missing required field {type_name}.{field}")]
    MissingField {
        /// The struct being encoded.
        type_name: &'static str,
        /// The unset field.
        field: &'static str,
    },

    /// The discriminator is a valid ordinal but this model has no arm for it.
    #[error("unsupported {type_name} arm: {discriminant}")]
    UnsupportedArm {
        /// The union type.
        type_name: &'static str,
        /// The discriminator ordinal.
        discriminant: i32,
    },

    /// The input ended before the value was complete.
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Bytes required by the next read.
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// Opaque padding bytes were not zero.
    #[error("non-zero padding bytes")]
    NonZeroPadding,

    /// A boolean word other than 0 or 1.
    #[error("invalid boolean word: {0}")]
    InvalidBool(u32),

    /// Bytes remained after the top-level value was decoded.
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    /// Recursive structure nested deeper than the decoder allows.
    #[error("nesting depth limit {0} exceeded")]
    DepthLimitExceeded(usize),

    /// The bytes decoded but describe a value that violates its invariants.
    #[error("invalid {type_name}: {reason}")]
    InvalidValue {
        /// The type being decoded.
        type_name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Base64 framing could not be decoded.
    #[error("base64 decode error: {0}")]
    Base64(String),
}

/// Errors raised while constructing model values from loose input.
///
/// Each variant carries the rejected input so that callers can report it
/// without holding on to the original argument.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Decimal amount unparsable, over-precise, or out of range.
    #[error("invalid amount \"{input}\": {reason}")]
    InvalidAmount {
        /// The rejected amount string.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Malformed canonical asset string or asset code.
    #[error("invalid asset \"{input}\": {reason}")]
    InvalidAsset {
        /// The rejected asset string or code.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Liquidity-pool assets are identical or mis-ordered.
    #[error("invalid liquidity pool assets: {0}")]
    InvalidPoolAssets(String),

    /// Malformed StrKey.
    #[error("invalid strkey \"{input}\": {reason}")]
    InvalidStrKey {
        /// The rejected key string.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Malformed hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Memo content out of bounds.
    #[error("invalid memo: {0}")]
    InvalidMemo(String),
}

impl ValidationError {
    pub(crate) fn amount(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`ValidationError::InvalidAsset`].
    pub fn asset(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAsset {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn strkey(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidStrKey {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
