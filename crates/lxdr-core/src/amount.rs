//! # Scaled Amount Arithmetic
//!
//! Ledger amounts are signed 64-bit integers counting stroops: one unit of
//! an asset is 10^7 stroops. Human-readable amounts are decimal strings with
//! at most seven fractional digits.
//!
//! ## Invariants
//!
//! - [`scale`] is lossless; for every `n: i64`, `descale(&scale(n, false)) == Ok(n)`.
//! - [`descale`] is the only place where precision and overflow errors occur.
//!   It never rounds: an eighth fractional digit is an error, not a truncation.
//! - Thousands separators are accepted on input and produced only on request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::{XdrDecode, XdrEncode, XdrReader, XdrWriter};
use crate::error::{ValidationError, XdrError};

/// Number of fractional decimal digits in a ledger amount.
pub const DECIMAL_PLACES: usize = 7;

/// Stroops per whole unit (10^7).
pub const STROOPS_PER_UNIT: i64 = 10_000_000;

/// Convert a decimal amount string into its stroop count.
///
/// Commas are stripped first, so `"1,000.5"` and `"1000.5"` are equivalent.
/// A leading `-` is accepted; rejecting negative amounts is the job of
/// [`is_valid_amount`].
///
/// # Errors
///
/// [`ValidationError::InvalidAmount`] if the string is empty or contains
/// anything but digits and one decimal point, if the fractional part has
/// more than seven digits, or if the magnitude exceeds `i64::MAX` stroops.
pub fn descale(amount: &str) -> Result<i64, ValidationError> {
    let cleaned: String = amount.trim().chars().filter(|c| *c != ',').collect();
    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };

    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(ValidationError::amount(amount, "no digits"));
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit()) || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ValidationError::amount(amount, "not a decimal number"));
    }
    if frac_part.len() > DECIMAL_PLACES {
        return Err(ValidationError::amount(
            amount,
            format!("more than {DECIMAL_PLACES} decimal places"),
        ));
    }

    let combined = format!("{int_part}{frac_part:0<width$}", width = DECIMAL_PLACES);
    let significant = combined.trim_start_matches('0');
    let magnitude = if significant.is_empty() {
        0
    } else {
        significant
            .parse::<i64>()
            .map_err(|_| ValidationError::amount(amount, "exceeds maximum int64 value"))?
    };

    Ok(if negative { -magnitude } else { magnitude })
}

/// Render a stroop count as a decimal string with exactly seven fractional
/// digits, optionally grouping the integer part in threes with commas.
pub fn scale(value: i64, with_commas: bool) -> String {
    let digits = format!("{:0>width$}", value.unsigned_abs(), width = DECIMAL_PLACES + 1);
    let (int_part, frac_part) = digits.split_at(digits.len() - DECIMAL_PLACES);
    let int_part = if with_commas {
        group_thousands(int_part)
    } else {
        int_part.to_string()
    };
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}{int_part}.{frac_part}")
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// True iff `amount` descales cleanly, is non-negative, and is non-zero
/// unless `allow_zero` is set.
pub fn is_valid_amount(amount: &str, allow_zero: bool) -> bool {
    match descale(amount) {
        Ok(v) if v > 0 => true,
        Ok(0) => allow_zero,
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

/// A ledger amount in stroops (XDR `int64`).
///
/// Serializes as its seven-decimal string form so that JSON never carries
/// a float.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Amount(i64);

impl Amount {
    /// Zero stroops.
    pub const ZERO: Amount = Amount(0);

    /// The largest representable amount.
    pub const MAX: Amount = Amount(i64::MAX);

    /// Wrap a raw stroop count.
    pub const fn from_stroops(stroops: i64) -> Self {
        Self(stroops)
    }

    /// Parse a decimal amount string (see [`descale`]).
    pub fn parse(amount: &str) -> Result<Self, ValidationError> {
        descale(amount).map(Self)
    }

    /// The raw stroop count.
    pub const fn stroops(self) -> i64 {
        self.0
    }

    /// Decimal form, optionally with thousands separators.
    pub fn to_decimal_string(self, with_commas: bool) -> String {
        scale(self.0, with_commas)
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&scale(self.0, false))
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_string()
    }
}

impl TryFrom<String> for Amount {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl XdrEncode for Amount {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_i64(self.0);
        Ok(())
    }
}

impl XdrDecode for Amount {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_i64().map(Self)
    }
}

/// Loosely-typed amount input accepted at API boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountInput {
    /// A raw stroop count.
    Stroops(i64),
    /// A decimal string in whole units.
    Decimal(String),
}

impl From<Amount> for AmountInput {
    fn from(amount: Amount) -> Self {
        Self::Stroops(amount.stroops())
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        Self::Decimal(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        Self::Decimal(value)
    }
}

/// Convert loose amount input into a typed [`Amount`].
pub fn normalize_amount(input: impl Into<AmountInput>) -> Result<Amount, ValidationError> {
    match input.into() {
        AmountInput::Stroops(stroops) => Ok(Amount::from_stroops(stroops)),
        AmountInput::Decimal(text) => Amount::parse(&text),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Scaling is lossless for every int64.
        #[test]
        fn descale_inverts_scale(n in any::<i64>().prop_filter("MIN has no positive twin", |n| *n != i64::MIN)) {
            prop_assert_eq!(descale(&scale(n, false)), Ok(n));
            prop_assert_eq!(descale(&scale(n, true)), Ok(n));
        }

        /// Decimal strings with at most seven places round-trip to canonical form.
        #[test]
        fn scale_canonicalizes_decimal(int_part in 0u64..922_337_203_685, frac in "[0-9]{0,7}") {
            let input = if frac.is_empty() { int_part.to_string() } else { format!("{int_part}.{frac}") };
            let canonical = format!("{int_part}.{frac:0<7}");
            prop_assert_eq!(scale(descale(&input).unwrap(), false), canonical);
        }
    }
}
