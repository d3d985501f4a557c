//! # Assets
//!
//! [`Asset`] is the union over the native asset and the two credit widths.
//! [`ChangeTrustAsset`] extends it with the pool-share arm so trustlines can
//! name a liquidity pool.
//!
//! ## Canonical text
//!
//! `XLM` (case-insensitive on input) is the native asset. Credit assets are
//! `CODE:ISSUER`; a code of up to four characters selects the four-byte
//! form, up to twelve the twelve-byte form.
//!
//! ## Canonical ordering
//!
//! [`Asset::compare`] orders by discriminator ordinal, then by upper-cased
//! code, then by issuer StrKey. Codes compare case-insensitively while
//! equality is byte-exact, so `Asset` deliberately does not implement `Ord`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use lxdr_core::{ValidationError, XdrDecode, XdrEncode, XdrEnum, XdrError, XdrReader, XdrWriter};
use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::pool::LiquidityPoolParameters;

/// Reserved text form of the native asset.
pub const NATIVE_ASSET_CODE: &str = "XLM";

lxdr_core::xdr_enum! {
    /// Asset discriminators.
    pub enum AssetType {
        Native = 0 => "ASSET_TYPE_NATIVE",
        CreditAlphanum4 = 1 => "ASSET_TYPE_CREDIT_ALPHANUM4",
        CreditAlphanum12 = 2 => "ASSET_TYPE_CREDIT_ALPHANUM12",
        PoolShare = 3 => "ASSET_TYPE_POOL_SHARE",
    }
}

// ---------------------------------------------------------------------------
// Asset codes
// ---------------------------------------------------------------------------

fn validate_code(code: &[u8], width: usize) -> Result<(), String> {
    if code.is_empty() {
        return Err("asset code is empty".to_string());
    }
    if code.len() > width {
        return Err(format!("asset code longer than {width} characters"));
    }
    if !code.iter().all(u8::is_ascii_alphanumeric) {
        return Err("asset code must be ASCII letters and digits".to_string());
    }
    Ok(())
}

macro_rules! asset_code {
    ($(#[$meta:meta])* $name:ident, $width:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "String", try_from = "String")]
        pub struct $name([u8; $width]);

        impl $name {
            /// Fixed wire width in bytes.
            pub const WIDTH: usize = $width;

            /// Validate and zero-pad `code`.
            pub fn new(code: &str) -> Result<Self, ValidationError> {
                validate_code(code.as_bytes(), $width)
                    .map_err(|reason| ValidationError::asset(code, reason))?;
                let mut bytes = [0u8; $width];
                bytes[..code.len()].copy_from_slice(code.as_bytes());
                Ok(Self(bytes))
            }

            /// The code with trailing zero padding trimmed.
            pub fn as_str(&self) -> &str {
                let end = self.0.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
                std::str::from_utf8(&self.0[..end]).unwrap_or_default()
            }

            /// The padded wire bytes.
            pub fn as_bytes(&self) -> &[u8; $width] {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(code: $name) -> Self {
                code.as_str().to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(&value)
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
                let bytes = r.read_fixed_opaque::<$width>()?;
                let end = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
                validate_code(&bytes[..end], $width).map_err(|reason| XdrError::InvalidValue {
                    type_name: stringify!($name),
                    reason,
                })?;
                Ok(Self(bytes))
            }
        }
    };
}

asset_code! {
    /// A one to four character asset code, zero-padded to four bytes.
    AssetCode4, 4
}

asset_code! {
    /// A one to twelve character asset code, zero-padded to twelve bytes.
    AssetCode12, 12
}

/// An asset code of either width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCode {
    CreditAlphanum4(AssetCode4),
    CreditAlphanum12(AssetCode12),
}

impl AssetCode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::CreditAlphanum4(code) => code.as_str(),
            Self::CreditAlphanum12(code) => code.as_str(),
        }
    }
}

/// Parse loose code text, choosing the narrowest width that fits.
pub fn parse_asset_code(code: &str) -> Result<AssetCode, ValidationError> {
    if code.len() <= AssetCode4::WIDTH {
        AssetCode4::new(code).map(AssetCode::CreditAlphanum4)
    } else {
        AssetCode12::new(code).map(AssetCode::CreditAlphanum12)
    }
}

// ---------------------------------------------------------------------------
// Credit asset bodies
// ---------------------------------------------------------------------------

/// A four-byte credit asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlphaNum4 {
    pub asset_code: AssetCode4,
    pub issuer: AccountId,
}

/// A twelve-byte credit asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlphaNum12 {
    pub asset_code: AssetCode12,
    pub issuer: AccountId,
}

impl XdrEncode for AlphaNum4 {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.asset_code.encode_xdr(w)?;
        self.issuer.encode_xdr(w)
    }
}

impl XdrDecode for AlphaNum4 {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            asset_code: AssetCode4::decode_xdr(r)?,
            issuer: AccountId::decode_xdr(r)?,
        })
    }
}

impl XdrEncode for AlphaNum12 {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.asset_code.encode_xdr(w)?;
        self.issuer.encode_xdr(w)
    }
}

impl XdrDecode for AlphaNum12 {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            asset_code: AssetCode12::decode_xdr(r)?,
            issuer: AccountId::decode_xdr(r)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// A ledger asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Asset {
    Native,
    CreditAlphanum4(AlphaNum4),
    CreditAlphanum12(AlphaNum12),
}

impl Asset {
    pub fn native() -> Self {
        Self::Native
    }

    /// A credit asset whose width is chosen from the code length.
    pub fn credit(code: &str, issuer: AccountId) -> Result<Self, ValidationError> {
        Ok(match parse_asset_code(code)? {
            AssetCode::CreditAlphanum4(asset_code) => {
                Self::CreditAlphanum4(AlphaNum4 { asset_code, issuer })
            }
            AssetCode::CreditAlphanum12(asset_code) => {
                Self::CreditAlphanum12(AlphaNum12 { asset_code, issuer })
            }
        })
    }

    /// A credit asset that must use the four-byte form.
    pub fn alphanum4(code: &str, issuer: AccountId) -> Result<Self, ValidationError> {
        Ok(Self::CreditAlphanum4(AlphaNum4 {
            asset_code: AssetCode4::new(code)?,
            issuer,
        }))
    }

    /// A credit asset that must use the twelve-byte form.
    pub fn alphanum12(code: &str, issuer: AccountId) -> Result<Self, ValidationError> {
        Ok(Self::CreditAlphanum12(AlphaNum12 {
            asset_code: AssetCode12::new(code)?,
            issuer,
        }))
    }

    /// Parse `XLM` or `CODE:ISSUER`.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let segments: Vec<&str> = text.split(':').collect();
        match segments.as_slice() {
            [single] if single.eq_ignore_ascii_case(NATIVE_ASSET_CODE) => Ok(Self::Native),
            [code, issuer] => {
                let issuer: AccountId = issuer
                    .parse()
                    .map_err(|e| ValidationError::asset(text, format!("bad issuer: {e}")))?;
                if code.len() > AssetCode12::WIDTH {
                    return Err(ValidationError::asset(
                        text,
                        format!("asset code longer than {} characters", AssetCode12::WIDTH),
                    ));
                }
                Self::credit(code, issuer)
            }
            _ => Err(ValidationError::asset(
                text,
                format!("expected {NATIVE_ASSET_CODE} or CODE:ISSUER"),
            )),
        }
    }

    pub fn asset_type(&self) -> AssetType {
        match self {
            Self::Native => AssetType::Native,
            Self::CreditAlphanum4(_) => AssetType::CreditAlphanum4,
            Self::CreditAlphanum12(_) => AssetType::CreditAlphanum12,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// The asset code, or `None` for the native asset.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Native => None,
            Self::CreditAlphanum4(a) => Some(a.asset_code.as_str()),
            Self::CreditAlphanum12(a) => Some(a.asset_code.as_str()),
        }
    }

    /// The issuing account, or `None` for the native asset.
    pub fn issuer(&self) -> Option<&AccountId> {
        match self {
            Self::Native => None,
            Self::CreditAlphanum4(a) => Some(&a.issuer),
            Self::CreditAlphanum12(a) => Some(&a.issuer),
        }
    }

    /// Canonical asset ordering.
    ///
    /// Discriminator ordinal first; then upper-cased code; then issuer
    /// StrKey. The native asset therefore sorts before every credit asset.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.asset_type()
            .ordinal()
            .cmp(&other.asset_type().ordinal())
            .then_with(|| {
                let a = self.code().unwrap_or_default().to_ascii_uppercase();
                let b = other.code().unwrap_or_default().to_ascii_uppercase();
                a.cmp(&b)
            })
            .then_with(|| {
                let a = self.issuer().map(AccountId::to_strkey).unwrap_or_default();
                let b = other.issuer().map(AccountId::to_strkey).unwrap_or_default();
                a.cmp(&b)
            })
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code(), self.issuer()) {
            (Some(code), Some(issuer)) => write!(f, "{code}:{issuer}"),
            _ => f.write_str(NATIVE_ASSET_CODE),
        }
    }
}

impl FromStr for Asset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Asset> for String {
    fn from(asset: Asset) -> Self {
        asset.to_string()
    }
}

impl TryFrom<String> for Asset {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl XdrEncode for Asset {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.asset_type().encode_xdr(w)?;
        match self {
            Self::Native => Ok(()),
            Self::CreditAlphanum4(a) => a.encode_xdr(w),
            Self::CreditAlphanum12(a) => a.encode_xdr(w),
        }
    }
}

impl XdrDecode for Asset {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match AssetType::decode_xdr(r)? {
            AssetType::Native => Ok(Self::Native),
            AssetType::CreditAlphanum4 => AlphaNum4::decode_xdr(r).map(Self::CreditAlphanum4),
            AssetType::CreditAlphanum12 => AlphaNum12::decode_xdr(r).map(Self::CreditAlphanum12),
            AssetType::PoolShare => Err(XdrError::UnsupportedArm {
                type_name: "Asset",
                discriminant: AssetType::PoolShare.ordinal(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// ChangeTrustAsset
// ---------------------------------------------------------------------------

/// The asset named by a trustline change: any [`Asset`] or a pool share.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTrustAsset {
    Native,
    CreditAlphanum4(AlphaNum4),
    CreditAlphanum12(AlphaNum12),
    PoolShare(LiquidityPoolParameters),
}

impl ChangeTrustAsset {
    pub fn asset_type(&self) -> AssetType {
        match self {
            Self::Native => AssetType::Native,
            Self::CreditAlphanum4(_) => AssetType::CreditAlphanum4,
            Self::CreditAlphanum12(_) => AssetType::CreditAlphanum12,
            Self::PoolShare(_) => AssetType::PoolShare,
        }
    }

    /// The plain asset, if this is not a pool share.
    pub fn as_asset(&self) -> Option<Asset> {
        match self {
            Self::Native => Some(Asset::Native),
            Self::CreditAlphanum4(a) => Some(Asset::CreditAlphanum4(a.clone())),
            Self::CreditAlphanum12(a) => Some(Asset::CreditAlphanum12(a.clone())),
            Self::PoolShare(_) => None,
        }
    }

    /// Canonical ordering extended to pool shares, which sort last and
    /// tie-break on pool ID.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::PoolShare(a), Self::PoolShare(b)) => match (a.pool_id(), b.pool_id()) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => Ordering::Equal,
            },
            _ => match (self.as_asset(), other.as_asset()) {
                (Some(a), Some(b)) => a.compare(&b),
                _ => self
                    .asset_type()
                    .ordinal()
                    .cmp(&other.asset_type().ordinal()),
            },
        }
    }
}

impl From<Asset> for ChangeTrustAsset {
    fn from(asset: Asset) -> Self {
        match asset {
            Asset::Native => Self::Native,
            Asset::CreditAlphanum4(a) => Self::CreditAlphanum4(a),
            Asset::CreditAlphanum12(a) => Self::CreditAlphanum12(a),
        }
    }
}

impl From<LiquidityPoolParameters> for ChangeTrustAsset {
    fn from(params: LiquidityPoolParameters) -> Self {
        Self::PoolShare(params)
    }
}

impl XdrEncode for ChangeTrustAsset {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.asset_type().encode_xdr(w)?;
        match self {
            Self::Native => Ok(()),
            Self::CreditAlphanum4(a) => a.encode_xdr(w),
            Self::CreditAlphanum12(a) => a.encode_xdr(w),
            Self::PoolShare(params) => params.encode_xdr(w),
        }
    }
}

impl XdrDecode for ChangeTrustAsset {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match AssetType::decode_xdr(r)? {
            AssetType::Native => Ok(Self::Native),
            AssetType::CreditAlphanum4 => AlphaNum4::decode_xdr(r).map(Self::CreditAlphanum4),
            AssetType::CreditAlphanum12 => AlphaNum12::decode_xdr(r).map(Self::CreditAlphanum12),
            AssetType::PoolShare => LiquidityPoolParameters::decode_xdr(r).map(Self::PoolShare),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUER: &str = "GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR";
    const OTHER_ISSUER: &str = "GCATS5YOVB6ROX2WUNKGNQ2MP3GMXDMKSG2O4N5CLX3A6W4PZGZZI55U";

    fn issuer() -> AccountId {
        ISSUER.parse().unwrap()
    }

    #[test]
    fn native_literal_is_case_insensitive() {
        assert_eq!(Asset::parse("XLM"), Ok(Asset::Native));
        assert_eq!(Asset::parse("xlm"), Ok(Asset::Native));
        assert_eq!(Asset::Native.to_string(), "XLM");
    }

    #[test]
    fn code_length_selects_width() {
        let four = Asset::parse(&format!("TEST:{ISSUER}")).unwrap();
        assert_eq!(four.asset_type(), AssetType::CreditAlphanum4);
        let twelve = Asset::parse(&format!("ABCDEFGHIJKL:{ISSUER}")).unwrap();
        assert_eq!(twelve.asset_type(), AssetType::CreditAlphanum12);
        assert_eq!(twelve.code(), Some("ABCDEFGHIJKL"));
        assert_eq!(twelve.to_string(), format!("ABCDEFGHIJKL:{ISSUER}"));
    }

    #[test]
    fn malformed_strings_rejected() {
        for bad in [
            "foo".to_string(),
            format!("ABCDEFGHIJKLM:{ISSUER}"),
            format!(":{ISSUER}"),
            "USD:GNOTAKEY".to_string(),
            format!("US-D:{ISSUER}"),
            format!("USD:{ISSUER}:extra"),
        ] {
            assert!(
                matches!(Asset::parse(&bad), Err(ValidationError::InvalidAsset { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn code_is_padded_on_wire_and_trimmed_on_read() {
        let asset = Asset::alphanum4("AB", issuer()).unwrap();
        let bytes = asset.to_xdr().unwrap();
        assert_eq!(&bytes[..8], &[0, 0, 0, 1, b'A', b'B', 0, 0]);
        let back = Asset::from_xdr(&bytes).unwrap();
        assert_eq!(back.code(), Some("AB"));
        assert_eq!(back, asset);
    }

    #[test]
    fn known_xdr_vector() {
        let asset = Asset::parse(&format!("ARST:{ISSUER}")).unwrap();
        assert_eq!(
            asset.to_xdr_base64().unwrap(),
            "AAAAAUFSU1QAAAAAiojj3XQJ8ZX9UtstPLpdcspnCb8dlBIb83SIAbQPb1w="
        );
    }

    #[test]
    fn decode_rejects_bad_code_bytes() {
        let mut bytes = vec![0, 0, 0, 1, 0, 0, 0, 0];
        bytes.extend(issuer().to_xdr().unwrap());
        assert!(matches!(
            Asset::from_xdr(&bytes),
            Err(XdrError::InvalidValue { type_name: "AssetCode4", .. })
        ));
    }

    #[test]
    fn pool_share_not_a_plain_asset() {
        assert_eq!(
            Asset::from_xdr(&[0, 0, 0, 3]),
            Err(XdrError::UnsupportedArm {
                type_name: "Asset",
                discriminant: 3
            })
        );
    }

    #[test]
    fn native_sorts_first() {
        let arst = Asset::parse(&format!("ARST:{ISSUER}")).unwrap();
        assert_eq!(Asset::Native.compare(&arst), Ordering::Less);
        assert_eq!(arst.compare(&Asset::Native), Ordering::Greater);
        assert_eq!(Asset::Native.compare(&Asset::Native), Ordering::Equal);
    }

    #[test]
    fn width_beats_code() {
        let short = Asset::alphanum4("ZZZ", issuer()).unwrap();
        let long = Asset::alphanum12("AAAAA", issuer()).unwrap();
        assert_eq!(short.compare(&long), Ordering::Less);
    }

    #[test]
    fn codes_compare_case_insensitively() {
        let lower = Asset::alphanum4("abc", issuer()).unwrap();
        let upper = Asset::alphanum4("ABC", issuer()).unwrap();
        assert_eq!(lower.compare(&upper), Ordering::Equal);
        assert_ne!(lower, upper);
        let b = Asset::alphanum4("abd", issuer()).unwrap();
        assert_eq!(upper.compare(&b), Ordering::Less);
    }

    #[test]
    fn issuer_breaks_ties() {
        let a = Asset::alphanum4("USD", OTHER_ISSUER.parse().unwrap()).unwrap();
        let b = Asset::alphanum4("USD", issuer()).unwrap();
        // "GCAT..." < "GCFI..."
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn parse_asset_code_widths() {
        assert!(matches!(parse_asset_code("USD"), Ok(AssetCode::CreditAlphanum4(_))));
        assert!(matches!(parse_asset_code("USDCOIN"), Ok(AssetCode::CreditAlphanum12(_))));
        assert!(parse_asset_code("").is_err());
        assert!(parse_asset_code("THIRTEENCHARS").is_err());
    }

    #[test]
    fn serde_uses_canonical_text() {
        let asset = Asset::parse(&format!("ARST:{ISSUER}")).unwrap();
        let json = serde_json::to_string(&asset).unwrap();
        assert_eq!(json, format!("\"ARST:{ISSUER}\""));
        assert_eq!(serde_json::from_str::<Asset>(&json).unwrap(), asset);
        assert!(serde_json::from_str::<Asset>("\"nope\"").is_err());
    }

    #[test]
    fn change_trust_asset_orders_pool_shares_last() {
        let arst = Asset::parse(&format!("ARST:{ISSUER}")).unwrap();
        let params =
            LiquidityPoolParameters::constant_product(Asset::Native, arst.clone(), 30).unwrap();
        let share = ChangeTrustAsset::from(params);
        let credit = ChangeTrustAsset::from(arst);
        assert_eq!(credit.compare(&share), Ordering::Less);
        assert_eq!(share.compare(&share.clone()), Ordering::Equal);
        assert_eq!(ChangeTrustAsset::from_xdr(&share.to_xdr().unwrap()), Ok(share));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_asset() -> impl Strategy<Value = Asset> {
        let issuer = prop_oneof![
            Just("GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR"),
            Just("GCATS5YOVB6ROX2WUNKGNQ2MP3GMXDMKSG2O4N5CLX3A6W4PZGZZI55U"),
        ];
        prop_oneof![
            Just(Asset::Native),
            ("[A-Za-z0-9]{1,4}", issuer.clone())
                .prop_map(|(c, i)| Asset::alphanum4(&c, i.parse().unwrap()).unwrap()),
            ("[A-Za-z0-9]{1,12}", issuer)
                .prop_map(|(c, i)| Asset::alphanum12(&c, i.parse().unwrap()).unwrap()),
        ]
    }

    proptest! {
        #[test]
        fn compare_is_antisymmetric(a in arb_asset(), b in arb_asset()) {
            prop_assert_eq!(a.compare(&b), b.compare(&a).reverse());
            prop_assert_eq!(a.compare(&a), Ordering::Equal);
        }

        #[test]
        fn compare_is_transitive(a in arb_asset(), b in arb_asset(), c in arb_asset()) {
            if a.compare(&b) != Ordering::Greater && b.compare(&c) != Ordering::Greater {
                prop_assert_ne!(a.compare(&c), Ordering::Greater);
            }
        }

        #[test]
        fn xdr_round_trip(a in arb_asset()) {
            prop_assert_eq!(Asset::from_xdr(&a.to_xdr().unwrap()), Ok(a));
        }
    }
}
