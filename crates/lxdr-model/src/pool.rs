//! # Liquidity Pools
//!
//! A constant-product pool is identified by the SHA-256 of its canonical
//! parameter encoding. Because the encoding is deterministic and the two
//! assets are held in canonical order, independent implementations derive
//! the same [`PoolId`] from the same pair and fee.
//!
//! ## Invariant
//!
//! `asset_a` sorts strictly before `asset_b` under [`Asset::compare`].
//! [`ConstantProductParameters::new`] refuses anything else;
//! [`ConstantProductParameters::from_assets`] swaps a reversed pair into
//! order. Decoding enforces the same invariant.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use lxdr_core::strkey::{self, StrKeyVersion};
use lxdr_core::{
    sha256_digest, CanonicalXdr, Hash, LxdrError, ValidationError, XdrDecode, XdrEncode, XdrError,
    XdrReader, XdrWriter,
};
use serde::{Deserialize, Serialize};

use crate::asset::Asset;

/// Protocol default pool fee, in basis points.
pub const LIQUIDITY_POOL_FEE_V18: i32 = 30;

lxdr_core::xdr_enum! {
    /// Pool kinds.
    pub enum LiquidityPoolType {
        ConstantProduct = 0 => "LIQUIDITY_POOL_CONSTANT_PRODUCT",
    }
}

// ---------------------------------------------------------------------------
// ConstantProductParameters
// ---------------------------------------------------------------------------

/// Parameters of a constant-product pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawConstantProductParameters")]
pub struct ConstantProductParameters {
    asset_a: Asset,
    asset_b: Asset,
    fee: i32,
}

#[derive(Deserialize)]
struct RawConstantProductParameters {
    asset_a: Asset,
    asset_b: Asset,
    fee: i32,
}

impl TryFrom<RawConstantProductParameters> for ConstantProductParameters {
    type Error = ValidationError;

    fn try_from(raw: RawConstantProductParameters) -> Result<Self, Self::Error> {
        Self::new(raw.asset_a, raw.asset_b, raw.fee)
    }
}

fn check_order(asset_a: &Asset, asset_b: &Asset) -> Result<(), ValidationError> {
    match asset_a.compare(asset_b) {
        Ordering::Less => Ok(()),
        Ordering::Equal => Err(ValidationError::InvalidPoolAssets(format!(
            "assets {asset_a} and {asset_b} are identical"
        ))),
        Ordering::Greater => Err(ValidationError::InvalidPoolAssets(format!(
            "asset {asset_a} must sort before {asset_b}"
        ))),
    }
}

impl ConstantProductParameters {
    /// Build from an already ordered pair.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidPoolAssets`] if the assets are equal or
    /// out of canonical order.
    pub fn new(asset_a: Asset, asset_b: Asset, fee: i32) -> Result<Self, ValidationError> {
        check_order(&asset_a, &asset_b)?;
        Ok(Self {
            asset_a,
            asset_b,
            fee,
        })
    }

    /// Build from a pair in either order, swapping into canonical order.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidPoolAssets`] if the assets are equal.
    pub fn from_assets(first: Asset, second: Asset, fee: i32) -> Result<Self, ValidationError> {
        match first.compare(&second) {
            Ordering::Greater => Self::new(second, first, fee),
            _ => Self::new(first, second, fee),
        }
    }

    pub fn asset_a(&self) -> &Asset {
        &self.asset_a
    }

    pub fn asset_b(&self) -> &Asset {
        &self.asset_b
    }

    pub fn fee(&self) -> i32 {
        self.fee
    }

    /// A copy with a different fee.
    pub fn with_fee(&self, fee: i32) -> Self {
        Self {
            fee,
            ..self.clone()
        }
    }
}

impl XdrEncode for ConstantProductParameters {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.asset_a.encode_xdr(w)?;
        self.asset_b.encode_xdr(w)?;
        w.write_i32(self.fee);
        Ok(())
    }
}

impl XdrDecode for ConstantProductParameters {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        let asset_a = Asset::decode_xdr(r)?;
        let asset_b = Asset::decode_xdr(r)?;
        let fee = r.read_i32()?;
        Self::new(asset_a, asset_b, fee).map_err(|e| XdrError::InvalidValue {
            type_name: "ConstantProductParameters",
            reason: e.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// LiquidityPoolParameters
// ---------------------------------------------------------------------------

/// Pool parameters, discriminated by pool type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquidityPoolParameters {
    ConstantProduct(ConstantProductParameters),
}

impl LiquidityPoolParameters {
    /// Constant-product parameters from a pair in either order.
    pub fn constant_product(
        first: Asset,
        second: Asset,
        fee: i32,
    ) -> Result<Self, ValidationError> {
        ConstantProductParameters::from_assets(first, second, fee).map(Self::ConstantProduct)
    }

    pub fn pool_type(&self) -> LiquidityPoolType {
        match self {
            Self::ConstantProduct(_) => LiquidityPoolType::ConstantProduct,
        }
    }

    /// Derive the pool ID: SHA-256 of the canonical encoding.
    pub fn pool_id(&self) -> Result<PoolId, XdrError> {
        let canonical = CanonicalXdr::new(self)?;
        let id = PoolId(sha256_digest(&canonical));
        tracing::debug!(pool_id = %id, "derived liquidity pool id");
        Ok(id)
    }
}

impl From<ConstantProductParameters> for LiquidityPoolParameters {
    fn from(params: ConstantProductParameters) -> Self {
        Self::ConstantProduct(params)
    }
}

impl XdrEncode for LiquidityPoolParameters {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.pool_type().encode_xdr(w)?;
        match self {
            Self::ConstantProduct(params) => params.encode_xdr(w),
        }
    }
}

impl XdrDecode for LiquidityPoolParameters {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match LiquidityPoolType::decode_xdr(r)? {
            LiquidityPoolType::ConstantProduct => {
                ConstantProductParameters::decode_xdr(r).map(Self::ConstantProduct)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// PoolId
// ---------------------------------------------------------------------------

/// A liquidity pool identifier.
///
/// Displays as lowercase hex; parses from hex or an `L…` StrKey.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PoolId(pub Hash);

impl PoolId {
    /// Derive the ID of the constant-product pool for `first` and `second`
    /// in either order.
    pub fn derive(first: &Asset, second: &Asset, fee: i32) -> Result<Self, LxdrError> {
        let params = LiquidityPoolParameters::constant_product(first.clone(), second.clone(), fee)?;
        Ok(params.pool_id()?)
    }

    pub fn as_hash(&self) -> &Hash {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// The `L…` StrKey.
    pub fn to_strkey(&self) -> String {
        strkey::encode(StrKeyVersion::LiquidityPool, self.0.as_bytes())
    }
}

impl fmt::Debug for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PoolId({})", self.to_hex())
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for PoolId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('L') {
            return strkey::decode_32(StrKeyVersion::LiquidityPool, s).map(|b| Self(Hash(b)));
        }
        Hash::from_hex(s).map(Self)
    }
}

impl From<PoolId> for String {
    fn from(id: PoolId) -> Self {
        id.to_hex()
    }
}

impl TryFrom<String> for PoolId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl XdrEncode for PoolId {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.0.encode_xdr(w)
    }
}

impl XdrDecode for PoolId {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Hash::decode_xdr(r).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUER: &str = "GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR";
    const NATIVE_ARST_POOL: &str =
        "7670ffdaaf9c61d8d59674f9d133d20d36afbf452788411c4db605bfd9eb8cf3";

    fn arst() -> Asset {
        Asset::parse(&format!("ARST:{ISSUER}")).unwrap()
    }

    #[test]
    fn identical_assets_rejected() {
        assert!(matches!(
            LiquidityPoolParameters::constant_product(arst(), arst(), 30),
            Err(ValidationError::InvalidPoolAssets(_))
        ));
    }

    #[test]
    fn strict_constructor_refuses_reversed_pair() {
        assert!(matches!(
            ConstantProductParameters::new(arst(), Asset::Native, 30),
            Err(ValidationError::InvalidPoolAssets(_))
        ));
    }

    #[test]
    fn reversed_pair_is_swapped() {
        let params = ConstantProductParameters::from_assets(arst(), Asset::Native, 30).unwrap();
        assert_eq!(params.asset_a(), &Asset::Native);
        assert_eq!(params.asset_b(), &arst());
    }

    #[test]
    fn pool_id_vector_is_order_independent() {
        let forward = PoolId::derive(&Asset::Native, &arst(), LIQUIDITY_POOL_FEE_V18).unwrap();
        let reverse = PoolId::derive(&arst(), &Asset::Native, LIQUIDITY_POOL_FEE_V18).unwrap();
        assert_eq!(forward, reverse);
        assert_eq!(forward.to_hex(), NATIVE_ARST_POOL);
    }

    #[test]
    fn fee_changes_pool_id() {
        let params = LiquidityPoolParameters::constant_product(Asset::Native, arst(), 30).unwrap();
        let LiquidityPoolParameters::ConstantProduct(inner) = &params;
        let other = LiquidityPoolParameters::from(inner.with_fee(31));
        assert_eq!(inner.fee(), 30);
        assert_ne!(params.pool_id().unwrap(), other.pool_id().unwrap());
    }

    #[test]
    fn decode_rejects_misordered_assets() {
        let mut w = XdrWriter::new();
        w.write_i32(0);
        arst().encode_xdr(&mut w).unwrap();
        Asset::Native.encode_xdr(&mut w).unwrap();
        w.write_i32(30);
        assert!(matches!(
            LiquidityPoolParameters::from_xdr(&w.into_bytes()),
            Err(XdrError::InvalidValue { .. })
        ));
    }

    #[test]
    fn pool_id_text_forms() {
        let id: PoolId = NATIVE_ARST_POOL.parse().unwrap();
        let strkey = id.to_strkey();
        assert_eq!(strkey, "LB3HB762V6OGDWGVSZ2PTUJT2IGTNL57IUTYQQI4JW3ALP6Z5OGPHRFL");
        assert_eq!(strkey.parse::<PoolId>(), Ok(id));
        assert!("xyz".parse::<PoolId>().is_err());
    }

    #[test]
    fn serde_validates_order() {
        let params = ConstantProductParameters::new(Asset::Native, arst(), 30).unwrap();
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(
            serde_json::from_str::<ConstantProductParameters>(&json).unwrap(),
            params
        );
        let reversed = format!(
            "{{\"asset_a\":\"ARST:{ISSUER}\",\"asset_b\":\"XLM\",\"fee\":30}}"
        );
        assert!(serde_json::from_str::<ConstantProductParameters>(&reversed).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn pool_id_ignores_argument_order(a in "[A-Z]{1,4}", b in "[A-Z]{5,12}", fee in 0i32..100) {
            let issuer = "GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR".parse().unwrap();
            let x = Asset::credit(&a, issuer).unwrap();
            let y = Asset::credit(&b, issuer).unwrap();
            prop_assert_eq!(
                PoolId::derive(&x, &y, fee).unwrap(),
                PoolId::derive(&y, &x, fee).unwrap()
            );
        }
    }
}
