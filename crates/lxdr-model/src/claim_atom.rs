//! # Claim Atoms
//!
//! A claim atom records one leg of a trade settlement: what was taken from
//! an offer or a pool and what was paid for it.
//!
//! The builders mirror the wire structs with every field optional. A
//! builder encodes only once every field is set; otherwise encoding fails
//! with [`XdrError::MissingField`] before a single byte is written.

use lxdr_core::{Amount, Uint256, XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};
use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::asset::Asset;
use crate::pool::PoolId;

lxdr_core::xdr_enum! {
    /// Claim atom versions.
    pub enum ClaimAtomType {
        V0 = 0 => "CLAIM_ATOM_TYPE_V0",
        OrderBook = 1 => "CLAIM_ATOM_TYPE_ORDER_BOOK",
        LiquidityPool = 2 => "CLAIM_ATOM_TYPE_LIQUIDITY_POOL",
    }
}

fn missing(type_name: &'static str, field: &'static str) -> XdrError {
    XdrError::MissingField { type_name, field }
}

// ---------------------------------------------------------------------------
// Atoms
// ---------------------------------------------------------------------------

/// Pre-protocol-18 offer claim, with the seller as a raw key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimOfferAtomV0 {
    pub seller_ed25519: Uint256,
    pub offer_id: i64,
    pub asset_sold: Asset,
    pub amount_sold: Amount,
    pub asset_bought: Asset,
    pub amount_bought: Amount,
}

/// An offer claimed from the order book.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimOfferAtom {
    pub seller_id: AccountId,
    pub offer_id: i64,
    pub asset_sold: Asset,
    pub amount_sold: Amount,
    pub asset_bought: Asset,
    pub amount_bought: Amount,
}

/// A trade against a liquidity pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimLiquidityAtom {
    pub liquidity_pool_id: PoolId,
    pub asset_sold: Asset,
    pub amount_sold: Amount,
    pub asset_bought: Asset,
    pub amount_bought: Amount,
}

/// A versioned claim atom.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimAtom {
    V0(ClaimOfferAtomV0),
    OrderBook(ClaimOfferAtom),
    LiquidityPool(ClaimLiquidityAtom),
}

impl ClaimAtom {
    pub fn atom_type(&self) -> ClaimAtomType {
        match self {
            Self::V0(_) => ClaimAtomType::V0,
            Self::OrderBook(_) => ClaimAtomType::OrderBook,
            Self::LiquidityPool(_) => ClaimAtomType::LiquidityPool,
        }
    }
}

impl XdrEncode for ClaimOfferAtomV0 {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.seller_ed25519.encode_xdr(w)?;
        w.write_i64(self.offer_id);
        self.asset_sold.encode_xdr(w)?;
        self.amount_sold.encode_xdr(w)?;
        self.asset_bought.encode_xdr(w)?;
        self.amount_bought.encode_xdr(w)
    }
}

impl XdrDecode for ClaimOfferAtomV0 {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            seller_ed25519: Uint256::decode_xdr(r)?,
            offer_id: r.read_i64()?,
            asset_sold: Asset::decode_xdr(r)?,
            amount_sold: Amount::decode_xdr(r)?,
            asset_bought: Asset::decode_xdr(r)?,
            amount_bought: Amount::decode_xdr(r)?,
        })
    }
}

impl XdrEncode for ClaimOfferAtom {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.seller_id.encode_xdr(w)?;
        w.write_i64(self.offer_id);
        self.asset_sold.encode_xdr(w)?;
        self.amount_sold.encode_xdr(w)?;
        self.asset_bought.encode_xdr(w)?;
        self.amount_bought.encode_xdr(w)
    }
}

impl XdrDecode for ClaimOfferAtom {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            seller_id: AccountId::decode_xdr(r)?,
            offer_id: r.read_i64()?,
            asset_sold: Asset::decode_xdr(r)?,
            amount_sold: Amount::decode_xdr(r)?,
            asset_bought: Asset::decode_xdr(r)?,
            amount_bought: Amount::decode_xdr(r)?,
        })
    }
}

impl XdrEncode for ClaimLiquidityAtom {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.liquidity_pool_id.encode_xdr(w)?;
        self.asset_sold.encode_xdr(w)?;
        self.amount_sold.encode_xdr(w)?;
        self.asset_bought.encode_xdr(w)?;
        self.amount_bought.encode_xdr(w)
    }
}

impl XdrDecode for ClaimLiquidityAtom {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            liquidity_pool_id: PoolId::decode_xdr(r)?,
            asset_sold: Asset::decode_xdr(r)?,
            amount_sold: Amount::decode_xdr(r)?,
            asset_bought: Asset::decode_xdr(r)?,
            amount_bought: Amount::decode_xdr(r)?,
        })
    }
}

impl XdrEncode for ClaimAtom {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.atom_type().encode_xdr(w)?;
        match self {
            Self::V0(atom) => atom.encode_xdr(w),
            Self::OrderBook(atom) => atom.encode_xdr(w),
            Self::LiquidityPool(atom) => atom.encode_xdr(w),
        }
    }
}

impl XdrDecode for ClaimAtom {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match ClaimAtomType::decode_xdr(r)? {
            ClaimAtomType::V0 => ClaimOfferAtomV0::decode_xdr(r).map(Self::V0),
            ClaimAtomType::OrderBook => ClaimOfferAtom::decode_xdr(r).map(Self::OrderBook),
            ClaimAtomType::LiquidityPool => {
                ClaimLiquidityAtom::decode_xdr(r).map(Self::LiquidityPool)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Incremental construction of a [`ClaimOfferAtom`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimOfferAtomBuilder {
    seller_id: Option<AccountId>,
    offer_id: Option<i64>,
    asset_sold: Option<Asset>,
    amount_sold: Option<Amount>,
    asset_bought: Option<Asset>,
    amount_bought: Option<Amount>,
}

impl ClaimOfferAtomBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seller_id(mut self, seller_id: AccountId) -> Self {
        self.seller_id = Some(seller_id);
        self
    }

    pub fn offer_id(mut self, offer_id: i64) -> Self {
        self.offer_id = Some(offer_id);
        self
    }

    pub fn asset_sold(mut self, asset: Asset) -> Self {
        self.asset_sold = Some(asset);
        self
    }

    pub fn amount_sold(mut self, amount: Amount) -> Self {
        self.amount_sold = Some(amount);
        self
    }

    pub fn asset_bought(mut self, asset: Asset) -> Self {
        self.asset_bought = Some(asset);
        self
    }

    pub fn amount_bought(mut self, amount: Amount) -> Self {
        self.amount_bought = Some(amount);
        self
    }

    /// The finished atom.
    ///
    /// # Errors
    ///
    /// [`XdrError::MissingField`] naming the first unset field in wire order.
    pub fn build(&self) -> Result<ClaimOfferAtom, XdrError> {
        const NAME: &str = "ClaimOfferAtom";
        Ok(ClaimOfferAtom {
            seller_id: self.seller_id.ok_or_else(|| missing(NAME, "seller_id"))?,
            offer_id: self.offer_id.ok_or_else(|| missing(NAME, "offer_id"))?,
            asset_sold: self.asset_sold.clone().ok_or_else(|| missing(NAME, "asset_sold"))?,
            amount_sold: self.amount_sold.ok_or_else(|| missing(NAME, "amount_sold"))?,
            asset_bought: self
                .asset_bought
                .clone()
                .ok_or_else(|| missing(NAME, "asset_bought"))?,
            amount_bought: self.amount_bought.ok_or_else(|| missing(NAME, "amount_bought"))?,
        })
    }
}

impl XdrEncode for ClaimOfferAtomBuilder {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.build()?.encode_xdr(w)
    }
}

/// Incremental construction of a [`ClaimLiquidityAtom`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimLiquidityAtomBuilder {
    liquidity_pool_id: Option<PoolId>,
    asset_sold: Option<Asset>,
    amount_sold: Option<Amount>,
    asset_bought: Option<Asset>,
    amount_bought: Option<Amount>,
}

impl ClaimLiquidityAtomBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn liquidity_pool_id(mut self, id: PoolId) -> Self {
        self.liquidity_pool_id = Some(id);
        self
    }

    pub fn asset_sold(mut self, asset: Asset) -> Self {
        self.asset_sold = Some(asset);
        self
    }

    pub fn amount_sold(mut self, amount: Amount) -> Self {
        self.amount_sold = Some(amount);
        self
    }

    pub fn asset_bought(mut self, asset: Asset) -> Self {
        self.asset_bought = Some(asset);
        self
    }

    pub fn amount_bought(mut self, amount: Amount) -> Self {
        self.amount_bought = Some(amount);
        self
    }

    pub fn build(&self) -> Result<ClaimLiquidityAtom, XdrError> {
        const NAME: &str = "ClaimLiquidityAtom";
        Ok(ClaimLiquidityAtom {
            liquidity_pool_id: self
                .liquidity_pool_id
                .ok_or_else(|| missing(NAME, "liquidity_pool_id"))?,
            asset_sold: self.asset_sold.clone().ok_or_else(|| missing(NAME, "asset_sold"))?,
            amount_sold: self.amount_sold.ok_or_else(|| missing(NAME, "amount_sold"))?,
            asset_bought: self
                .asset_bought
                .clone()
                .ok_or_else(|| missing(NAME, "asset_bought"))?,
            amount_bought: self.amount_bought.ok_or_else(|| missing(NAME, "amount_bought"))?,
        })
    }
}

impl XdrEncode for ClaimLiquidityAtomBuilder {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.build()?.encode_xdr(w)
    }
}
