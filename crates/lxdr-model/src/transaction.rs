//! # Transactions
//!
//! Three transaction shapes exist on the wire:
//!
//! - [`Transaction`]: the current (V1) form with a muxed source account and
//!   general preconditions.
//! - [`TransactionV0`]: the legacy form with a raw ed25519 source and
//!   optional time bounds. [`TransactionV0::to_v1`] converts losslessly.
//! - [`FeeBumpTransaction`]: wraps a signed V1 envelope and pays a higher
//!   fee from another account.
//!
//! [`TransactionBuilder`] assembles a V1 transaction, charging
//! `base_fee × operation count`.

use lxdr_core::{
    BoundedVec, ExtensionPoint, Uint256, XdrDecode, XdrEncode, XdrEnum, XdrError, XdrReader,
    XdrWriter,
};
use serde::{Deserialize, Serialize};

use crate::account::MuxedAccount;
use crate::envelope::{EnvelopeType, TransactionV1Envelope};
use crate::memo::Memo;
use crate::operation::Operation;

/// Maximum operations in one transaction.
pub const MAX_OPS_PER_TX: usize = 100;

/// Default per-operation fee in stroops.
pub const BASE_FEE: u32 = 100;

/// Operations of one transaction.
pub type Operations = BoundedVec<Operation, MAX_OPS_PER_TX>;

// ---------------------------------------------------------------------------
// Preconditions
// ---------------------------------------------------------------------------

/// Validity window in epoch seconds; `max_time == 0` means no upper bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

impl XdrEncode for TimeBounds {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_u64(self.min_time);
        w.write_u64(self.max_time);
        Ok(())
    }
}

impl XdrDecode for TimeBounds {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            min_time: r.read_u64()?,
            max_time: r.read_u64()?,
        })
    }
}

lxdr_core::xdr_enum! {
    /// Precondition discriminators.
    pub enum PreconditionType {
        None = 0 => "PRECOND_NONE",
        Time = 1 => "PRECOND_TIME",
        V2 = 2 => "PRECOND_V2",
    }
}

/// Conditions a transaction must meet to be valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preconditions {
    #[default]
    None,
    Time(TimeBounds),
}

impl Preconditions {
    pub fn precondition_type(&self) -> PreconditionType {
        match self {
            Self::None => PreconditionType::None,
            Self::Time(_) => PreconditionType::Time,
        }
    }

    pub fn time_bounds(&self) -> Option<&TimeBounds> {
        match self {
            Self::None => None,
            Self::Time(bounds) => Some(bounds),
        }
    }
}

impl From<Option<TimeBounds>> for Preconditions {
    fn from(bounds: Option<TimeBounds>) -> Self {
        bounds.map_or(Self::None, Self::Time)
    }
}

impl XdrEncode for Preconditions {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.precondition_type().encode_xdr(w)?;
        match self {
            Self::None => Ok(()),
            Self::Time(bounds) => bounds.encode_xdr(w),
        }
    }
}

impl XdrDecode for Preconditions {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match PreconditionType::decode_xdr(r)? {
            PreconditionType::None => Ok(Self::None),
            PreconditionType::Time => TimeBounds::decode_xdr(r).map(Self::Time),
            PreconditionType::V2 => Err(XdrError::UnsupportedArm {
                type_name: "Preconditions",
                discriminant: PreconditionType::V2.ordinal(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Transaction (V1)
// ---------------------------------------------------------------------------

/// A transaction in its current wire form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    pub source_account: MuxedAccount,
    /// Total fee in stroops.
    pub fee: u32,
    pub seq_num: i64,
    pub cond: Preconditions,
    pub memo: Memo,
    pub operations: Operations,
    pub ext: ExtensionPoint,
}

impl Transaction {
    /// A copy with `op` appended.
    pub fn with_operation(&self, op: Operation) -> Self {
        Self {
            operations: self.operations.pushed(op),
            ..self.clone()
        }
    }

    /// A copy with a different memo.
    pub fn with_memo(&self, memo: Memo) -> Self {
        Self {
            memo,
            ..self.clone()
        }
    }
}

impl XdrEncode for Transaction {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.source_account.encode_xdr(w)?;
        w.write_u32(self.fee);
        w.write_i64(self.seq_num);
        self.cond.encode_xdr(w)?;
        self.memo.encode_xdr(w)?;
        self.operations.encode_xdr(w)?;
        self.ext.encode_xdr(w)
    }
}

impl XdrDecode for Transaction {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            source_account: MuxedAccount::decode_xdr(r)?,
            fee: r.read_u32()?,
            seq_num: r.read_i64()?,
            cond: Preconditions::decode_xdr(r)?,
            memo: Memo::decode_xdr(r)?,
            operations: Operations::decode_xdr(r)?,
            ext: ExtensionPoint::decode_xdr(r)?,
        })
    }
}

// ---------------------------------------------------------------------------
// TransactionV0
// ---------------------------------------------------------------------------

/// The legacy transaction form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionV0 {
    pub source_account_ed25519: Uint256,
    pub fee: u32,
    pub seq_num: i64,
    pub time_bounds: Option<TimeBounds>,
    pub memo: Memo,
    pub operations: Operations,
    pub ext: ExtensionPoint,
}

impl TransactionV0 {
    /// The equivalent V1 transaction.
    ///
    /// The V1 encoding of the result, minus its leading key-type word, is
    /// byte-identical to this transaction's encoding, so both hash alike.
    pub fn to_v1(&self) -> Transaction {
        Transaction {
            source_account: MuxedAccount::Ed25519(self.source_account_ed25519),
            fee: self.fee,
            seq_num: self.seq_num,
            cond: Preconditions::from(self.time_bounds),
            memo: self.memo.clone(),
            operations: self.operations.clone(),
            ext: self.ext,
        }
    }
}

impl XdrEncode for TransactionV0 {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.source_account_ed25519.encode_xdr(w)?;
        w.write_u32(self.fee);
        w.write_i64(self.seq_num);
        self.time_bounds.encode_xdr(w)?;
        self.memo.encode_xdr(w)?;
        self.operations.encode_xdr(w)?;
        self.ext.encode_xdr(w)
    }
}

impl XdrDecode for TransactionV0 {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            source_account_ed25519: Uint256::decode_xdr(r)?,
            fee: r.read_u32()?,
            seq_num: r.read_i64()?,
            time_bounds: Option::decode_xdr(r)?,
            memo: Memo::decode_xdr(r)?,
            operations: Operations::decode_xdr(r)?,
            ext: ExtensionPoint::decode_xdr(r)?,
        })
    }
}

// ---------------------------------------------------------------------------
// FeeBumpTransaction
// ---------------------------------------------------------------------------

/// The transaction a fee bump pays for. Only V1 envelopes can be bumped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeBumpInnerTx {
    Tx(TransactionV1Envelope),
}

impl XdrEncode for FeeBumpInnerTx {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::Tx(envelope) => {
                EnvelopeType::Tx.encode_xdr(w)?;
                envelope.encode_xdr(w)
            }
        }
    }
}

impl XdrDecode for FeeBumpInnerTx {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match EnvelopeType::decode_xdr(r)? {
            EnvelopeType::Tx => TransactionV1Envelope::decode_xdr(r).map(Self::Tx),
            other => Err(XdrError::UnsupportedArm {
                type_name: "FeeBumpInnerTx",
                discriminant: other.ordinal(),
            }),
        }
    }
}

/// A fee bump: `fee_source` pays `fee` for the inner transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeeBumpTransaction {
    pub fee_source: MuxedAccount,
    pub fee: i64,
    pub inner_tx: FeeBumpInnerTx,
    pub ext: ExtensionPoint,
}

impl FeeBumpTransaction {
    pub fn new(fee_source: MuxedAccount, fee: i64, inner: TransactionV1Envelope) -> Self {
        Self {
            fee_source,
            fee,
            inner_tx: FeeBumpInnerTx::Tx(inner),
            ext: ExtensionPoint,
        }
    }
}

impl XdrEncode for FeeBumpTransaction {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.fee_source.encode_xdr(w)?;
        w.write_i64(self.fee);
        self.inner_tx.encode_xdr(w)?;
        self.ext.encode_xdr(w)
    }
}

impl XdrDecode for FeeBumpTransaction {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            fee_source: MuxedAccount::decode_xdr(r)?,
            fee: r.read_i64()?,
            inner_tx: FeeBumpInnerTx::decode_xdr(r)?,
            ext: ExtensionPoint::decode_xdr(r)?,
        })
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Incremental construction of a V1 [`Transaction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionBuilder {
    source_account: Option<MuxedAccount>,
    seq_num: Option<i64>,
    base_fee: u32,
    cond: Preconditions,
    memo: Memo,
    operations: Vec<Operation>,
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self {
            source_account: None,
            seq_num: None,
            base_fee: BASE_FEE,
            cond: Preconditions::None,
            memo: Memo::None,
            operations: Vec::new(),
        }
    }
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source_account(mut self, source: MuxedAccount) -> Self {
        self.source_account = Some(source);
        self
    }

    /// The transaction's own sequence number (the account's current
    /// sequence plus one).
    pub fn sequence(mut self, seq_num: i64) -> Self {
        self.seq_num = Some(seq_num);
        self
    }

    /// Per-operation fee in stroops.
    pub fn base_fee(mut self, base_fee: u32) -> Self {
        self.base_fee = base_fee;
        self
    }

    pub fn time_bounds(mut self, bounds: TimeBounds) -> Self {
        self.cond = Preconditions::Time(bounds);
        self
    }

    pub fn memo(mut self, memo: Memo) -> Self {
        self.memo = memo;
        self
    }

    pub fn add_operation(mut self, op: Operation) -> Self {
        self.operations.push(op);
        self
    }

    /// The finished transaction.
    ///
    /// # Errors
    ///
    /// - [`XdrError::MissingField`] if the source account or sequence number
    ///   is unset, or no operation was added.
    /// - [`XdrError::LengthExceeded`] past 100 operations.
    /// - [`XdrError::InvalidValue`] if the total fee overflows `u32`.
    pub fn build(&self) -> Result<Transaction, XdrError> {
        const NAME: &str = "Transaction";
        let source_account = self.source_account.ok_or(XdrError::MissingField {
            type_name: NAME,
            field: "source_account",
        })?;
        let seq_num = self.seq_num.ok_or(XdrError::MissingField {
            type_name: NAME,
            field: "seq_num",
        })?;
        if self.operations.is_empty() {
            return Err(XdrError::MissingField {
                type_name: NAME,
                field: "operations",
            });
        }
        let operations = Operations::from(self.operations.clone());
        operations.check_bounds()?;
        let fee = u32::try_from(operations.len())
            .ok()
            .and_then(|count| self.base_fee.checked_mul(count))
            .ok_or_else(|| XdrError::InvalidValue {
                type_name: NAME,
                reason: format!(
                    "fee {} x {} operations overflows uint32",
                    self.base_fee,
                    operations.len()
                ),
            })?;
        Ok(Transaction {
            source_account,
            fee,
            seq_num,
            cond: self.cond,
            memo: self.memo.clone(),
            operations,
            ext: ExtensionPoint,
        })
    }
}
