//! # Claimable Balance IDs
//!
//! A balance ID is a versioned wrapper around a 32-byte hash. The hash is
//! derived from an [`HashIdPreimage`] naming the operation that created the
//! balance: source account, transaction sequence number, operation index.
//!
//! Text forms: the hex of the full XDR encoding (type word plus hash, 72
//! characters), or a `B…` StrKey. Both parse; a bare 64-character hash is
//! also accepted as a V0 ID.

use std::fmt;
use std::str::FromStr;

use lxdr_core::strkey::{self, StrKeyVersion};
use lxdr_core::{
    sha256_digest, CanonicalXdr, Hash, ValidationError, XdrDecode, XdrEncode, XdrEnum, XdrError,
    XdrReader, XdrWriter,
};
use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::envelope::EnvelopeType;

lxdr_core::xdr_enum! {
    /// Balance ID versions.
    pub enum ClaimableBalanceIdType {
        V0 = 0 => "CLAIMABLE_BALANCE_ID_TYPE_V0",
    }
}

// ---------------------------------------------------------------------------
// Hash preimages
// ---------------------------------------------------------------------------

/// Identifies one operation within one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationIdPreimage {
    pub source_account: AccountId,
    pub seq_num: i64,
    pub op_num: u32,
}

/// Input to identifier hashes, discriminated by envelope type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashIdPreimage {
    /// `ENVELOPE_TYPE_OP_ID`
    OperationId(OperationIdPreimage),
}

impl HashIdPreimage {
    pub fn envelope_type(&self) -> EnvelopeType {
        match self {
            Self::OperationId(_) => EnvelopeType::OpId,
        }
    }

    pub fn hash(&self) -> Result<Hash, XdrError> {
        Ok(sha256_digest(&CanonicalXdr::new(self)?))
    }
}

impl XdrEncode for HashIdPreimage {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.envelope_type().encode_xdr(w)?;
        match self {
            Self::OperationId(op) => {
                op.source_account.encode_xdr(w)?;
                w.write_i64(op.seq_num);
                w.write_u32(op.op_num);
                Ok(())
            }
        }
    }
}

impl XdrDecode for HashIdPreimage {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match EnvelopeType::decode_xdr(r)? {
            EnvelopeType::OpId => Ok(Self::OperationId(OperationIdPreimage {
                source_account: AccountId::decode_xdr(r)?,
                seq_num: r.read_i64()?,
                op_num: r.read_u32()?,
            })),
            other => Err(XdrError::UnsupportedArm {
                type_name: "HashIdPreimage",
                discriminant: other.ordinal(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// ClaimableBalanceId
// ---------------------------------------------------------------------------

/// A claimable balance identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ClaimableBalanceId {
    V0(Hash),
}

impl ClaimableBalanceId {
    pub fn from_hash(hash: Hash) -> Self {
        Self::V0(hash)
    }

    /// The ID of the balance created by operation `op_num` of the
    /// transaction with `seq_num` sent from `source_account`.
    pub fn for_operation(
        source_account: &AccountId,
        seq_num: i64,
        op_num: u32,
    ) -> Result<Self, XdrError> {
        let preimage = HashIdPreimage::OperationId(OperationIdPreimage {
            source_account: *source_account,
            seq_num,
            op_num,
        });
        let id = Self::V0(preimage.hash()?);
        tracing::debug!(balance_id = %id, seq_num, op_num, "derived claimable balance id");
        Ok(id)
    }

    pub fn id_type(&self) -> ClaimableBalanceIdType {
        match self {
            Self::V0(_) => ClaimableBalanceIdType::V0,
        }
    }

    pub fn hash(&self) -> &Hash {
        match self {
            Self::V0(hash) => hash,
        }
    }

    /// Hex of the XDR encoding: type word followed by the hash.
    pub fn to_hex(&self) -> String {
        let mut bytes = Vec::with_capacity(36);
        bytes.extend_from_slice(&self.id_type().ordinal().to_be_bytes());
        bytes.extend_from_slice(self.hash().as_bytes());
        hex::encode(bytes)
    }

    /// The `B…` StrKey: one type byte followed by the hash.
    pub fn to_strkey(&self) -> String {
        let mut payload = Vec::with_capacity(33);
        payload.push(self.id_type().ordinal() as u8);
        payload.extend_from_slice(self.hash().as_bytes());
        strkey::encode(StrKeyVersion::ClaimableBalance, &payload)
    }
}

impl fmt::Debug for ClaimableBalanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClaimableBalanceId({})", self.to_hex())
    }
}

impl fmt::Display for ClaimableBalanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ClaimableBalanceId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('B') {
            let payload = strkey::decode(StrKeyVersion::ClaimableBalance, s)?;
            let (kind, hash) = payload.split_at(1);
            if kind[0] != 0 {
                return Err(ValidationError::InvalidStrKey {
                    input: s.to_string(),
                    reason: format!("unknown claimable balance id type {}", kind[0]),
                });
            }
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(hash);
            return Ok(Self::V0(Hash(bytes)));
        }
        match s.len() {
            64 => Hash::from_hex(s).map(Self::V0),
            72 => match s.get(..8).zip(s.get(8..)) {
                Some(("00000000", hash)) => Hash::from_hex(hash).map(Self::V0),
                _ => Err(ValidationError::InvalidHex(format!(
                    "unknown claimable balance id type in {s}"
                ))),
            },
            n => Err(ValidationError::InvalidHex(format!(
                "claimable balance id must be 64 or 72 hex characters, got {n}"
            ))),
        }
    }
}

impl From<ClaimableBalanceId> for String {
    fn from(id: ClaimableBalanceId) -> Self {
        id.to_hex()
    }
}

impl TryFrom<String> for ClaimableBalanceId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl XdrEncode for ClaimableBalanceId {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.id_type().encode_xdr(w)?;
        self.hash().encode_xdr(w)
    }
}

impl XdrDecode for ClaimableBalanceId {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match ClaimableBalanceIdType::decode_xdr(r)? {
            ClaimableBalanceIdType::V0 => Hash::decode_xdr(r).map(Self::V0),
        }
    }
}
