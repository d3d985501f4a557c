//! # Claim Predicates and Claimants
//!
//! A [`ClaimPredicate`] is a tree: each node owns its children outright and
//! construction only builds downward, so cycles cannot exist. `AND` and
//! `OR` hold at most two children, `NOT` at most one.
//!
//! Decoding descends through [`XdrReader::nested`], so adversarial nesting
//! fails with [`XdrError::DepthLimitExceeded`] instead of exhausting the
//! stack.

use lxdr_core::{BoundedVec, XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};
use serde::{Deserialize, Serialize};

use crate::account::AccountId;

lxdr_core::xdr_enum! {
    /// Predicate discriminators.
    pub enum ClaimPredicateType {
        Unconditional = 0 => "CLAIM_PREDICATE_UNCONDITIONAL",
        And = 1 => "CLAIM_PREDICATE_AND",
        Or = 2 => "CLAIM_PREDICATE_OR",
        Not = 3 => "CLAIM_PREDICATE_NOT",
        BeforeAbsoluteTime = 4 => "CLAIM_PREDICATE_BEFORE_ABSOLUTE_TIME",
        BeforeRelativeTime = 5 => "CLAIM_PREDICATE_BEFORE_RELATIVE_TIME",
    }
}

/// Children of an `AND` or `OR` node.
pub type PredicatePair = BoundedVec<ClaimPredicate, 2>;

/// A condition under which a claimable balance may be claimed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimPredicate {
    Unconditional,
    And(PredicatePair),
    Or(PredicatePair),
    Not(Option<Box<ClaimPredicate>>),
    /// Claimable before this many seconds since the epoch.
    BeforeAbsoluteTime(i64),
    /// Claimable within this many seconds of the balance's creation.
    BeforeRelativeTime(i64),
}

impl ClaimPredicate {
    pub fn unconditional() -> Self {
        Self::Unconditional
    }

    pub fn and(left: ClaimPredicate, right: ClaimPredicate) -> Self {
        Self::And(BoundedVec::from(vec![left, right]))
    }

    pub fn or(left: ClaimPredicate, right: ClaimPredicate) -> Self {
        Self::Or(BoundedVec::from(vec![left, right]))
    }

    pub fn not(inner: ClaimPredicate) -> Self {
        Self::Not(Some(Box::new(inner)))
    }

    pub fn before_absolute_time(epoch_seconds: i64) -> Self {
        Self::BeforeAbsoluteTime(epoch_seconds)
    }

    pub fn before_relative_time(seconds: i64) -> Self {
        Self::BeforeRelativeTime(seconds)
    }

    pub fn predicate_type(&self) -> ClaimPredicateType {
        match self {
            Self::Unconditional => ClaimPredicateType::Unconditional,
            Self::And(_) => ClaimPredicateType::And,
            Self::Or(_) => ClaimPredicateType::Or,
            Self::Not(_) => ClaimPredicateType::Not,
            Self::BeforeAbsoluteTime(_) => ClaimPredicateType::BeforeAbsoluteTime,
            Self::BeforeRelativeTime(_) => ClaimPredicateType::BeforeRelativeTime,
        }
    }

    /// Evaluate the predicate at `now` for a balance created at `created_at`
    /// (both epoch seconds).
    pub fn is_satisfied(&self, now: i64, created_at: i64) -> bool {
        match self {
            Self::Unconditional => true,
            Self::And(children) => children.iter().all(|p| p.is_satisfied(now, created_at)),
            Self::Or(children) => children.iter().any(|p| p.is_satisfied(now, created_at)),
            Self::Not(inner) => inner
                .as_deref()
                .is_some_and(|p| !p.is_satisfied(now, created_at)),
            Self::BeforeAbsoluteTime(t) => now < *t,
            Self::BeforeRelativeTime(s) => now < created_at.saturating_add(*s),
        }
    }
}

impl XdrEncode for ClaimPredicate {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.predicate_type().encode_xdr(w)?;
        match self {
            Self::Unconditional => Ok(()),
            Self::And(children) | Self::Or(children) => children.encode_xdr(w),
            Self::Not(inner) => inner.encode_xdr(w),
            Self::BeforeAbsoluteTime(t) | Self::BeforeRelativeTime(t) => {
                w.write_i64(*t);
                Ok(())
            }
        }
    }
}

impl XdrDecode for ClaimPredicate {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match ClaimPredicateType::decode_xdr(r)? {
            ClaimPredicateType::Unconditional => Ok(Self::Unconditional),
            ClaimPredicateType::And => r.nested(|r| PredicatePair::decode_xdr(r)).map(Self::And),
            ClaimPredicateType::Or => r.nested(|r| PredicatePair::decode_xdr(r)).map(Self::Or),
            ClaimPredicateType::Not => {
                r.nested(|r| Option::<Box<ClaimPredicate>>::decode_xdr(r)).map(Self::Not)
            }
            ClaimPredicateType::BeforeAbsoluteTime => r.read_i64().map(Self::BeforeAbsoluteTime),
            ClaimPredicateType::BeforeRelativeTime => r.read_i64().map(Self::BeforeRelativeTime),
        }
    }
}

// ---------------------------------------------------------------------------
// Claimants
// ---------------------------------------------------------------------------

lxdr_core::xdr_enum! {
    /// Claimant versions.
    pub enum ClaimantType {
        V0 = 0 => "CLAIMANT_TYPE_V0",
    }
}

/// An account entitled to claim a balance, and the condition it must meet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimantV0 {
    pub destination: AccountId,
    pub predicate: ClaimPredicate,
}

/// A versioned claimant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Claimant {
    V0(ClaimantV0),
}

impl Claimant {
    pub fn new(destination: AccountId, predicate: ClaimPredicate) -> Self {
        Self::V0(ClaimantV0 {
            destination,
            predicate,
        })
    }

    pub fn destination(&self) -> &AccountId {
        match self {
            Self::V0(v0) => &v0.destination,
        }
    }

    pub fn predicate(&self) -> &ClaimPredicate {
        match self {
            Self::V0(v0) => &v0.predicate,
        }
    }
}

impl XdrEncode for Claimant {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Self::V0(v0) => {
                ClaimantType::V0.encode_xdr(w)?;
                v0.destination.encode_xdr(w)?;
                v0.predicate.encode_xdr(w)
            }
        }
    }
}

impl XdrDecode for Claimant {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match ClaimantType::decode_xdr(r)? {
            ClaimantType::V0 => Ok(Self::V0(ClaimantV0 {
                destination: AccountId::decode_xdr(r)?,
                predicate: ClaimPredicate::decode_xdr(r)?,
            })),
        }
    }
}
