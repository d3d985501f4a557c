//! # lxdr-model — Ledger Entity Types
//!
//! The ledger's wire structures expressed as Rust sum and product types over
//! the `lxdr-core` codec. Every union is an `enum` whose variants are its
//! arms, so a discriminator can never disagree with its payload. Every
//! value is immutable once built; "mutators" take `&self` and return a new
//! value.
//!
//! ## Identifier derivation
//!
//! - [`PoolId`]: SHA-256 of the canonical encoding of
//!   [`LiquidityPoolParameters`], with the two assets in canonical order.
//! - [`ClaimableBalanceId`]: SHA-256 of an [`HashIdPreimage`] naming the
//!   creating operation.
//! - Transaction hash: SHA-256 of a [`TransactionSignaturePayload`], the
//!   network ID followed by the tagged transaction. Signatures cover this
//!   hash, never the raw transaction.
//!
//! All three fail with `XdrError` before hashing if any part of the value
//! cannot be encoded.

pub mod account;
pub mod asset;
pub mod balance;
pub mod claim_atom;
pub mod envelope;
pub mod memo;
pub mod network;
pub mod operation;
pub mod pool;
pub mod predicate;
pub mod transaction;

pub use account::{AccountId, CryptoKeyType, MuxedAccount, PublicKey, PublicKeyType};
pub use asset::{
    parse_asset_code, AlphaNum12, AlphaNum4, Asset, AssetCode, AssetCode12, AssetCode4, AssetType,
    ChangeTrustAsset,
};
pub use balance::{ClaimableBalanceId, ClaimableBalanceIdType, HashIdPreimage, OperationIdPreimage};
pub use claim_atom::{
    ClaimAtom, ClaimAtomType, ClaimLiquidityAtom, ClaimLiquidityAtomBuilder, ClaimOfferAtom,
    ClaimOfferAtomBuilder, ClaimOfferAtomV0,
};
pub use envelope::{
    DecoratedSignature, EnvelopeType, FeeBumpTransactionEnvelope, TaggedTransaction,
    TransactionEnvelope, TransactionSignaturePayload, TransactionV0Envelope,
    TransactionV1Envelope, MAX_SIGNATURES,
};
pub use memo::{Memo, MemoType, MEMO_TEXT_MAX};
pub use network::Network;
pub use operation::{
    AccountMergeOp, BumpSequenceOp, ChangeTrustOp, ClaimClaimableBalanceOp, CreateAccountOp,
    CreateClaimableBalanceOp, LiquidityPoolDepositOp, LiquidityPoolWithdrawOp, ManageDataOp,
    Operation, OperationBody, OperationType, PaymentOp, Price,
};
pub use pool::{
    ConstantProductParameters, LiquidityPoolParameters, LiquidityPoolType, PoolId,
    LIQUIDITY_POOL_FEE_V18,
};
pub use predicate::{ClaimPredicate, ClaimPredicateType, Claimant, ClaimantType, ClaimantV0};
pub use transaction::{
    FeeBumpInnerTx, FeeBumpTransaction, PreconditionType, Preconditions, TimeBounds, Transaction,
    TransactionBuilder, TransactionV0, BASE_FEE, MAX_OPS_PER_TX,
};
