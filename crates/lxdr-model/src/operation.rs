//! # Operations
//!
//! The full operation type table is declared so that every ordinal decodes
//! to a known name. Bodies are modelled for a representative subset:
//! account creation, payments, trustlines, merges, data entries, sequence
//! bumps, claimable balances and liquidity-pool deposits and withdrawals.
//! Any other body decodes as [`XdrError::UnsupportedArm`].

use lxdr_core::{
    Amount, BoundedBytes, BoundedString, BoundedVec, XdrDecode, XdrEncode, XdrEnum, XdrError,
    XdrReader, XdrWriter,
};
use serde::{Deserialize, Serialize};

use crate::account::{AccountId, MuxedAccount};
use crate::asset::{Asset, ChangeTrustAsset};
use crate::balance::ClaimableBalanceId;
use crate::pool::PoolId;
use crate::predicate::Claimant;

lxdr_core::xdr_enum! {
    /// Operation discriminators.
    pub enum OperationType {
        CreateAccount = 0 => "CREATE_ACCOUNT",
        Payment = 1 => "PAYMENT",
        PathPaymentStrictReceive = 2 => "PATH_PAYMENT_STRICT_RECEIVE",
        ManageSellOffer = 3 => "MANAGE_SELL_OFFER",
        CreatePassiveSellOffer = 4 => "CREATE_PASSIVE_SELL_OFFER",
        SetOptions = 5 => "SET_OPTIONS",
        ChangeTrust = 6 => "CHANGE_TRUST",
        AllowTrust = 7 => "ALLOW_TRUST",
        AccountMerge = 8 => "ACCOUNT_MERGE",
        Inflation = 9 => "INFLATION",
        ManageData = 10 => "MANAGE_DATA",
        BumpSequence = 11 => "BUMP_SEQUENCE",
        ManageBuyOffer = 12 => "MANAGE_BUY_OFFER",
        PathPaymentStrictSend = 13 => "PATH_PAYMENT_STRICT_SEND",
        CreateClaimableBalance = 14 => "CREATE_CLAIMABLE_BALANCE",
        ClaimClaimableBalance = 15 => "CLAIM_CLAIMABLE_BALANCE",
        BeginSponsoringFutureReserves = 16 => "BEGIN_SPONSORING_FUTURE_RESERVES",
        EndSponsoringFutureReserves = 17 => "END_SPONSORING_FUTURE_RESERVES",
        RevokeSponsorship = 18 => "REVOKE_SPONSORSHIP",
        Clawback = 19 => "CLAWBACK",
        ClawbackClaimableBalance = 20 => "CLAWBACK_CLAIMABLE_BALANCE",
        SetTrustLineFlags = 21 => "SET_TRUST_LINE_FLAGS",
        LiquidityPoolDeposit = 22 => "LIQUIDITY_POOL_DEPOSIT",
        LiquidityPoolWithdraw = 23 => "LIQUIDITY_POOL_WITHDRAW",
        InvokeHostFunction = 24 => "INVOKE_HOST_FUNCTION",
        ExtendFootprintTtl = 25 => "EXTEND_FOOTPRINT_TTL",
        RestoreFootprint = 26 => "RESTORE_FOOTPRINT",
    }
}

/// Maximum claimants on one claimable balance.
pub const MAX_CLAIMANTS: usize = 10;

/// Maximum data entry name and value length in bytes.
pub const DATA_VALUE_MAX: usize = 64;

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreateAccountOp {
    pub destination: AccountId,
    pub starting_balance: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentOp {
    pub destination: MuxedAccount,
    pub asset: Asset,
    pub amount: Amount,
}

/// Create, update or (with a zero limit) remove a trustline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeTrustOp {
    pub line: ChangeTrustAsset,
    pub limit: Amount,
}

/// Merge the source account into `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountMergeOp {
    pub destination: MuxedAccount,
}

/// Set, or with no value delete, a data entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManageDataOp {
    pub data_name: BoundedString<DATA_VALUE_MAX>,
    pub data_value: Option<BoundedBytes<DATA_VALUE_MAX>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BumpSequenceOp {
    pub bump_to: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreateClaimableBalanceOp {
    pub asset: Asset,
    pub amount: Amount,
    pub claimants: BoundedVec<Claimant, MAX_CLAIMANTS>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimClaimableBalanceOp {
    pub balance_id: ClaimableBalanceId,
}

/// A price as a fraction `n / d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    pub n: i32,
    pub d: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiquidityPoolDepositOp {
    pub liquidity_pool_id: PoolId,
    pub max_amount_a: Amount,
    pub max_amount_b: Amount,
    pub min_price: Price,
    pub max_price: Price,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiquidityPoolWithdrawOp {
    pub liquidity_pool_id: PoolId,
    pub amount: Amount,
    pub min_amount_a: Amount,
    pub min_amount_b: Amount,
}

impl XdrEncode for Price {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_i32(self.n);
        w.write_i32(self.d);
        Ok(())
    }
}

impl XdrDecode for Price {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            n: r.read_i32()?,
            d: r.read_i32()?,
        })
    }
}

/// The payload of an operation, one arm per operation type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationBody {
    CreateAccount(CreateAccountOp),
    Payment(PaymentOp),
    ChangeTrust(ChangeTrustOp),
    AccountMerge(AccountMergeOp),
    ManageData(ManageDataOp),
    BumpSequence(BumpSequenceOp),
    CreateClaimableBalance(CreateClaimableBalanceOp),
    ClaimClaimableBalance(ClaimClaimableBalanceOp),
    LiquidityPoolDeposit(LiquidityPoolDepositOp),
    LiquidityPoolWithdraw(LiquidityPoolWithdrawOp),
}

impl OperationBody {
    pub fn operation_type(&self) -> OperationType {
        match self {
            Self::CreateAccount(_) => OperationType::CreateAccount,
            Self::Payment(_) => OperationType::Payment,
            Self::ChangeTrust(_) => OperationType::ChangeTrust,
            Self::AccountMerge(_) => OperationType::AccountMerge,
            Self::ManageData(_) => OperationType::ManageData,
            Self::BumpSequence(_) => OperationType::BumpSequence,
            Self::CreateClaimableBalance(_) => OperationType::CreateClaimableBalance,
            Self::ClaimClaimableBalance(_) => OperationType::ClaimClaimableBalance,
            Self::LiquidityPoolDeposit(_) => OperationType::LiquidityPoolDeposit,
            Self::LiquidityPoolWithdraw(_) => OperationType::LiquidityPoolWithdraw,
        }
    }
}

macro_rules! body_from {
    ($($op:ident => $variant:ident),+ $(,)?) => {
        $(
            impl From<$op> for OperationBody {
                fn from(op: $op) -> Self {
                    Self::$variant(op)
                }
            }
        )+
    };
}

body_from! {
    CreateAccountOp => CreateAccount,
    PaymentOp => Payment,
    ChangeTrustOp => ChangeTrust,
    AccountMergeOp => AccountMerge,
    ManageDataOp => ManageData,
    BumpSequenceOp => BumpSequence,
    CreateClaimableBalanceOp => CreateClaimableBalance,
    ClaimClaimableBalanceOp => ClaimClaimableBalance,
    LiquidityPoolDepositOp => LiquidityPoolDeposit,
    LiquidityPoolWithdrawOp => LiquidityPoolWithdraw,
}

impl XdrEncode for OperationBody {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.operation_type().encode_xdr(w)?;
        match self {
            Self::CreateAccount(op) => {
                op.destination.encode_xdr(w)?;
                op.starting_balance.encode_xdr(w)
            }
            Self::Payment(op) => {
                op.destination.encode_xdr(w)?;
                op.asset.encode_xdr(w)?;
                op.amount.encode_xdr(w)
            }
            Self::ChangeTrust(op) => {
                op.line.encode_xdr(w)?;
                op.limit.encode_xdr(w)
            }
            Self::AccountMerge(op) => op.destination.encode_xdr(w),
            Self::ManageData(op) => {
                op.data_name.encode_xdr(w)?;
                op.data_value.encode_xdr(w)
            }
            Self::BumpSequence(op) => {
                w.write_i64(op.bump_to);
                Ok(())
            }
            Self::CreateClaimableBalance(op) => {
                op.asset.encode_xdr(w)?;
                op.amount.encode_xdr(w)?;
                op.claimants.encode_xdr(w)
            }
            Self::ClaimClaimableBalance(op) => op.balance_id.encode_xdr(w),
            Self::LiquidityPoolDeposit(op) => {
                op.liquidity_pool_id.encode_xdr(w)?;
                op.max_amount_a.encode_xdr(w)?;
                op.max_amount_b.encode_xdr(w)?;
                op.min_price.encode_xdr(w)?;
                op.max_price.encode_xdr(w)
            }
            Self::LiquidityPoolWithdraw(op) => {
                op.liquidity_pool_id.encode_xdr(w)?;
                op.amount.encode_xdr(w)?;
                op.min_amount_a.encode_xdr(w)?;
                op.min_amount_b.encode_xdr(w)
            }
        }
    }
}

impl XdrDecode for OperationBody {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(match OperationType::decode_xdr(r)? {
            OperationType::CreateAccount => Self::CreateAccount(CreateAccountOp {
                destination: AccountId::decode_xdr(r)?,
                starting_balance: Amount::decode_xdr(r)?,
            }),
            OperationType::Payment => Self::Payment(PaymentOp {
                destination: MuxedAccount::decode_xdr(r)?,
                asset: Asset::decode_xdr(r)?,
                amount: Amount::decode_xdr(r)?,
            }),
            OperationType::ChangeTrust => Self::ChangeTrust(ChangeTrustOp {
                line: ChangeTrustAsset::decode_xdr(r)?,
                limit: Amount::decode_xdr(r)?,
            }),
            OperationType::AccountMerge => Self::AccountMerge(AccountMergeOp {
                destination: MuxedAccount::decode_xdr(r)?,
            }),
            OperationType::ManageData => Self::ManageData(ManageDataOp {
                data_name: BoundedString::decode_xdr(r)?,
                data_value: Option::decode_xdr(r)?,
            }),
            OperationType::BumpSequence => Self::BumpSequence(BumpSequenceOp {
                bump_to: r.read_i64()?,
            }),
            OperationType::CreateClaimableBalance => {
                Self::CreateClaimableBalance(CreateClaimableBalanceOp {
                    asset: Asset::decode_xdr(r)?,
                    amount: Amount::decode_xdr(r)?,
                    claimants: BoundedVec::decode_xdr(r)?,
                })
            }
            OperationType::ClaimClaimableBalance => {
                Self::ClaimClaimableBalance(ClaimClaimableBalanceOp {
                    balance_id: ClaimableBalanceId::decode_xdr(r)?,
                })
            }
            OperationType::LiquidityPoolDeposit => {
                Self::LiquidityPoolDeposit(LiquidityPoolDepositOp {
                    liquidity_pool_id: PoolId::decode_xdr(r)?,
                    max_amount_a: Amount::decode_xdr(r)?,
                    max_amount_b: Amount::decode_xdr(r)?,
                    min_price: Price::decode_xdr(r)?,
                    max_price: Price::decode_xdr(r)?,
                })
            }
            OperationType::LiquidityPoolWithdraw => {
                Self::LiquidityPoolWithdraw(LiquidityPoolWithdrawOp {
                    liquidity_pool_id: PoolId::decode_xdr(r)?,
                    amount: Amount::decode_xdr(r)?,
                    min_amount_a: Amount::decode_xdr(r)?,
                    min_amount_b: Amount::decode_xdr(r)?,
                })
            }
            other => {
                return Err(XdrError::UnsupportedArm {
                    type_name: "OperationBody",
                    discriminant: other.ordinal(),
                })
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// An operation, optionally run on behalf of an account other than the
/// transaction source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operation {
    pub source_account: Option<MuxedAccount>,
    pub body: OperationBody,
}

impl Operation {
    pub fn new(body: impl Into<OperationBody>) -> Self {
        Self {
            source_account: None,
            body: body.into(),
        }
    }

    /// A copy with `source` as the operation source.
    pub fn with_source(&self, source: MuxedAccount) -> Self {
        Self {
            source_account: Some(source),
            ..self.clone()
        }
    }

    pub fn payment(destination: MuxedAccount, asset: Asset, amount: Amount) -> Self {
        Self::new(PaymentOp {
            destination,
            asset,
            amount,
        })
    }

    pub fn create_account(destination: AccountId, starting_balance: Amount) -> Self {
        Self::new(CreateAccountOp {
            destination,
            starting_balance,
        })
    }

    pub fn change_trust(line: impl Into<ChangeTrustAsset>, limit: Amount) -> Self {
        Self::new(ChangeTrustOp {
            line: line.into(),
            limit,
        })
    }

    pub fn operation_type(&self) -> OperationType {
        self.body.operation_type()
    }
}

impl XdrEncode for Operation {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.source_account.encode_xdr(w)?;
        self.body.encode_xdr(w)
    }
}

impl XdrDecode for Operation {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            source_account: Option::decode_xdr(r)?,
            body: OperationBody::decode_xdr(r)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::LiquidityPoolParameters;
    use crate::predicate::ClaimPredicate;

    fn account() -> AccountId {
        "GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR"
            .parse()
            .unwrap()
    }

    fn round_trip(op: Operation) {
        let bytes = op.to_xdr().unwrap();
        assert_eq!(Operation::from_xdr(&bytes), Ok(op));
    }

    #[test]
    fn payment_wire_prefix() {
        let op = Operation::payment(account().into(), Asset::Native, Amount::from_stroops(1));
        let bytes = op.to_xdr().unwrap();
        // no source, PAYMENT, KEY_TYPE_ED25519
        assert_eq!(&bytes[..12], &[0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0]);
        round_trip(op);
    }

    #[test]
    fn every_modelled_body_round_trips() {
        let usd = Asset::credit("USD", account()).unwrap();
        let pool_id = PoolId::derive(&Asset::Native, &usd, 30).unwrap();
        let params =
            LiquidityPoolParameters::constant_product(Asset::Native, usd.clone(), 30).unwrap();
        let ops = vec![
            Operation::create_account(account(), Amount::from_stroops(10_000_000)),
            Operation::change_trust(params, Amount::MAX),
            Operation::change_trust(usd.clone(), Amount::ZERO),
            Operation::new(AccountMergeOp {
                destination: MuxedAccount::muxed(&account(), 9),
            }),
            Operation::new(ManageDataOp {
                data_name: BoundedString::new("config").unwrap(),
                data_value: Some(BoundedBytes::new(vec![1, 2, 3]).unwrap()),
            }),
            Operation::new(ManageDataOp {
                data_name: BoundedString::new("config").unwrap(),
                data_value: None,
            }),
            Operation::new(BumpSequenceOp { bump_to: 99 }),
            Operation::new(CreateClaimableBalanceOp {
                asset: usd.clone(),
                amount: Amount::from_stroops(5),
                claimants: BoundedVec::single(Claimant::new(
                    account(),
                    ClaimPredicate::unconditional(),
                )),
            }),
            Operation::new(ClaimClaimableBalanceOp {
                balance_id: ClaimableBalanceId::for_operation(&account(), 1, 0).unwrap(),
            }),
            Operation::new(LiquidityPoolDepositOp {
                liquidity_pool_id: pool_id,
                max_amount_a: Amount::from_stroops(100),
                max_amount_b: Amount::from_stroops(200),
                min_price: Price { n: 1, d: 2 },
                max_price: Price { n: 2, d: 1 },
            }),
            Operation::new(LiquidityPoolWithdrawOp {
                liquidity_pool_id: pool_id,
                amount: Amount::from_stroops(50),
                min_amount_a: Amount::ZERO,
                min_amount_b: Amount::ZERO,
            })
            .with_source(account().into()),
        ];
        for op in ops {
            round_trip(op);
        }
    }

    #[test]
    fn unmodelled_body_is_unsupported() {
        // no source, INFLATION
        assert_eq!(
            Operation::from_xdr(&[0, 0, 0, 0, 0, 0, 0, 9]),
            Err(XdrError::UnsupportedArm {
                type_name: "OperationBody",
                discriminant: 9
            })
        );
    }

    #[test]
    fn unknown_operation_type_is_invalid() {
        assert!(matches!(
            Operation::from_xdr(&[0, 0, 0, 0, 0, 0, 0, 27]),
            Err(XdrError::InvalidEnumValue { .. })
        ));
    }

    #[test]
    fn with_source_leaves_original_untouched() {
        let op = Operation::new(BumpSequenceOp { bump_to: 1 });
        let sourced = op.with_source(account().into());
        assert!(op.source_account.is_none());
        assert!(sourced.source_account.is_some());
    }

    #[test]
    fn too_many_claimants_fail_to_encode() {
        let claimant = Claimant::new(account(), ClaimPredicate::unconditional());
        let op = Operation::new(CreateClaimableBalanceOp {
            asset: Asset::Native,
            amount: Amount::from_stroops(1),
            claimants: std::iter::repeat(claimant).take(MAX_CLAIMANTS + 1).collect(),
        });
        assert!(matches!(op.to_xdr(), Err(XdrError::LengthExceeded { max: 10, .. })));
    }
}
