//! # Accounts
//!
//! [`PublicKey`] (and its alias [`AccountId`]) is the single-arm
//! `PUBLIC_KEY_TYPE_ED25519` union. [`MuxedAccount`] adds the multiplexed
//! form: an ed25519 key plus a 64-bit sub-account id, written as an `M…`
//! StrKey.
//!
//! Both serialize as their StrKey text, and parsing goes through the same
//! checksummed decoder.

use std::fmt;
use std::str::FromStr;

use lxdr_core::strkey::{self, StrKeyVersion};
use lxdr_core::{Uint256, ValidationError, XdrDecode, XdrEncode, XdrEnum, XdrError, XdrReader, XdrWriter};
use lxdr_crypto::Ed25519PublicKey;
use serde::{Deserialize, Serialize};

lxdr_core::xdr_enum! {
    /// Public key algorithms.
    pub enum PublicKeyType {
        Ed25519 = 0 => "PUBLIC_KEY_TYPE_ED25519",
    }
}

lxdr_core::xdr_enum! {
    /// Key types used by signer keys and muxed accounts.
    pub enum CryptoKeyType {
        Ed25519 = 0 => "KEY_TYPE_ED25519",
        PreAuthTx = 1 => "KEY_TYPE_PRE_AUTH_TX",
        HashX = 2 => "KEY_TYPE_HASH_X",
        Ed25519SignedPayload = 3 => "KEY_TYPE_ED25519_SIGNED_PAYLOAD",
        MuxedEd25519 = 0x100 => "KEY_TYPE_MUXED_ED25519",
    }
}

// ---------------------------------------------------------------------------
// PublicKey / AccountId
// ---------------------------------------------------------------------------

/// A ledger public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum PublicKey {
    Ed25519(Uint256),
}

/// An account is identified by its public key.
pub type AccountId = PublicKey;

impl PublicKey {
    /// Wrap a raw ed25519 key.
    pub fn ed25519(key: [u8; 32]) -> Self {
        Self::Ed25519(Uint256(key))
    }

    pub fn key_type(&self) -> PublicKeyType {
        match self {
            Self::Ed25519(_) => PublicKeyType::Ed25519,
        }
    }

    /// The raw 32 key bytes.
    pub fn key_bytes(&self) -> &[u8; 32] {
        match self {
            Self::Ed25519(key) => key.as_bytes(),
        }
    }

    /// The `G…` StrKey.
    pub fn to_strkey(&self) -> String {
        strkey::encode(StrKeyVersion::AccountId, self.key_bytes())
    }

    /// The key in the form the signing layer verifies against.
    pub fn to_ed25519(&self) -> Ed25519PublicKey {
        Ed25519PublicKey::from_bytes(*self.key_bytes())
    }
}

impl From<Ed25519PublicKey> for PublicKey {
    fn from(key: Ed25519PublicKey) -> Self {
        Self::ed25519(*key.as_bytes())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_strkey())
    }
}

impl FromStr for PublicKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        strkey::decode_32(StrKeyVersion::AccountId, s).map(Self::ed25519)
    }
}

impl From<PublicKey> for String {
    fn from(key: PublicKey) -> Self {
        key.to_strkey()
    }
}

impl TryFrom<String> for PublicKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl XdrEncode for PublicKey {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.key_type().encode_xdr(w)?;
        match self {
            Self::Ed25519(key) => key.encode_xdr(w),
        }
    }
}

impl XdrDecode for PublicKey {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match PublicKeyType::decode_xdr(r)? {
            PublicKeyType::Ed25519 => Uint256::decode_xdr(r).map(Self::Ed25519),
        }
    }
}

// ---------------------------------------------------------------------------
// MuxedAccount
// ---------------------------------------------------------------------------

/// An account, optionally multiplexed with a 64-bit id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum MuxedAccount {
    /// `KEY_TYPE_ED25519`: a plain account.
    Ed25519(Uint256),
    /// `KEY_TYPE_MUXED_ED25519`: an account plus sub-account id.
    MuxedEd25519 { id: u64, ed25519: Uint256 },
}

impl MuxedAccount {
    /// A multiplexed form of `account`.
    pub fn muxed(account: &AccountId, id: u64) -> Self {
        Self::MuxedEd25519 {
            id,
            ed25519: Uint256(*account.key_bytes()),
        }
    }

    pub fn key_type(&self) -> CryptoKeyType {
        match self {
            Self::Ed25519(_) => CryptoKeyType::Ed25519,
            Self::MuxedEd25519 { .. } => CryptoKeyType::MuxedEd25519,
        }
    }

    /// The underlying account, with any multiplexing id dropped.
    pub fn account_id(&self) -> AccountId {
        match self {
            Self::Ed25519(key) | Self::MuxedEd25519 { ed25519: key, .. } => PublicKey::Ed25519(*key),
        }
    }

    /// The multiplexing id, if any.
    pub fn id(&self) -> Option<u64> {
        match self {
            Self::Ed25519(_) => None,
            Self::MuxedEd25519 { id, .. } => Some(*id),
        }
    }

    /// `G…` for plain accounts, `M…` for multiplexed ones.
    pub fn to_strkey(&self) -> String {
        match self {
            Self::Ed25519(key) => strkey::encode(StrKeyVersion::AccountId, key.as_bytes()),
            Self::MuxedEd25519 { id, ed25519 } => {
                let mut payload = Vec::with_capacity(40);
                payload.extend_from_slice(ed25519.as_bytes());
                payload.extend_from_slice(&id.to_be_bytes());
                strkey::encode(StrKeyVersion::MuxedAccount, &payload)
            }
        }
    }
}

impl From<AccountId> for MuxedAccount {
    fn from(account: AccountId) -> Self {
        Self::Ed25519(Uint256(*account.key_bytes()))
    }
}

impl fmt::Display for MuxedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_strkey())
    }
}

impl FromStr for MuxedAccount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.starts_with('M') {
            return s.parse::<AccountId>().map(Self::from);
        }
        let payload = strkey::decode(StrKeyVersion::MuxedAccount, s)?;
        let (key, id) = payload.split_at(32);
        let mut ed25519 = [0u8; 32];
        ed25519.copy_from_slice(key);
        let mut id_bytes = [0u8; 8];
        id_bytes.copy_from_slice(id);
        Ok(Self::MuxedEd25519 {
            id: u64::from_be_bytes(id_bytes),
            ed25519: Uint256(ed25519),
        })
    }
}

impl From<MuxedAccount> for String {
    fn from(account: MuxedAccount) -> Self {
        account.to_strkey()
    }
}

impl TryFrom<String> for MuxedAccount {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl XdrEncode for MuxedAccount {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.key_type().encode_xdr(w)?;
        match self {
            Self::Ed25519(key) => key.encode_xdr(w),
            Self::MuxedEd25519 { id, ed25519 } => {
                w.write_u64(*id);
                ed25519.encode_xdr(w)
            }
        }
    }
}

impl XdrDecode for MuxedAccount {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match CryptoKeyType::decode_xdr(r)? {
            CryptoKeyType::Ed25519 => Uint256::decode_xdr(r).map(Self::Ed25519),
            CryptoKeyType::MuxedEd25519 => {
                let id = r.read_u64()?;
                let ed25519 = Uint256::decode_xdr(r)?;
                Ok(Self::MuxedEd25519 { id, ed25519 })
            }
            other => Err(XdrError::UnsupportedArm {
                type_name: "MuxedAccount",
                discriminant: other.ordinal(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = "GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR";
    const MUXED: &str = "MCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYAAAAAAAAAAAFKQTI";

    #[test]
    fn account_strkey_round_trip() {
        let account: AccountId = ACCOUNT.parse().unwrap();
        assert_eq!(account.to_string(), ACCOUNT);
        assert_eq!(account.key_type(), PublicKeyType::Ed25519);
    }

    #[test]
    fn account_wire_form_is_type_then_key() {
        let account: AccountId = ACCOUNT.parse().unwrap();
        let bytes = account.to_xdr().unwrap();
        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[..4], &[0, 0, 0, 0]);
        assert_eq!(&bytes[4..], account.key_bytes());
        assert_eq!(AccountId::from_xdr(&bytes), Ok(account));
    }

    #[test]
    fn unknown_public_key_type_rejected() {
        let mut bytes = vec![0, 0, 0, 1];
        bytes.extend_from_slice(&[0u8; 32]);
        assert!(matches!(
            AccountId::from_xdr(&bytes),
            Err(XdrError::InvalidEnumValue { .. })
        ));
    }

    #[test]
    fn muxed_strkey_round_trip() {
        let muxed: MuxedAccount = MUXED.parse().unwrap();
        assert_eq!(muxed.id(), Some(42));
        assert_eq!(muxed.account_id().to_string(), ACCOUNT);
        assert_eq!(muxed.to_string(), MUXED);
    }

    #[test]
    fn muxed_wire_form() {
        let account: AccountId = ACCOUNT.parse().unwrap();
        let muxed = MuxedAccount::muxed(&account, 42);
        let bytes = muxed.to_xdr().unwrap();
        assert_eq!(&bytes[..4], &[0, 0, 1, 0]);
        assert_eq!(&bytes[4..12], &42u64.to_be_bytes());
        assert_eq!(MuxedAccount::from_xdr(&bytes), Ok(muxed));
    }

    #[test]
    fn plain_account_parses_as_muxed_ed25519() {
        let muxed: MuxedAccount = ACCOUNT.parse().unwrap();
        assert_eq!(muxed.key_type(), CryptoKeyType::Ed25519);
        assert_eq!(muxed.id(), None);
    }

    #[test]
    fn pre_auth_arm_unsupported() {
        let mut bytes = vec![0, 0, 0, 1];
        bytes.extend_from_slice(&[0u8; 32]);
        assert_eq!(
            MuxedAccount::from_xdr(&bytes),
            Err(XdrError::UnsupportedArm {
                type_name: "MuxedAccount",
                discriminant: 1
            })
        );
    }

    #[test]
    fn serde_uses_strkeys() {
        let muxed: MuxedAccount = MUXED.parse().unwrap();
        let json = serde_json::to_string(&muxed).unwrap();
        assert_eq!(json, format!("\"{MUXED}\""));
        assert!(serde_json::from_str::<AccountId>("\"GABC\"").is_err());
    }
}
