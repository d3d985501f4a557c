//! # Ed25519 Signing and Verification
//!
//! ## Security Invariant
//!
//! - Signing input MUST be a `&Hash`: a transaction is signed through the
//!   32-byte digest of its signature payload, never through raw bytes.
//! - Private keys are never serialized or logged. [`KeyPair`] does not
//!   implement `Serialize`, its `Debug` output is opaque, and the `S…` secret
//!   seed is returned inside `Zeroizing`.
//!
//! ## Serde
//!
//! - Public keys serialize as `G…` account StrKeys.
//! - Signatures and hints serialize as lowercase hex.

use std::fmt;

use ed25519_dalek::{Signer as _, Verifier as _};
use lxdr_core::strkey::{self, StrKeyVersion};
use lxdr_core::{Hash, XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};
use rand_core::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// An Ed25519 public key (32 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey(pub [u8; 32]);

/// The last four bytes of a signer's public key, attached to a signature so
/// validators can find the matching signer without trying every key.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SignatureHint(pub [u8; 4]);

/// An Ed25519 signature (64 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ed25519Signature(pub [u8; 64]);

/// An Ed25519 key pair for signing operations.
pub struct KeyPair {
    signing_key: ed25519_dalek::SigningKey,
}

/// Anything that can sign a transaction hash.
pub trait Signer {
    /// The public key signatures verify against.
    fn public_key(&self) -> Ed25519PublicKey;

    /// Sign a 32-byte transaction hash.
    fn sign_hash(&self, hash: &Hash) -> Ed25519Signature;
}

// ---------------------------------------------------------------------------
// Ed25519PublicKey impls
// ---------------------------------------------------------------------------

impl Ed25519PublicKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as a `G…` account StrKey.
    pub fn to_strkey(&self) -> String {
        strkey::encode(StrKeyVersion::AccountId, &self.0)
    }

    /// Parse a `G…` account StrKey.
    pub fn from_strkey(text: &str) -> Result<Self, CryptoError> {
        strkey::decode_32(StrKeyVersion::AccountId, text)
            .map(Self)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
    }

    /// The signature hint for this key.
    pub fn signature_hint(&self) -> SignatureHint {
        let mut hint = [0u8; 4];
        hint.copy_from_slice(&self.0[28..]);
        SignatureHint(hint)
    }

    /// Convert to an `ed25519_dalek::VerifyingKey` for verification.
    pub fn to_verifying_key(&self) -> Result<ed25519_dalek::VerifyingKey, CryptoError> {
        ed25519_dalek::VerifyingKey::from_bytes(&self.0)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519PublicKey({})", self.to_strkey())
    }
}

impl fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_strkey())
    }
}

impl Serialize for Ed25519PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_strkey())
    }
}

impl<'de> Deserialize<'de> for Ed25519PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_strkey(&text).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// SignatureHint impls
// ---------------------------------------------------------------------------

impl SignatureHint {
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Returns true if this hint was derived from `key`.
    pub fn matches(&self, key: &Ed25519PublicKey) -> bool {
        *self == key.signature_hint()
    }
}

impl fmt::Debug for SignatureHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignatureHint({})", self.to_hex())
    }
}

impl XdrEncode for SignatureHint {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_fixed_opaque(&self.0);
        Ok(())
    }
}

impl XdrDecode for SignatureHint {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_fixed_opaque::<4>().map(Self)
    }
}

impl Serialize for SignatureHint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SignatureHint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let mut hint = [0u8; 4];
        hex::decode_to_slice(text.trim(), &mut hint).map_err(serde::de::Error::custom)?;
        Ok(Self(hint))
    }
}

// ---------------------------------------------------------------------------
// Ed25519Signature impls
// ---------------------------------------------------------------------------

impl Ed25519Signature {
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Copy a signature out of a slice that must be exactly 64 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; 64] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidSignatureLength(bytes.len()))?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a signature from a 128-character hex string.
    pub fn from_hex(text: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(text.trim())
            .map_err(|e| CryptoError::VerificationFailed(format!("signature hex: {e}")))?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Signature({}...)", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Ed25519Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Ed25519Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// KeyPair impls
// ---------------------------------------------------------------------------

impl KeyPair {
    /// Generate a new random key pair from the OS CSPRNG.
    pub fn generate() -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut OsRng),
        }
    }

    /// Create a key pair from a raw 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// Create a key pair from an `S…` secret seed.
    pub fn from_secret_seed(text: &str) -> Result<Self, CryptoError> {
        let seed = Zeroizing::new(
            strkey::decode_32(StrKeyVersion::SecretSeed, text.trim())
                .map_err(|e| CryptoError::InvalidSeed(e.to_string()))?,
        );
        Ok(Self::from_seed(&seed))
    }

    /// The `S…` secret seed. Handle with care.
    pub fn secret_seed(&self) -> Zeroizing<String> {
        let seed = Zeroizing::new(self.signing_key.to_bytes());
        Zeroizing::new(strkey::encode(StrKeyVersion::SecretSeed, seed.as_ref()))
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a transaction hash.
    pub fn sign(&self, hash: &Hash) -> Ed25519Signature {
        tracing::trace!(signer = %self.public_key(), hash = %hash, "signing hash");
        Ed25519Signature(self.signing_key.sign(hash.as_bytes()).to_bytes())
    }
}

impl Signer for KeyPair {
    fn public_key(&self) -> Ed25519PublicKey {
        KeyPair::public_key(self)
    }

    fn sign_hash(&self, hash: &Hash) -> Ed25519Signature {
        self.sign(hash)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair(<private>)")
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Verify an Ed25519 signature over a transaction hash.
pub fn verify(
    hash: &Hash,
    signature: &Ed25519Signature,
    public_key: &Ed25519PublicKey,
) -> Result<(), CryptoError> {
    let vk = public_key.to_verifying_key()?;
    let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    vk.verify(hash.as_bytes(), &sig)
        .map_err(|e| CryptoError::VerificationFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED_ONE: &str = "SAAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQC5MY";
    const ACCOUNT_ONE: &str = "GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR";

    fn tx_hash() -> Hash {
        Hash::from_hex("e5881003e292168e336de0c6096f2276adfd9b7bc24400c5b1659d4b78d702c1")
            .unwrap()
    }

    #[test]
    fn seed_to_account() {
        let kp = KeyPair::from_secret_seed(SEED_ONE).unwrap();
        assert_eq!(kp.public_key().to_strkey(), ACCOUNT_ONE);
        assert_eq!(kp.secret_seed().as_str(), SEED_ONE);
        assert_eq!(KeyPair::from_seed(&[1u8; 32]).public_key(), kp.public_key());
    }

    #[test]
    fn deterministic_signature_vector() {
        let kp = KeyPair::from_seed(&[1u8; 32]);
        let sig = kp.sign(&tx_hash());
        assert_eq!(
            sig.to_hex(),
            "075db032f40c4816ac8ee41a418bc37a86af1e34a4df13e103c5df278b88bffd\
             7b09177d8d3aaa024b1e337a07153ba79cade849e998546dae131de835928201"
        );
        verify(&tx_hash(), &sig, &kp.public_key()).expect("valid signature should verify");
    }

    #[test]
    fn verify_wrong_key_fails() {
        let kp1 = KeyPair::generate();
        let kp2 = KeyPair::generate();
        let sig = kp1.sign(&tx_hash());
        assert!(verify(&tx_hash(), &sig, &kp2.public_key()).is_err());
    }

    #[test]
    fn verify_wrong_hash_fails() {
        let kp = KeyPair::generate();
        let sig = kp.sign(&tx_hash());
        assert!(verify(&Hash::from_bytes([0; 32]), &sig, &kp.public_key()).is_err());
    }

    #[test]
    fn hint_is_last_four_key_bytes() {
        let kp = KeyPair::from_secret_seed(SEED_ONE).unwrap();
        let hint = kp.public_key().signature_hint();
        assert_eq!(hint.to_hex(), "b40f6f5c");
        assert!(hint.matches(&kp.public_key()));
        assert_eq!(hint.to_xdr().unwrap(), vec![0xb4, 0x0f, 0x6f, 0x5c]);
    }

    #[test]
    fn invalid_seed_rejected_without_echo() {
        let err = KeyPair::from_secret_seed(ACCOUNT_ONE).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidSeed(_)));
        assert!(!err.to_string().contains(ACCOUNT_ONE));
    }

    #[test]
    fn signature_length_checked() {
        assert_eq!(
            Ed25519Signature::from_slice(&[0u8; 63]),
            Err(CryptoError::InvalidSignatureLength(63))
        );
        assert!(Ed25519Signature::from_hex("zz").is_err());
    }

    #[test]
    fn public_key_serde_is_strkey() {
        let kp = KeyPair::from_seed(&[1u8; 32]);
        let json = serde_json::to_string(&kp.public_key()).unwrap();
        assert_eq!(json, format!("\"{ACCOUNT_ONE}\""));
        let back: Ed25519PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kp.public_key());
    }

    #[test]
    fn debug_does_not_leak_private_key() {
        let kp = KeyPair::generate();
        assert_eq!(format!("{kp:?}"), "KeyPair(<private>)");
    }

    #[test]
    fn signer_trait_delegates() {
        fn sign_with(signer: &impl Signer, hash: &Hash) -> Ed25519Signature {
            signer.sign_hash(hash)
        }
        let kp = KeyPair::from_seed(&[1u8; 32]);
        assert_eq!(sign_with(&kp, &tx_hash()), kp.sign(&tx_hash()));
    }
}
