//! # Envelopes and Signatures
//!
//! An envelope pairs a transaction with the signatures collected for it.
//!
//! ## Lifecycle
//!
//! `enclose` → unsigned (no signatures) → `add_signature`/`sign` → partially
//! or fully signed → submitted. Each step returns a new envelope; the one it
//! was called on keeps its signatures, so candidate envelopes can be built
//! independently by several signers and merged by the caller.
//!
//! ## Signature payload
//!
//! What is signed is the transaction hash: SHA-256 of the canonical
//! encoding of `network_id || tagged transaction`, where the network ID is
//! the SHA-256 of the network passphrase. V0 transactions are tagged via
//! their V1 form, which yields the same bytes the network hashes for them.

use lxdr_core::{
    sha256_digest, BoundedBytes, BoundedVec, CanonicalXdr, Hash, XdrDecode, XdrEncode, XdrEnum,
    XdrError, XdrReader, XdrWriter,
};
use lxdr_crypto::{Ed25519PublicKey, Ed25519Signature, SignatureHint, Signer};
use serde::{Deserialize, Serialize};

use crate::network::Network;
use crate::transaction::{FeeBumpTransaction, Transaction, TransactionV0};

/// Maximum signatures on one envelope.
pub const MAX_SIGNATURES: usize = 20;

/// Signatures attached to an envelope.
pub type Signatures = BoundedVec<DecoratedSignature, MAX_SIGNATURES>;

lxdr_core::xdr_enum! {
    /// Envelope and hash-preimage discriminators.
    pub enum EnvelopeType {
        TxV0 = 0 => "ENVELOPE_TYPE_TX_V0",
        Scp = 1 => "ENVELOPE_TYPE_SCP",
        Tx = 2 => "ENVELOPE_TYPE_TX",
        Auth = 3 => "ENVELOPE_TYPE_AUTH",
        ScpValue = 4 => "ENVELOPE_TYPE_SCPVALUE",
        TxFeeBump = 5 => "ENVELOPE_TYPE_TX_FEE_BUMP",
        OpId = 6 => "ENVELOPE_TYPE_OP_ID",
        PoolRevokeOpId = 7 => "ENVELOPE_TYPE_POOL_REVOKE_OP_ID",
        ContractId = 8 => "ENVELOPE_TYPE_CONTRACT_ID",
        SorobanAuthorization = 9 => "ENVELOPE_TYPE_SOROBAN_AUTHORIZATION",
    }
}

// ---------------------------------------------------------------------------
// DecoratedSignature
// ---------------------------------------------------------------------------

/// A signature tagged with the signer's key hint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecoratedSignature {
    pub hint: SignatureHint,
    pub signature: BoundedBytes<64>,
}

impl DecoratedSignature {
    pub fn new(hint: SignatureHint, signature: &Ed25519Signature) -> Self {
        Self {
            hint,
            signature: BoundedBytes::from_array(*signature.as_bytes()),
        }
    }

    /// Verify against `key` over `hash`.
    pub fn verifies(&self, key: &Ed25519PublicKey, hash: &Hash) -> bool {
        self.hint.matches(key)
            && Ed25519Signature::from_slice(self.signature.as_bytes())
                .and_then(|sig| lxdr_crypto::verify(hash, &sig, key))
                .is_ok()
    }
}

impl XdrEncode for DecoratedSignature {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.hint.encode_xdr(w)?;
        self.signature.encode_xdr(w)
    }
}

impl XdrDecode for DecoratedSignature {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            hint: SignatureHint::decode_xdr(r)?,
            signature: BoundedBytes::decode_xdr(r)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Envelope shapes
// ---------------------------------------------------------------------------

macro_rules! envelope_shape {
    ($(#[$meta:meta])* $name:ident, $tx:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name {
            pub tx: $tx,
            pub signatures: Signatures,
        }

        impl $name {
            /// Wrap `tx` with no signatures.
            pub fn new(tx: $tx) -> Self {
                Self {
                    tx,
                    signatures: Signatures::new(),
                }
            }
        }

        impl XdrEncode for $name {
            fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
                self.tx.encode_xdr(w)?;
                self.signatures.encode_xdr(w)
            }
        }

        impl XdrDecode for $name {
            fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
                Ok(Self {
                    tx: <$tx>::decode_xdr(r)?,
                    signatures: Signatures::decode_xdr(r)?,
                })
            }
        }
    };
}

envelope_shape! {
    /// A legacy transaction and its signatures.
    TransactionV0Envelope, TransactionV0
}

envelope_shape! {
    /// A V1 transaction and its signatures.
    TransactionV1Envelope, Transaction
}

envelope_shape! {
    /// A fee bump and the fee source's signatures.
    FeeBumpTransactionEnvelope, FeeBumpTransaction
}

// ---------------------------------------------------------------------------
// TransactionEnvelope
// ---------------------------------------------------------------------------

/// Any submittable envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionEnvelope {
    TxV0(TransactionV0Envelope),
    Tx(TransactionV1Envelope),
    TxFeeBump(FeeBumpTransactionEnvelope),
}

impl From<TransactionV0> for TransactionEnvelope {
    fn from(tx: TransactionV0) -> Self {
        Self::TxV0(TransactionV0Envelope::new(tx))
    }
}

impl From<Transaction> for TransactionEnvelope {
    fn from(tx: Transaction) -> Self {
        Self::Tx(TransactionV1Envelope::new(tx))
    }
}

impl From<FeeBumpTransaction> for TransactionEnvelope {
    fn from(tx: FeeBumpTransaction) -> Self {
        Self::TxFeeBump(FeeBumpTransactionEnvelope::new(tx))
    }
}

impl TransactionEnvelope {
    /// Wrap a transaction of any shape in its envelope, unsigned.
    pub fn enclose(tx: impl Into<TransactionEnvelope>) -> Self {
        tx.into()
    }

    pub fn envelope_type(&self) -> EnvelopeType {
        match self {
            Self::TxV0(_) => EnvelopeType::TxV0,
            Self::Tx(_) => EnvelopeType::Tx,
            Self::TxFeeBump(_) => EnvelopeType::TxFeeBump,
        }
    }

    pub fn signatures(&self) -> &Signatures {
        match self {
            Self::TxV0(e) => &e.signatures,
            Self::Tx(e) => &e.signatures,
            Self::TxFeeBump(e) => &e.signatures,
        }
    }

    /// A copy with `signature` appended. The receiver is unchanged.
    pub fn add_signature(&self, signature: DecoratedSignature) -> Self {
        let mut next = self.clone();
        let signatures = match &mut next {
            Self::TxV0(e) => &mut e.signatures,
            Self::Tx(e) => &mut e.signatures,
            Self::TxFeeBump(e) => &mut e.signatures,
        };
        *signatures = signatures.pushed(signature);
        next
    }

    /// The transaction as it is tagged for hashing.
    pub fn tagged_transaction(&self) -> TaggedTransaction {
        match self {
            Self::TxV0(e) => TaggedTransaction::Tx(e.tx.to_v1()),
            Self::Tx(e) => TaggedTransaction::Tx(e.tx.clone()),
            Self::TxFeeBump(e) => TaggedTransaction::TxFeeBump(e.tx.clone()),
        }
    }

    /// The structure whose hash is signed on `network`.
    pub fn signature_payload(&self, network: &Network) -> TransactionSignaturePayload {
        TransactionSignaturePayload {
            network_id: network.network_id(),
            tagged_transaction: self.tagged_transaction(),
        }
    }

    /// The transaction hash on `network`.
    pub fn hash(&self, network: &Network) -> Result<Hash, XdrError> {
        self.signature_payload(network).hash()
    }

    /// Hash, sign and append a signature from `signer`.
    pub fn sign(&self, signer: &impl Signer, network: &Network) -> Result<Self, XdrError> {
        let hash = self.hash(network)?;
        let key = signer.public_key();
        let signature = signer.sign_hash(&hash);
        tracing::debug!(signer = %key, hash = %hash, "signed transaction envelope");
        Ok(self.add_signature(DecoratedSignature::new(key.signature_hint(), &signature)))
    }

    /// True if any attached signature verifies against `key` on `network`.
    pub fn is_signed_by(&self, key: &Ed25519PublicKey, network: &Network) -> Result<bool, XdrError> {
        let hash = self.hash(network)?;
        Ok(self.signatures().iter().any(|sig| sig.verifies(key, &hash)))
    }
}

impl XdrEncode for TransactionEnvelope {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.envelope_type().encode_xdr(w)?;
        match self {
            Self::TxV0(e) => e.encode_xdr(w),
            Self::Tx(e) => e.encode_xdr(w),
            Self::TxFeeBump(e) => e.encode_xdr(w),
        }
    }
}

impl XdrDecode for TransactionEnvelope {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match EnvelopeType::decode_xdr(r)? {
            EnvelopeType::TxV0 => TransactionV0Envelope::decode_xdr(r).map(Self::TxV0),
            EnvelopeType::Tx => TransactionV1Envelope::decode_xdr(r).map(Self::Tx),
            EnvelopeType::TxFeeBump => {
                FeeBumpTransactionEnvelope::decode_xdr(r).map(Self::TxFeeBump)
            }
            other => Err(XdrError::UnsupportedArm {
                type_name: "TransactionEnvelope",
                discriminant: other.ordinal(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Signature payload
// ---------------------------------------------------------------------------

/// A transaction tagged with its envelope type for hashing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaggedTransaction {
    Tx(Transaction),
    TxFeeBump(FeeBumpTransaction),
}

impl TaggedTransaction {
    pub fn envelope_type(&self) -> EnvelopeType {
        match self {
            Self::Tx(_) => EnvelopeType::Tx,
            Self::TxFeeBump(_) => EnvelopeType::TxFeeBump,
        }
    }
}

impl XdrEncode for TaggedTransaction {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.envelope_type().encode_xdr(w)?;
        match self {
            Self::Tx(tx) => tx.encode_xdr(w),
            Self::TxFeeBump(tx) => tx.encode_xdr(w),
        }
    }
}

impl XdrDecode for TaggedTransaction {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match EnvelopeType::decode_xdr(r)? {
            EnvelopeType::Tx => Transaction::decode_xdr(r).map(Self::Tx),
            EnvelopeType::TxFeeBump => FeeBumpTransaction::decode_xdr(r).map(Self::TxFeeBump),
            other => Err(XdrError::UnsupportedArm {
                type_name: "TaggedTransaction",
                discriminant: other.ordinal(),
            }),
        }
    }
}

/// `network_id || tagged transaction`: the preimage of a transaction hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionSignaturePayload {
    pub network_id: Hash,
    pub tagged_transaction: TaggedTransaction,
}

impl TransactionSignaturePayload {
    /// SHA-256 of the canonical encoding.
    pub fn hash(&self) -> Result<Hash, XdrError> {
        let canonical = CanonicalXdr::new(self)?;
        let hash = sha256_digest(&canonical);
        tracing::debug!(
            tx_hash = %hash,
            envelope_type = %self.tagged_transaction.envelope_type(),
            "derived transaction hash"
        );
        Ok(hash)
    }
}

impl XdrEncode for TransactionSignaturePayload {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.network_id.encode_xdr(w)?;
        self.tagged_transaction.encode_xdr(w)
    }
}

impl XdrDecode for TransactionSignaturePayload {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            network_id: Hash::decode_xdr(r)?,
            tagged_transaction: TaggedTransaction::decode_xdr(r)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::MuxedAccount;
    use crate::asset::Asset;
    use crate::memo::Memo;
    use crate::operation::Operation;
    use crate::transaction::TransactionBuilder;
    use lxdr_core::Amount;
    use lxdr_crypto::KeyPair;

    fn signer() -> KeyPair {
        KeyPair::from_seed(&[1u8; 32])
    }

    fn tx() -> Transaction {
        let source: MuxedAccount = "GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR"
            .parse()
            .unwrap();
        let destination: MuxedAccount = "GCATS5YOVB6ROX2WUNKGNQ2MP3GMXDMKSG2O4N5CLX3A6W4PZGZZI55U"
            .parse()
            .unwrap();
        TransactionBuilder::new()
            .source_account(source)
            .sequence(1_234_567_890)
            .memo(Memo::text("hello").unwrap())
            .add_operation(Operation::payment(
                destination,
                Asset::Native,
                Amount::from_stroops(100_000_000),
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn enclose_starts_unsigned() {
        let envelope = TransactionEnvelope::enclose(tx());
        assert!(envelope.signatures().is_empty());
        assert_eq!(envelope.envelope_type(), EnvelopeType::Tx);
    }

    #[test]
    fn add_signature_leaves_original_unsigned() {
        let unsigned = TransactionEnvelope::enclose(tx());
        let signed = unsigned.sign(&signer(), &Network::testnet()).unwrap();
        assert!(unsigned.signatures().is_empty());
        assert_eq!(signed.signatures().len(), 1);
        assert_eq!(
            unsigned.hash(&Network::testnet()).unwrap(),
            signed.hash(&Network::testnet()).unwrap()
        );
        assert_eq!(
            TransactionEnvelope::from_xdr(&unsigned.to_xdr().unwrap()),
            Ok(unsigned)
        );
    }

    #[test]
    fn signature_verifies_only_for_signer_and_network() {
        let signed = TransactionEnvelope::enclose(tx())
            .sign(&signer(), &Network::testnet())
            .unwrap();
        let key = signer().public_key();
        let other = KeyPair::from_seed(&[2u8; 32]).public_key();
        assert!(signed.is_signed_by(&key, &Network::testnet()).unwrap());
        assert!(!signed.is_signed_by(&other, &Network::testnet()).unwrap());
        assert!(!signed.is_signed_by(&key, &Network::public()).unwrap());
    }

    #[test]
    fn network_changes_hash() {
        let envelope = TransactionEnvelope::enclose(tx());
        assert_ne!(
            envelope.hash(&Network::testnet()).unwrap(),
            envelope.hash(&Network::public()).unwrap()
        );
    }

    #[test]
    fn twenty_one_signatures_fail_to_encode() {
        let mut envelope = TransactionEnvelope::enclose(tx());
        for _ in 0..=MAX_SIGNATURES {
            envelope = envelope.sign(&signer(), &Network::testnet()).unwrap();
        }
        assert!(matches!(
            envelope.to_xdr(),
            Err(XdrError::LengthExceeded { max: 20, actual: 21, .. })
        ));
    }

    #[test]
    fn payload_round_trip() {
        let payload = TransactionEnvelope::enclose(tx()).signature_payload(&Network::testnet());
        assert_eq!(
            TransactionSignaturePayload::from_xdr(&payload.to_xdr().unwrap()),
            Ok(payload)
        );
    }

    #[test]
    fn non_transaction_envelope_types_unsupported() {
        assert!(matches!(
            TransactionEnvelope::from_xdr(&[0, 0, 0, 1]),
            Err(XdrError::UnsupportedArm { discriminant: 1, .. })
        ));
        assert!(matches!(
            TaggedTransaction::from_xdr(&[0, 0, 0, 0]),
            Err(XdrError::UnsupportedArm { discriminant: 0, .. })
        ));
    }

    #[test]
    fn mismatched_hint_does_not_verify() {
        let hash = Hash([3; 32]);
        let kp = signer();
        let sig = DecoratedSignature::new(SignatureHint([0; 4]), &kp.sign(&hash));
        assert!(!sig.verifies(&kp.public_key(), &hash));
        let good = DecoratedSignature::new(kp.public_key().signature_hint(), &kp.sign(&hash));
        assert!(good.verifies(&kp.public_key(), &hash));
    }
}
