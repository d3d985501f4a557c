//! # StrKey Encoding
//!
//! Human-readable key encoding used for account IDs (`G…`), muxed accounts
//! (`M…`), secret seeds (`S…`), and the other typed 32-byte identifiers.
//!
//! Layout: `base32(version_byte || payload || crc16_xmodem(version_byte || payload))`
//! with the RFC 4648 alphabet, no padding, and the checksum appended
//! little-endian.
//!
//! Decoding is strict. The length must match the version's payload size
//! exactly, unused trailing bits must be zero, and the checksum must match,
//! so every payload has exactly one accepted text form.

use crate::error::ValidationError;

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// The kind of key a StrKey carries, selecting its version byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrKeyVersion {
    /// `G…` ed25519 account public key.
    AccountId,
    /// `M…` ed25519 key plus 64-bit multiplexing id.
    MuxedAccount,
    /// `S…` ed25519 secret seed.
    SecretSeed,
    /// `T…` pre-authorized transaction hash.
    PreAuthTx,
    /// `X…` SHA-256 hash signer.
    Sha256Hash,
    /// `L…` liquidity pool ID.
    LiquidityPool,
    /// `B…` claimable balance ID (type byte plus hash).
    ClaimableBalance,
}

impl StrKeyVersion {
    /// The version byte prepended to the payload.
    pub fn version_byte(self) -> u8 {
        match self {
            Self::AccountId => 6 << 3,
            Self::MuxedAccount => 12 << 3,
            Self::SecretSeed => 18 << 3,
            Self::PreAuthTx => 19 << 3,
            Self::Sha256Hash => 23 << 3,
            Self::LiquidityPool => 11 << 3,
            Self::ClaimableBalance => 1 << 3,
        }
    }

    /// Payload length in bytes.
    pub fn payload_len(self) -> usize {
        match self {
            Self::MuxedAccount => 40,
            Self::ClaimableBalance => 33,
            _ => 32,
        }
    }

    /// Length of the encoded text.
    pub fn encoded_len(self) -> usize {
        ((1 + self.payload_len() + 2) * 8).div_ceil(5)
    }
}

/// Encode `payload` as a StrKey of the given version.
pub fn encode(version: StrKeyVersion, payload: &[u8]) -> String {
    let mut raw = Vec::with_capacity(payload.len() + 3);
    raw.push(version.version_byte());
    raw.extend_from_slice(payload);
    let crc = crc16_xmodem(&raw);
    raw.extend_from_slice(&crc.to_le_bytes());
    base32_encode(&raw)
}

/// Decode a StrKey, checking version, length, and checksum.
pub fn decode(version: StrKeyVersion, text: &str) -> Result<Vec<u8>, ValidationError> {
    let shown = match version {
        StrKeyVersion::SecretSeed => "<redacted>",
        _ => text,
    };
    if text.len() != version.encoded_len() {
        return Err(ValidationError::strkey(shown, "invalid length"));
    }
    let raw = base32_decode(text)
        .ok_or_else(|| ValidationError::strkey(shown, "invalid base32 encoding"))?;
    let (body, checksum) = raw.split_at(raw.len() - 2);
    if body[0] != version.version_byte() {
        return Err(ValidationError::strkey(shown, "unexpected version byte"));
    }
    if crc16_xmodem(body).to_le_bytes() != checksum {
        return Err(ValidationError::strkey(shown, "checksum mismatch"));
    }
    Ok(body[1..].to_vec())
}

/// Decode a StrKey whose payload is exactly 32 bytes.
pub fn decode_32(version: StrKeyVersion, text: &str) -> Result<[u8; 32], ValidationError> {
    let payload = decode(version, text)?;
    let mut out = [0u8; 32];
    if payload.len() != out.len() {
        return Err(ValidationError::strkey(text, "payload is not 32 bytes"));
    }
    out.copy_from_slice(&payload);
    Ok(out)
}

/// Returns true if `text` decodes as a StrKey of `version`.
pub fn is_valid(version: StrKeyVersion, text: &str) -> bool {
    decode(version, text).is_ok()
}

fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for byte in data {
        crc ^= u16::from(*byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

fn base32_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() * 8).div_ceil(5));
    let mut buffer: u32 = 0;
    let mut bits = 0u32;
    for byte in data {
        buffer = ((buffer << 8) | u32::from(*byte)) & 0xffff;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(char::from(ALPHABET[((buffer >> bits) & 31) as usize]));
        }
    }
    if bits > 0 {
        out.push(char::from(ALPHABET[((buffer << (5 - bits)) & 31) as usize]));
    }
    out
}

fn base32_decode(text: &str) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits = 0u32;
    for c in text.bytes() {
        let value = match c {
            b'A'..=b'Z' => c - b'A',
            b'2'..=b'7' => c - b'2' + 26,
            _ => return None,
        };
        buffer = ((buffer << 5) | u32::from(value)) & 0xffff;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push(((buffer >> bits) & 0xff) as u8);
        }
    }
    // Leftover bits are padding and must be zero in the canonical form.
    if bits > 0 && buffer & ((1 << bits) - 1) != 0 {
        return None;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

    #[test]
    fn zero_account_vector() {
        assert_eq!(encode(StrKeyVersion::AccountId, &[0u8; 32]), ZERO_ACCOUNT);
        assert_eq!(decode_32(StrKeyVersion::AccountId, ZERO_ACCOUNT), Ok([0u8; 32]));
    }

    #[test]
    fn known_account_vector() {
        let key = hex::decode("8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c")
            .unwrap();
        assert_eq!(
            encode(StrKeyVersion::AccountId, &key),
            "GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR"
        );
    }

    #[test]
    fn seed_vector() {
        assert_eq!(
            encode(StrKeyVersion::SecretSeed, &[1u8; 32]),
            "SAAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQC5MY"
        );
    }

    #[test]
    fn muxed_vector_has_trailing_bit() {
        let mut payload =
            hex::decode("8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c")
                .unwrap();
        payload.extend_from_slice(&42u64.to_be_bytes());
        let text = encode(StrKeyVersion::MuxedAccount, &payload);
        assert_eq!(
            text,
            "MCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYAAAAAAAAAAAFKQTI"
        );
        assert_eq!(decode(StrKeyVersion::MuxedAccount, &text), Ok(payload));
    }

    #[test]
    fn wrong_version_rejected() {
        assert!(decode(StrKeyVersion::SecretSeed, ZERO_ACCOUNT).is_err());
    }

    #[test]
    fn bad_checksum_rejected() {
        let mut tampered = ZERO_ACCOUNT.to_string();
        tampered.replace_range(54..55, "G");
        assert!(!is_valid(StrKeyVersion::AccountId, &tampered));
    }

    #[test]
    fn lowercase_and_length_rejected() {
        assert!(!is_valid(StrKeyVersion::AccountId, &ZERO_ACCOUNT.to_lowercase()));
        assert!(!is_valid(StrKeyVersion::AccountId, &ZERO_ACCOUNT[..55]));
        assert!(!is_valid(StrKeyVersion::AccountId, ""));
    }

    #[test]
    fn seed_errors_do_not_echo_input() {
        let bogus = "S".repeat(56);
        let err = decode(StrKeyVersion::SecretSeed, &bogus).unwrap_err();
        assert!(!err.to_string().contains(&bogus));
    }

    #[test]
    fn non_canonical_trailing_bits_rejected() {
        let text = encode(StrKeyVersion::MuxedAccount, &[0u8; 40]);
        let last = text.chars().last().unwrap();
        // The final character carries one padding bit; flipping it keeps the
        // payload bytes identical but must not be accepted.
        let idx = ALPHABET.iter().position(|c| char::from(*c) == last).unwrap();
        let flipped = char::from(ALPHABET[idx ^ 1]);
        let mut tampered = text[..text.len() - 1].to_string();
        tampered.push(flipped);
        assert!(decode(StrKeyVersion::MuxedAccount, &tampered).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn account_roundtrip(key in any::<[u8; 32]>()) {
            let text = encode(StrKeyVersion::AccountId, &key);
            prop_assert!(text.starts_with('G'));
            prop_assert_eq!(text.len(), 56);
            prop_assert_eq!(decode_32(StrKeyVersion::AccountId, &text), Ok(key));
        }
    }
}
