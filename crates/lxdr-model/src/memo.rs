//! Transaction memos.

use lxdr_core::{
    BoundedString, Hash, ValidationError, XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter,
};
use serde::{Deserialize, Serialize};

/// Maximum memo text length in bytes.
pub const MEMO_TEXT_MAX: usize = 28;

lxdr_core::xdr_enum! {
    /// Memo discriminators.
    pub enum MemoType {
        None = 0 => "MEMO_NONE",
        Text = 1 => "MEMO_TEXT",
        Id = 2 => "MEMO_ID",
        Hash = 3 => "MEMO_HASH",
        Return = 4 => "MEMO_RETURN",
    }
}

/// An optional note attached to a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Memo {
    #[default]
    None,
    Text(BoundedString<MEMO_TEXT_MAX>),
    Id(u64),
    Hash(Hash),
    /// Hash of the transaction this one refunds.
    Return(Hash),
}

impl Memo {
    /// A text memo of at most 28 bytes.
    pub fn text(text: &str) -> Result<Self, ValidationError> {
        BoundedString::new(text)
            .map(Self::Text)
            .map_err(|e| ValidationError::InvalidMemo(e.to_string()))
    }

    pub fn id(id: u64) -> Self {
        Self::Id(id)
    }

    pub fn hash(hash: Hash) -> Self {
        Self::Hash(hash)
    }

    pub fn return_hash(hash: Hash) -> Self {
        Self::Return(hash)
    }

    pub fn memo_type(&self) -> MemoType {
        match self {
            Self::None => MemoType::None,
            Self::Text(_) => MemoType::Text,
            Self::Id(_) => MemoType::Id,
            Self::Hash(_) => MemoType::Hash,
            Self::Return(_) => MemoType::Return,
        }
    }
}

impl XdrEncode for Memo {
    fn encode_xdr(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.memo_type().encode_xdr(w)?;
        match self {
            Self::None => Ok(()),
            Self::Text(text) => text.encode_xdr(w),
            Self::Id(id) => {
                w.write_u64(*id);
                Ok(())
            }
            Self::Hash(hash) | Self::Return(hash) => hash.encode_xdr(w),
        }
    }
}

impl XdrDecode for Memo {
    fn decode_xdr(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(match MemoType::decode_xdr(r)? {
            MemoType::None => Self::None,
            MemoType::Text => Self::Text(BoundedString::decode_xdr(r)?),
            MemoType::Id => Self::Id(r.read_u64()?),
            MemoType::Hash => Self::Hash(Hash::decode_xdr(r)?),
            MemoType::Return => Self::Return(Hash::decode_xdr(r)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_memo_wire_form() {
        let memo = Memo::text("hello").unwrap();
        assert_eq!(
            memo.to_xdr().unwrap(),
            vec![0, 0, 0, 1, 0, 0, 0, 5, b'h', b'e', b'l', b'l', b'o', 0, 0, 0]
        );
        assert_eq!(Memo::from_xdr(&memo.to_xdr().unwrap()), Ok(memo));
    }

    #[test]
    fn text_memo_length_limit() {
        assert!(Memo::text(&"a".repeat(28)).is_ok());
        assert!(matches!(
            Memo::text(&"a".repeat(29)),
            Err(ValidationError::InvalidMemo(_))
        ));
    }

    #[test]
    fn over_long_text_rejected_on_decode() {
        let mut bytes = vec![0, 0, 0, 1, 0, 0, 0, 29];
        bytes.extend(std::iter::repeat(b'a').take(32));
        assert!(matches!(
            Memo::from_xdr(&bytes),
            Err(XdrError::LengthExceeded { max: 28, .. })
        ));
    }

    #[test]
    fn other_arms_round_trip() {
        for memo in [
            Memo::None,
            Memo::id(u64::MAX),
            Memo::hash(Hash([7; 32])),
            Memo::return_hash(Hash([9; 32])),
        ] {
            assert_eq!(Memo::from_xdr(&memo.to_xdr().unwrap()), Ok(memo));
        }
        assert_eq!(Memo::default().to_xdr().unwrap(), vec![0, 0, 0, 0]);
    }
}
