//! # Networks
//!
//! A network is named by its passphrase. The network ID mixed into every
//! signature payload is the SHA-256 of that passphrase, so a transaction
//! signed for one network cannot be replayed on another.

use std::fmt;
use std::str::FromStr;

use lxdr_core::{sha256_raw, Hash};
use serde::{Deserialize, Serialize};

pub const PUBLIC_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";
pub const FUTURENET_PASSPHRASE: &str = "Test SDF Future Network ; October 2022";

/// A ledger network, identified by passphrase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Network {
    passphrase: String,
}

impl Network {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }

    pub fn public() -> Self {
        Self::new(PUBLIC_PASSPHRASE)
    }

    pub fn testnet() -> Self {
        Self::new(TESTNET_PASSPHRASE)
    }

    pub fn futurenet() -> Self {
        Self::new(FUTURENET_PASSPHRASE)
    }

    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// SHA-256 of the passphrase.
    pub fn network_id(&self) -> Hash {
        sha256_raw(self.passphrase.as_bytes())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.passphrase)
    }
}

impl FromStr for Network {
    type Err = std::convert::Infallible;

    /// `public`, `testnet` and `futurenet` name the well-known networks;
    /// anything else is taken as a custom passphrase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "public" | "pubnet" | "mainnet" => Self::public(),
            "testnet" => Self::testnet(),
            "futurenet" => Self::futurenet(),
            _ => Self::new(s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_id_vectors() {
        assert_eq!(
            Network::testnet().network_id().to_hex(),
            "cee0302d59844d32bdca915c8203dd44b33fbb7edc19051ea37abedf28ecd472"
        );
        assert_eq!(
            Network::public().network_id().to_hex(),
            "7ac33997544e3175d266bd022439b22cdb16508c01163f26e5cb2a3e1045a979"
        );
    }

    #[test]
    fn names_and_custom_passphrases() {
        assert_eq!("TESTNET".parse::<Network>().unwrap(), Network::testnet());
        assert_eq!("public".parse::<Network>().unwrap(), Network::public());
        assert_eq!("futurenet".parse::<Network>().unwrap(), Network::futurenet());
        let custom: Network = "Standalone Network ; February 2017".parse().unwrap();
        assert_eq!(custom.passphrase(), "Standalone Network ; February 2017");
    }
}
