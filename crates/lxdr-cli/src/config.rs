//! # CLI Configuration
//!
//! Settings come from an optional YAML file and the global `--network`
//! flag, which wins over the file. Missing keys fall back to testnet and
//! the network's base fee.
//!
//! ```yaml
//! network: public
//! base_fee: 200
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use lxdr_model::{Network, BASE_FEE};

/// The on-disk configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub network: Option<String>,
    pub base_fee: Option<u32>,
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub network: Network,
    pub base_fee: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            network: Network::testnet(),
            base_fee: BASE_FEE,
        }
    }
}

impl Settings {
    /// Load settings from `path` (if any), then apply `network_override`.
    pub fn load(path: Option<&Path>, network_override: Option<&str>) -> Result<Self> {
        let file = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?;
                serde_yaml::from_str(&content)
                    .with_context(|| format!("failed to parse config: {}", path.display()))?
            }
            None => ConfigFile::default(),
        };
        Ok(Self::resolve(file, network_override))
    }

    fn resolve(file: ConfigFile, network_override: Option<&str>) -> Self {
        let defaults = Self::default();
        let network = network_override
            .map(str::to_string)
            .or(file.network)
            .map(|name| match name.parse::<Network>() {
                Ok(network) => network,
                Err(never) => match never {},
            })
            .unwrap_or(defaults.network);
        Self {
            network,
            base_fee: file.base_fee.unwrap_or(defaults.base_fee),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let settings = Settings::load(None, None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.network, Network::testnet());
        assert_eq!(settings.base_fee, 100);
    }

    #[test]
    fn file_values_and_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lxdr.yaml");
        std::fs::write(&path, "network: public\nbase_fee: 250\n").unwrap();

        let settings = Settings::load(Some(&path), None).unwrap();
        assert_eq!(settings.network, Network::public());
        assert_eq!(settings.base_fee, 250);

        let overridden = Settings::load(Some(&path), Some("futurenet")).unwrap();
        assert_eq!(overridden.network, Network::futurenet());
        assert_eq!(overridden.base_fee, 250);
    }

    #[test]
    fn custom_passphrase() {
        let settings = Settings::load(None, Some("Standalone Network ; February 2017")).unwrap();
        assert_eq!(
            settings.network.passphrase(),
            "Standalone Network ; February 2017"
        );
    }

    #[test]
    fn unknown_keys_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lxdr.yaml");
        std::fs::write(&path, "netwrok: public\n").unwrap();
        assert!(Settings::load(Some(&path), None).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("absent.yaml")), None).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config"));
    }
}
