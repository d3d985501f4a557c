//! # lxdr-cli — CLI Tool for the Ledger XDR Object Model
//!
//! Provides the `lxdr` command-line interface over `lxdr-model`.
//!
//! ## Subcommands
//!
//! - `lxdr amount`: Decimal/stroop conversion and validation.
//! - `lxdr asset`: Asset parsing and canonical comparison.
//! - `lxdr pool`: Liquidity pool ID derivation.
//! - `lxdr tx`: Envelope building, decoding, hashing and signing.
//! - `lxdr keys`: Ed25519 key generation and inspection.
//!
//! ```bash
//! lxdr amount descale 12.5
//! lxdr pool id XLM ARST:GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR
//! lxdr --network public tx hash --file envelope.b64
//! ```

pub mod amount;
pub mod asset;
pub mod config;
pub mod keys;
pub mod pool;
pub mod tx;

use std::path::Path;

use anyhow::{bail, Context, Result};

/// Read a value passed either inline or as a file path.
///
/// Surrounding whitespace is trimmed so files with a trailing newline work.
pub fn read_input(inline: Option<&str>, file: Option<&Path>) -> Result<String> {
    match (inline, file) {
        (Some(text), None) => Ok(text.trim().to_string()),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map(|content| content.trim().to_string())
            .with_context(|| format!("failed to read {}", path.display())),
        (Some(_), Some(_)) => bail!("pass the value inline or with --file, not both"),
        (None, None) => bail!("no input given; pass it inline or with --file"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_input_trims_file_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "AAAA\n").unwrap();
        assert_eq!(read_input(None, Some(&path)).unwrap(), "AAAA");
        assert_eq!(read_input(Some(" AAAA "), None).unwrap(), "AAAA");
    }

    #[test]
    fn read_input_requires_exactly_one_source() {
        assert!(read_input(None, None).is_err());
        assert!(read_input(Some("x"), Some(Path::new("y"))).is_err());
    }

    #[test]
    fn read_input_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_input(None, Some(&dir.path().join("absent"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read"));
    }
}
