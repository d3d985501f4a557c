//! # Keys Subcommand
//!
//! Ed25519 key generation and inspection. Secret keys are stored as `S…`
//! StrKey seeds, public keys as `G…` account IDs.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use zeroize::Zeroizing;

use lxdr_crypto::KeyPair;

/// Arguments for the `lxdr keys` subcommand.
#[derive(Args, Debug)]
pub struct KeysArgs {
    #[command(subcommand)]
    pub command: KeysCommand,
}

/// Key subcommands.
#[derive(Subcommand, Debug)]
pub enum KeysCommand {
    /// Generate a new keypair.
    Generate {
        /// Output directory for the keypair files.
        #[arg(long, short, default_value = ".")]
        output: PathBuf,
        /// Prefix for the key filenames.
        #[arg(long, default_value = "lxdr")]
        prefix: String,
    },

    /// Print the account ID for a secret seed file.
    Show {
        /// Path to the secret seed file.
        #[arg(value_name = "FILE")]
        key: PathBuf,
    },
}

/// Execute the keys subcommand.
pub fn run_keys(args: &KeysArgs) -> Result<u8> {
    match &args.command {
        KeysCommand::Generate { output, prefix } => cmd_generate(output, prefix),
        KeysCommand::Show { key } => {
            let key_pair = load_key_pair(key)?;
            println!("{}", key_pair.public_key());
            Ok(0)
        }
    }
}

/// Read a secret seed file.
pub fn load_key_pair(path: &Path) -> Result<KeyPair> {
    if !path.exists() {
        bail!("secret key file not found: {}", path.display());
    }
    let seed = Zeroizing::new(
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read secret key: {}", path.display()))?,
    );
    KeyPair::from_secret_seed(&seed)
        .with_context(|| format!("invalid secret key in {}", path.display()))
}

fn cmd_generate(output_dir: &Path, prefix: &str) -> Result<u8> {
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    let key_pair = KeyPair::generate();
    let account = key_pair.public_key().to_strkey();

    let key_path = output_dir.join(format!("{prefix}.key"));
    let pub_path = output_dir.join(format!("{prefix}.pub"));

    std::fs::write(&key_path, key_pair.secret_seed().as_bytes())
        .with_context(|| format!("failed to write secret key: {}", key_path.display()))?;
    std::fs::write(&pub_path, &account)
        .with_context(|| format!("failed to write public key: {}", pub_path.display()))?;

    tracing::info!(account = %account, "generated keypair");

    println!("OK: generated Ed25519 keypair");
    println!("  Secret key: {}", key_path.display());
    println!("  Public key: {}", pub_path.display());
    println!("  Account:    {account}");

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_creates_files() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(cmd_generate(dir.path(), "test").unwrap(), 0);

        let seed = std::fs::read_to_string(dir.path().join("test.key")).unwrap();
        assert_eq!(seed.len(), 56);
        assert!(seed.starts_with('S'));

        let account = std::fs::read_to_string(dir.path().join("test.pub")).unwrap();
        assert_eq!(account.len(), 56);
        assert!(account.starts_with('G'));
    }

    #[test]
    fn generated_seed_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        cmd_generate(dir.path(), "test").unwrap();

        let key_pair = load_key_pair(&dir.path().join("test.key")).unwrap();
        let account = std::fs::read_to_string(dir.path().join("test.pub")).unwrap();
        assert_eq!(key_pair.public_key().to_strkey(), account);
    }

    #[test]
    fn seed_file_with_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.key");
        std::fs::write(
            &path,
            "SAAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQC5MY\n",
        )
        .unwrap();
        assert_eq!(
            load_key_pair(&path).unwrap().public_key().to_strkey(),
            "GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR"
        );
    }

    #[test]
    fn missing_and_malformed_keys_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_key_pair(&dir.path().join("absent.key")).is_err());

        let path = dir.path().join("bad.key");
        std::fs::write(&path, "not a seed").unwrap();
        let err = load_key_pair(&path).unwrap_err();
        assert!(format!("{err:#}").contains("invalid secret key"));
    }
}
