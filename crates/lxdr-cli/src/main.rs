//! # lxdr CLI entry point
//!
//! Parses command-line arguments, loads settings and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lxdr_cli::amount::{run_amount, AmountArgs};
use lxdr_cli::asset::{run_asset, AssetArgs};
use lxdr_cli::config::Settings;
use lxdr_cli::keys::{run_keys, KeysArgs};
use lxdr_cli::pool::{run_pool, PoolArgs};
use lxdr_cli::tx::{run_tx, TxArgs};

/// Ledger XDR toolkit
///
/// Inspects and produces canonical ledger values: scaled amounts, assets,
/// liquidity pool IDs, transaction envelopes and signing keys.
#[derive(Parser, Debug)]
#[command(name = "lxdr", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Network name (public, testnet, futurenet) or passphrase.
    #[arg(long, global = true)]
    network: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert between decimal amounts and stroops.
    Amount(AmountArgs),

    /// Parse and order assets.
    Asset(AssetArgs),

    /// Derive liquidity pool identifiers.
    Pool(PoolArgs),

    /// Build, decode, hash and sign transaction envelopes.
    Tx(TxArgs),

    /// Ed25519 key generation and inspection.
    Keys(KeysArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!("lxdr CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = Settings::load(cli.config.as_deref(), cli.network.as_deref()).and_then(
        |settings| {
            tracing::debug!(network = %settings.network, base_fee = settings.base_fee, "loaded settings");
            match &cli.command {
                Commands::Amount(args) => run_amount(args),
                Commands::Asset(args) => run_asset(args),
                Commands::Pool(args) => run_pool(args),
                Commands::Tx(args) => run_tx(args, &settings),
                Commands::Keys(args) => run_keys(args),
            }
        },
    );

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
