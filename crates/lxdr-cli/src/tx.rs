//! # Transaction Subcommand
//!
//! Builds, decodes, hashes and signs base64 transaction envelopes. Hashes
//! and signatures are bound to the configured network.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::json;

use lxdr_core::{Amount, XdrDecode, XdrEncode};
use lxdr_model::{Memo, MuxedAccount, Operation, TransactionBuilder, TransactionEnvelope};

use crate::asset::parse;
use crate::config::Settings;
use crate::keys::load_key_pair;

/// Arguments for the `lxdr tx` subcommand.
#[derive(Args, Debug)]
pub struct TxArgs {
    #[command(subcommand)]
    pub command: TxCommand,
}

/// A base64 envelope given inline or as a file.
#[derive(Args, Debug)]
pub struct EnvelopeInput {
    /// Base64 transaction envelope.
    #[arg(value_name = "ENVELOPE")]
    pub envelope: Option<String>,
    /// Read the envelope from a file instead.
    #[arg(long, conflicts_with = "envelope")]
    pub file: Option<PathBuf>,
}

impl EnvelopeInput {
    fn load(&self) -> Result<TransactionEnvelope> {
        let text = crate::read_input(self.envelope.as_deref(), self.file.as_deref())?;
        TransactionEnvelope::from_xdr_base64(&text).context("failed to decode envelope")
    }
}

/// Transaction subcommands.
#[derive(Subcommand, Debug)]
pub enum TxCommand {
    /// Build an unsigned single-payment envelope.
    Payment {
        /// Source account (`G…` or `M…`).
        #[arg(long)]
        source: String,
        /// Destination account (`G…` or `M…`).
        #[arg(long)]
        destination: String,
        /// `XLM` or `CODE:ISSUER`.
        #[arg(long, default_value = "XLM")]
        asset: String,
        /// Decimal amount.
        #[arg(long)]
        amount: String,
        /// Sequence number for the transaction.
        #[arg(long)]
        sequence: i64,
        /// Text memo, at most 28 bytes.
        #[arg(long)]
        memo: Option<String>,
    },

    /// Print an envelope as JSON with its hash.
    Decode(EnvelopeInput),

    /// Print the transaction hash.
    Hash(EnvelopeInput),

    /// Sign an envelope and print the result.
    Sign {
        #[command(flatten)]
        input: EnvelopeInput,
        /// Path to the secret seed file.
        #[arg(long)]
        key: PathBuf,
    },
}

/// Execute the transaction subcommand.
pub fn run_tx(args: &TxArgs, settings: &Settings) -> Result<u8> {
    match &args.command {
        TxCommand::Payment {
            source,
            destination,
            asset,
            amount,
            sequence,
            memo,
        } => {
            let envelope = build_payment(
                settings,
                &PaymentRequest {
                    source,
                    destination,
                    asset,
                    amount,
                    sequence: *sequence,
                    memo: memo.as_deref(),
                },
            )?;
            println!("{}", envelope.to_xdr_base64()?);
            Ok(0)
        }
        TxCommand::Decode(input) => {
            let description = describe(&input.load()?, settings)?;
            println!("{}", serde_json::to_string_pretty(&description)?);
            Ok(0)
        }
        TxCommand::Hash(input) => {
            println!("{}", input.load()?.hash(&settings.network)?);
            Ok(0)
        }
        TxCommand::Sign { input, key } => {
            let signed = sign(&input.load()?, key, settings)?;
            println!("{}", signed.to_xdr_base64()?);
            Ok(0)
        }
    }
}

struct PaymentRequest<'a> {
    source: &'a str,
    destination: &'a str,
    asset: &'a str,
    amount: &'a str,
    sequence: i64,
    memo: Option<&'a str>,
}

fn build_payment(settings: &Settings, request: &PaymentRequest<'_>) -> Result<TransactionEnvelope> {
    let source: MuxedAccount = request
        .source
        .parse()
        .with_context(|| format!("invalid source account: {}", request.source))?;
    let destination: MuxedAccount = request
        .destination
        .parse()
        .with_context(|| format!("invalid destination account: {}", request.destination))?;
    let amount: Amount = request.amount.parse()?;

    let mut builder = TransactionBuilder::new()
        .source_account(source)
        .sequence(request.sequence)
        .base_fee(settings.base_fee)
        .add_operation(Operation::payment(destination, parse(request.asset)?, amount));
    if let Some(text) = request.memo {
        builder = builder.memo(Memo::text(text)?);
    }
    let tx = builder.build().context("failed to build transaction")?;
    Ok(TransactionEnvelope::enclose(tx))
}

fn describe(envelope: &TransactionEnvelope, settings: &Settings) -> Result<serde_json::Value> {
    Ok(json!({
        "network": settings.network.passphrase(),
        "hash": envelope.hash(&settings.network)?.to_hex(),
        "envelope_type": envelope.envelope_type().to_string(),
        "signatures": envelope.signatures().len(),
        "envelope": envelope,
    }))
}

fn sign(
    envelope: &TransactionEnvelope,
    key: &std::path::Path,
    settings: &Settings,
) -> Result<TransactionEnvelope> {
    let key_pair = load_key_pair(key)?;
    let signed = envelope
        .sign(&key_pair, &settings.network)
        .context("failed to sign envelope")?;
    tracing::info!(
        signer = %key_pair.public_key(),
        signatures = signed.signatures().len(),
        "signed envelope"
    );
    Ok(signed)
}
