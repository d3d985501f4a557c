//! # Asset Subcommand
//!
//! Parses canonical asset strings (`XLM` or `CODE:ISSUER`) and compares
//! assets in ledger order.

use std::cmp::Ordering;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::json;

use lxdr_core::XdrEncode;
use lxdr_model::Asset;

/// Arguments for the `lxdr asset` subcommand.
#[derive(Args, Debug)]
pub struct AssetArgs {
    #[command(subcommand)]
    pub command: AssetCommand,
}

/// Asset subcommands.
#[derive(Subcommand, Debug)]
pub enum AssetCommand {
    /// Parse an asset and print its fields and XDR.
    Parse {
        /// `XLM` or `CODE:ISSUER`.
        asset: String,
    },

    /// Print -1, 0 or 1 as the first asset sorts before, equal to or after
    /// the second.
    Compare { first: String, second: String },
}

/// Execute the asset subcommand.
pub fn run_asset(args: &AssetArgs) -> Result<u8> {
    match &args.command {
        AssetCommand::Parse { asset } => {
            let asset = parse(asset)?;
            let description = describe(&asset)?;
            println!("{}", serde_json::to_string_pretty(&description)?);
            Ok(0)
        }
        AssetCommand::Compare { first, second } => {
            let order = compare(&parse(first)?, &parse(second)?);
            println!("{order}");
            Ok(0)
        }
    }
}

pub(crate) fn parse(text: &str) -> Result<Asset> {
    text.parse::<Asset>()
        .with_context(|| format!("failed to parse asset: {text}"))
}

fn describe(asset: &Asset) -> Result<serde_json::Value> {
    Ok(json!({
        "asset": asset.to_string(),
        "type": asset.asset_type().to_string(),
        "code": asset.code(),
        "issuer": asset.issuer().map(|issuer| issuer.to_strkey()),
        "xdr": asset.to_xdr_base64().context("failed to encode asset")?,
    }))
}

fn compare(first: &Asset, second: &Asset) -> i8 {
    match first.compare(second) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUER: &str = "GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR";

    #[test]
    fn describe_credit_asset() {
        let asset = parse(&format!("ARST:{ISSUER}")).unwrap();
        let description = describe(&asset).unwrap();
        assert_eq!(description["type"], "ASSET_TYPE_CREDIT_ALPHANUM4");
        assert_eq!(description["code"], "ARST");
        assert_eq!(description["issuer"], ISSUER);
    }

    #[test]
    fn describe_native_asset() {
        let description = describe(&parse("XLM").unwrap()).unwrap();
        assert_eq!(description["type"], "ASSET_TYPE_NATIVE");
        assert_eq!(description["xdr"], "AAAAAA==");
        assert!(description["issuer"].is_null());
    }

    #[test]
    fn compare_orders_by_type_then_code() {
        let native = parse("XLM").unwrap();
        let arst = parse(&format!("ARST:{ISSUER}")).unwrap();
        let usdcoin = parse(&format!("USDCOIN:{ISSUER}")).unwrap();
        assert_eq!(compare(&native, &arst), -1);
        assert_eq!(compare(&arst, &arst), 0);
        assert_eq!(compare(&usdcoin, &arst), 1);
    }

    #[test]
    fn parse_error_names_input() {
        let err = parse("NOT AN ASSET").unwrap_err();
        assert!(format!("{err:#}").contains("NOT AN ASSET"));
    }
}
