//! # Pool Subcommand
//!
//! Derives constant-product liquidity pool IDs. The two assets may be given
//! in either order.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use lxdr_model::{PoolId, LIQUIDITY_POOL_FEE_V18};

use crate::asset::parse;

/// Arguments for the `lxdr pool` subcommand.
#[derive(Args, Debug)]
pub struct PoolArgs {
    #[command(subcommand)]
    pub command: PoolCommand,
}

/// Pool subcommands.
#[derive(Subcommand, Debug)]
pub enum PoolCommand {
    /// Print the pool ID as hex and as an `L…` StrKey.
    Id {
        first: String,
        second: String,
        /// Pool fee in basis points.
        #[arg(long, default_value_t = LIQUIDITY_POOL_FEE_V18)]
        fee: i32,
    },
}

/// Execute the pool subcommand.
pub fn run_pool(args: &PoolArgs) -> Result<u8> {
    match &args.command {
        PoolCommand::Id { first, second, fee } => {
            let id = pool_id(first, second, *fee)?;
            println!("{}", id.to_hex());
            println!("{}", id.to_strkey());
            Ok(0)
        }
    }
}

fn pool_id(first: &str, second: &str, fee: i32) -> Result<PoolId> {
    PoolId::derive(&parse(first)?, &parse(second)?, fee)
        .with_context(|| format!("failed to derive pool id for {first} / {second}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARST: &str = "ARST:GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR";

    #[test]
    fn pool_id_is_order_independent() {
        let expected = "7670ffdaaf9c61d8d59674f9d133d20d36afbf452788411c4db605bfd9eb8cf3";
        assert_eq!(pool_id("XLM", ARST, 30).unwrap().to_hex(), expected);
        assert_eq!(pool_id(ARST, "XLM", 30).unwrap().to_hex(), expected);
    }

    #[test]
    fn identical_assets_rejected() {
        let err = pool_id(ARST, ARST, 30).unwrap_err();
        assert!(format!("{err:#}").contains("failed to derive pool id"));
    }

    #[test]
    fn run_pool_succeeds() {
        let args = PoolArgs {
            command: PoolCommand::Id {
                first: "XLM".into(),
                second: ARST.into(),
                fee: LIQUIDITY_POOL_FEE_V18,
            },
        };
        assert_eq!(run_pool(&args).unwrap(), 0);
    }
}
