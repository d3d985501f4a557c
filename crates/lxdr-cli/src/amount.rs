//! # Amount Subcommand
//!
//! Converts between decimal amounts and stroops (1 unit = 10^7 stroops).

use anyhow::Result;
use clap::{Args, Subcommand};

use lxdr_core::{descale, is_valid_amount, scale};

/// Arguments for the `lxdr amount` subcommand.
#[derive(Args, Debug)]
pub struct AmountArgs {
    #[command(subcommand)]
    pub command: AmountCommand,
}

/// Amount subcommands.
#[derive(Subcommand, Debug)]
pub enum AmountCommand {
    /// Convert a decimal amount to stroops.
    Descale {
        /// Decimal amount, e.g. "12.5" or "1,000".
        #[arg(allow_negative_numbers = true)]
        amount: String,
    },

    /// Convert stroops to a decimal amount.
    Scale {
        /// Stroop count.
        #[arg(allow_negative_numbers = true)]
        stroops: i64,
        /// Group the integer part with commas.
        #[arg(long)]
        commas: bool,
    },

    /// Check that an amount is a valid, non-negative ledger amount.
    Validate {
        /// Decimal amount.
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// Accept zero.
        #[arg(long)]
        allow_zero: bool,
    },
}

/// Execute the amount subcommand.
pub fn run_amount(args: &AmountArgs) -> Result<u8> {
    match &args.command {
        AmountCommand::Descale { amount } => {
            let stroops = descale(amount)?;
            println!("{stroops}");
            Ok(0)
        }
        AmountCommand::Scale { stroops, commas } => {
            println!("{}", scale(*stroops, *commas));
            Ok(0)
        }
        AmountCommand::Validate { amount, allow_zero } => Ok(cmd_validate(amount, *allow_zero)),
    }
}

fn cmd_validate(amount: &str, allow_zero: bool) -> u8 {
    if is_valid_amount(amount, allow_zero) {
        println!("OK: {amount} is a valid amount");
        0
    } else {
        println!("FAIL: {amount} is not a valid amount");
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(command: AmountCommand) -> Result<u8> {
        run_amount(&AmountArgs { command })
    }

    #[test]
    fn descale_and_scale_succeed() {
        assert_eq!(
            run(AmountCommand::Descale {
                amount: "1,000.5".into()
            })
            .unwrap(),
            0
        );
        assert_eq!(
            run(AmountCommand::Scale {
                stroops: 10_005_000_000,
                commas: true
            })
            .unwrap(),
            0
        );
    }

    #[test]
    fn descale_rejects_excess_precision() {
        let err = run(AmountCommand::Descale {
            amount: "0.12345678".into(),
        })
        .unwrap_err();
        assert!(err.to_string().contains("0.12345678"));
    }

    #[test]
    fn validate_exit_codes() {
        assert_eq!(cmd_validate("10", false), 0);
        assert_eq!(cmd_validate("0", false), 1);
        assert_eq!(cmd_validate("0", true), 0);
        assert_eq!(cmd_validate("-1", true), 1);
    }
}
