//! Amount commands

use clap::Subcommand;
use erd_primitives::{amount_to_atomic, atomic_to_string, BigUint, EGLD_NUM_DECIMALS};

use crate::{output::Output, CliError};

/// Amount subcommands
#[derive(Debug, Subcommand)]
pub enum AmountCommand {
    /// Decimal amount to atomic units (extra fractional digits are truncated)
    ToAtomic {
        /// Decimal amount, e.g. 1.5
        amount: String,
        /// Token decimals
        #[arg(long, default_value_t = EGLD_NUM_DECIMALS)]
        decimals: u32,
    },
    /// Atomic units to a decimal amount
    Format {
        /// Amount in atomic units
        atomic: String,
        /// Token decimals
        #[arg(long, default_value_t = EGLD_NUM_DECIMALS)]
        decimals: u32,
        /// Strip trailing zeros
        #[arg(long)]
        normalize: bool,
    },
}

impl AmountCommand {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        match self {
            AmountCommand::ToAtomic { amount, decimals } => {
                let atomic = amount_to_atomic(&amount, decimals)?.to_string();
                Output::new(json).field("atomic", &atomic).message(&atomic).print();
            }
            AmountCommand::Format {
                atomic,
                decimals,
                normalize,
            } => {
                let value: BigUint = atomic
                    .trim()
                    .parse()
                    .map_err(|_| CliError::InvalidAmount(format!("not an atomic amount: {}", atomic)))?;
                let formatted = atomic_to_string(&value, decimals, normalize);
                Output::new(json).field("amount", &formatted).message(&formatted).print();
            }
        }
        Ok(())
    }
}
