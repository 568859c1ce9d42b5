//! Transaction commands
//!
//! Transactions are read and written in the JSON form a node accepts.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use erd_sdk::{Transaction, TransactionComputer, UserSigner};
use tracing::info;

use super::{write_or_return, KeySource};
use crate::{config::Config, output::Output, CliError};

/// Transaction subcommands
#[derive(Debug, Subcommand)]
pub enum TxCommand {
    /// Sign a transaction
    Sign {
        /// Transaction JSON file
        #[arg(long)]
        infile: PathBuf,
        /// Signing key
        #[command(flatten)]
        key: KeySource,
        /// Sign the keccak-256 of the signing bytes instead of the bytes
        #[arg(long)]
        hash_signing: bool,
        /// Output file for the signed transaction (printed when absent)
        #[arg(long)]
        outfile: Option<PathBuf>,
    },
    /// Compute the hash of a signed transaction
    Hash {
        /// Signed transaction JSON file
        #[arg(long)]
        infile: PathBuf,
    },
    /// Compute the fee of a transaction with the configured network parameters
    Fee {
        /// Transaction JSON file
        #[arg(long)]
        infile: PathBuf,
    },
}

impl TxCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let computer = TransactionComputer::new(&config.hrp);
        match self {
            TxCommand::Sign {
                infile,
                key,
                hash_signing,
                outfile,
            } => {
                let mut tx = read_transaction(&infile)?;
                if hash_signing {
                    computer.apply_options_for_hash_signing(&mut tx);
                }
                let signer = UserSigner::new(key.load()?, &config.hrp)?;
                signer.sign_transaction(&mut tx)?;
                let hash = computer.compute_transaction_hash(&tx)?;
                info!(sender = %tx.sender, hash = %hash, "Signed transaction");

                let signed = tx.to_send_json()?;
                let printed = write_or_return(outfile.as_deref(), serde_json::to_string_pretty(&signed)?)?;
                let message = match &printed {
                    Some(text) => format!("{}\n\nHash: {}", text, hash),
                    None => format!("Hash: {}", hash),
                };
                Output::new(json)
                    .field_value("transaction", signed)
                    .field("hash", &hash.to_hex())
                    .message(&message)
                    .print();
            }
            TxCommand::Hash { infile } => {
                let tx = read_transaction(&infile)?;
                if !tx.is_signed() {
                    return Err(CliError::InvalidInput("transaction is not signed".to_string()));
                }
                let hash = computer.compute_transaction_hash(&tx)?;
                Output::new(json).field("hash", &hash.to_hex()).message(&hash.to_hex()).print();
            }
            TxCommand::Fee { infile } => {
                let tx = read_transaction(&infile)?;
                let fee = computer.compute_transaction_fee(&tx, &config.network_config())?;
                Output::new(json)
                    .field("fee", &fee.to_string())
                    .message(&fee.to_string())
                    .print();
            }
        }
        Ok(())
    }
}

fn read_transaction(path: &Path) -> Result<Transaction, CliError> {
    Ok(Transaction::from_json(&std::fs::read_to_string(path)?)?)
}
