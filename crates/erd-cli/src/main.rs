//! # erd-cli
//!
//! Command-line interface for erd keys, addresses and transactions.
//!
//! ## Usage
//!
//! ```bash
//! # Wallets
//! erd wallet new --format pem --outfile alice.pem
//! erd wallet derive --mnemonic "moral volcano ..." --index 1
//! erd wallet convert --keystore alice.json --password ... --out-format pem
//!
//! # Addresses
//! erd address bech32 0139472eff6886771a982f3083da5d421f24c29181e63888228dc81ca60d69e1
//! erd address shard erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th
//! erd address contract --deployer erd1... --nonce 0
//!
//! # Transactions and messages
//! erd tx sign --infile tx.json --pem alice.pem --outfile signed.json
//! erd tx hash --infile signed.json
//! erd message sign --message hello --pem alice.pem
//!
//! # Amounts
//! erd amount to-atomic 1.5
//! erd amount format 1500000000000000000 --normalize
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod error;
mod output;

use config::Config;
use error::CliError;

/// erd command-line tool
#[derive(Parser, Debug)]
#[command(name = "erd")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Configuration file (default: ~/.erd/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Address prefix, overriding the configuration
    #[arg(long, global = true)]
    hrp: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Create, derive and convert wallets
    #[command(subcommand)]
    Wallet(commands::wallet::WalletCommand),
    /// Address conversions and derivations
    #[command(subcommand)]
    Address(commands::address::AddressCommand),
    /// Sign, hash and price transactions
    #[command(subcommand)]
    Tx(commands::tx::TxCommand),
    /// Sign and verify messages
    #[command(subcommand)]
    Message(commands::message::MessageCommand),
    /// Convert token amounts
    #[command(subcommand)]
    Amount(commands::amount::AmountCommand),
    /// Show or edit configuration
    Config(commands::config::ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    let json = cli.json;
    if let Err(e) = run(cli) {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "error": format!("{:#}", e),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = match cli.config {
        Some(path) => Some(path),
        None => Config::default_path(),
    };
    let mut config = match &config_path {
        Some(path) => Config::load_from(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::load(),
    };
    if let Some(hrp) = cli.hrp {
        config.hrp = hrp;
    }

    let json = cli.json;
    match cli.command {
        Commands::Wallet(cmd) => cmd.execute(&config, json)?,
        Commands::Address(cmd) => cmd.execute(&config, json)?,
        Commands::Tx(cmd) => cmd.execute(&config, json)?,
        Commands::Message(cmd) => cmd.execute(&config, json)?,
        Commands::Amount(cmd) => cmd.execute(json)?,
        Commands::Config(args) => {
            let path = config_path.context("cannot determine the config file location")?;
            args.execute(&mut config, &path, json)?
        }
    }
    Ok(())
}
