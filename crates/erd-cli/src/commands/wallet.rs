//! Wallet commands
//!
//! Generates mnemonics and writes them out as PEM files, keystores or plain
//! text; derives keys from a mnemonic; converts between key file formats.

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use erd_crypto::WordCount;
use erd_sdk::{Mnemonic, UserPem, UserSecretKey, UserWallet};
use tracing::info;

use super::{require_password, write_or_return, KeySource};
use crate::{config::Config, output::Output, CliError};

/// Output format of `wallet new`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NewFormat {
    /// Mnemonic words
    Raw,
    /// PEM file with the key at `--index`
    Pem,
    /// Keystore holding the key at `--index`
    KeystoreSecret,
    /// Keystore holding the mnemonic
    KeystoreMnemonic,
}

/// Output format of `wallet convert`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConvertFormat {
    /// PEM file
    Pem,
    /// Secret key keystore
    Keystore,
    /// Secret key hex
    Raw,
    /// Bech32 address only
    Address,
}

/// Wallet subcommands
#[derive(Debug, Subcommand)]
pub enum WalletCommand {
    /// Generate a new mnemonic
    New {
        /// Number of mnemonic words
        #[arg(long, default_value = "24")]
        words: usize,
        /// Output format
        #[arg(long, value_enum, default_value = "raw")]
        format: NewFormat,
        /// Address index of the key written for pem and keystore-secret
        #[arg(long, default_value = "0")]
        index: u32,
        /// Output file (printed when absent)
        #[arg(long)]
        outfile: Option<PathBuf>,
        /// Keystore password
        #[arg(long)]
        password: Option<String>,
    },

    /// Derive the key at an address index of a mnemonic
    Derive {
        /// Mnemonic words
        #[arg(long)]
        mnemonic: String,
        /// Address index
        #[arg(long, default_value = "0")]
        index: u32,
        /// Include the secret key in the output
        #[arg(long)]
        show_secret: bool,
    },

    /// Convert a key file to another format
    Convert {
        /// Key to convert
        #[command(flatten)]
        key: KeySource,
        /// Output format
        #[arg(long, value_enum)]
        out_format: ConvertFormat,
        /// Password of the new keystore (defaults to --password)
        #[arg(long)]
        new_password: Option<String>,
        /// Output file (printed when absent)
        #[arg(long)]
        outfile: Option<PathBuf>,
    },
}

impl WalletCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        match self {
            WalletCommand::New {
                words,
                format,
                index,
                outfile,
                password,
            } => new_wallet(config, words, format, index, outfile, password, json),
            WalletCommand::Derive {
                mnemonic,
                index,
                show_secret,
            } => derive(config, &mnemonic, index, show_secret, json),
            WalletCommand::Convert {
                key,
                out_format,
                new_password,
                outfile,
            } => {
                let new_password = new_password.or_else(|| key.password.clone());
                convert(config, key.load()?, out_format, new_password, outfile, json)
            }
        }
    }
}

fn new_wallet(
    config: &Config,
    words: usize,
    format: NewFormat,
    index: u32,
    outfile: Option<PathBuf>,
    password: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let mnemonic = Mnemonic::generate_with(WordCount::try_from(words)?)?;
    let address = mnemonic.derive_key(index)?.public_key().to_address(&config.hrp)?;

    let text = match format {
        NewFormat::Raw => mnemonic.phrase().to_string(),
        NewFormat::Pem => UserPem::new(mnemonic.derive_key(index)?, &config.hrp)?.to_text(),
        NewFormat::KeystoreSecret => {
            let password = require_password(password.as_deref())?;
            UserWallet::from_secret_key(&mnemonic.derive_key(index)?, password, &config.hrp)?.to_json()?
        }
        NewFormat::KeystoreMnemonic => {
            let password = require_password(password.as_deref())?;
            UserWallet::from_mnemonic(mnemonic.phrase(), password)?.to_json()?
        }
    };

    let written = outfile.clone();
    let printed = write_or_return(outfile.as_deref(), text)?;
    if let Some(path) = &written {
        info!(path = %path.display(), format = ?format, "Wrote new wallet");
    }

    let mut output = Output::new(json)
        .field("address", &address.to_bech32())
        .field_u64("words", mnemonic.word_count() as u64);
    if let Some(path) = &written {
        output = output.field("outfile", &path.display().to_string());
    }
    if let Some(text) = &printed {
        output = output.field(if format == NewFormat::Raw { "mnemonic" } else { "content" }, text);
    }

    let message = match (&written, &printed) {
        (Some(path), _) => format!("Address: {}\nSaved to: {}", address, path.display()),
        (None, Some(text)) => format!("{}\n\nAddress: {}", text, address),
        (None, None) => format!("Address: {}", address),
    };
    output.message(&message).print();
    Ok(())
}

fn derive(config: &Config, mnemonic: &str, index: u32, show_secret: bool, json: bool) -> Result<(), CliError> {
    let mnemonic = Mnemonic::from_phrase(mnemonic)?;
    let secret_key = mnemonic.derive_key(index)?;
    let public_key = secret_key.public_key();
    let address = public_key.to_address(&config.hrp)?;

    let mut output = Output::new(json)
        .field_u64("index", index as u64)
        .field("address", &address.to_bech32())
        .field("public_key", &public_key.to_hex());
    let mut message = format!("Address: {}\nPublic key: {}", address, public_key.to_hex());
    if show_secret {
        output = output.field("secret_key", &secret_key.to_hex());
        message.push_str(&format!("\nSecret key: {}", secret_key.to_hex()));
    }
    output.message(&message).print();
    Ok(())
}

fn convert(
    config: &Config,
    secret_key: UserSecretKey,
    out_format: ConvertFormat,
    new_password: Option<String>,
    outfile: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let address = secret_key.public_key().to_address(&config.hrp)?;
    let text = match out_format {
        ConvertFormat::Pem => UserPem::new(secret_key, &config.hrp)?.to_text(),
        ConvertFormat::Keystore => {
            let password = require_password(new_password.as_deref())?;
            UserWallet::from_secret_key(&secret_key, password, &config.hrp)?.to_json()?
        }
        ConvertFormat::Raw => secret_key.to_hex(),
        ConvertFormat::Address => address.to_bech32(),
    };

    match write_or_return(outfile.as_deref(), text)? {
        Some(text) => Output::new(json)
            .field("address", &address.to_bech32())
            .field("content", &text)
            .message(&text)
            .print(),
        None => Output::new(json)
            .field("address", &address.to_bech32())
            .message(&format!("Converted key for {}", address))
            .print(),
    }
    Ok(())
}
