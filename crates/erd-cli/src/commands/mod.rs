//! Subcommands

pub mod address;
pub mod amount;
pub mod config;
pub mod message;
pub mod tx;
pub mod wallet;

use std::path::{Path, PathBuf};

use erd_sdk::{UserPem, UserSecretKey, UserWallet};

use crate::CliError;

/// Where a signing key comes from
#[derive(Debug, clap::Args)]
pub struct KeySource {
    /// PEM file holding the key
    #[arg(long, conflicts_with = "keystore")]
    pub pem: Option<PathBuf>,

    /// Entry index inside the PEM file
    #[arg(long, default_value = "0")]
    pub pem_index: usize,

    /// Keystore file holding the key
    #[arg(long)]
    pub keystore: Option<PathBuf>,

    /// Keystore password
    #[arg(long)]
    pub password: Option<String>,

    /// Address index, for mnemonic keystores
    #[arg(long)]
    pub address_index: Option<u32>,
}

impl KeySource {
    /// Load the secret key
    pub fn load(&self) -> Result<UserSecretKey, CliError> {
        match (&self.pem, &self.keystore) {
            (Some(pem), None) => Ok(UserPem::from_file(pem, self.pem_index)?.secret_key),
            (None, Some(keystore)) => {
                let password = require_password(self.password.as_deref())?;
                Ok(UserWallet::load_secret_key(keystore, password, self.address_index)?)
            }
            _ => Err(CliError::InvalidInput("exactly one of --pem or --keystore is required".to_string())),
        }
    }
}

pub(crate) fn require_password(password: Option<&str>) -> Result<&str, CliError> {
    password.ok_or_else(|| CliError::InvalidInput("--password is required for keystores".to_string()))
}

/// Write `text` to `outfile`, or return it for printing
pub(crate) fn write_or_return(outfile: Option<&Path>, text: String) -> Result<Option<String>, CliError> {
    match outfile {
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(None)
        }
        None => Ok(Some(text)),
    }
}
