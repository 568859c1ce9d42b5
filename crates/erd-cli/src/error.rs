//! CLI error types

use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Invalid amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Signature does not match
    #[error("Signature verification failed")]
    VerificationFailed,

    /// SDK error
    #[error("{0}")]
    Sdk(#[from] erd_sdk::SdkError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config error
    #[error("Config error: {0}")]
    Config(String),
}

impl From<erd_crypto::CryptoError> for CliError {
    fn from(e: erd_crypto::CryptoError) -> Self {
        CliError::Sdk(e.into())
    }
}

impl From<erd_types::TxError> for CliError {
    fn from(e: erd_types::TxError) -> Self {
        CliError::Sdk(e.into())
    }
}

impl From<erd_primitives::AddressError> for CliError {
    fn from(e: erd_primitives::AddressError) -> Self {
        CliError::InvalidAddress(e.to_string())
    }
}

impl From<erd_primitives::AmountError> for CliError {
    fn from(e: erd_primitives::AmountError) -> Self {
        CliError::InvalidAmount(e.to_string())
    }
}
