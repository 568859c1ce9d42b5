//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Debug, Error)]
pub enum SdkError {
    /// Key derivation, keystore or signature error
    #[error(transparent)]
    Crypto(#[from] erd_crypto::CryptoError),

    /// Transaction or message encoding error
    #[error(transparent)]
    Tx(#[from] erd_types::TxError),

    /// Address, amount or bech32 error
    #[error(transparent)]
    Primitive(#[from] erd_primitives::PrimitiveError),

    /// Malformed PEM text
    #[error("bad PEM: {0}")]
    BadPem(String),

    /// Arguments are inconsistent with the key file or each other
    #[error("bad usage: {0}")]
    BadUsage(String),

    /// A call argument has no byte encoding
    #[error("cannot serialize argument: {0}")]
    CannotSerializeArgument(String),

    /// File read or write failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Keystore JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<erd_primitives::AddressError> for SdkError {
    fn from(e: erd_primitives::AddressError) -> Self {
        SdkError::Primitive(e.into())
    }
}
