//! Transaction and message errors

use thiserror::Error;

/// Transaction or message encoding error
#[derive(Debug, Error)]
pub enum TxError {
    /// Sender, receiver or guardian is not a bech32 address with the configured prefix
    #[error("bad address: {0}")]
    BadAddress(String),

    /// Fields are inconsistent (options without version 2, missing chain id, not enough gas)
    #[error("bad usage: {0}")]
    BadUsage(String),

    /// A JSON field could not be decoded
    #[error("invalid field {field}: {reason}")]
    InvalidField {
        /// Field name
        field: &'static str,
        /// What was wrong
        reason: String,
    },

    /// JSON error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
