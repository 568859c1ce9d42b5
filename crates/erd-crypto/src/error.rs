//! Cryptographic errors

use erd_primitives::AddressError;
use thiserror::Error;

/// Cryptographic operation error
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Mnemonic has a bad word count, an unknown word or a bad checksum
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// Keystore MAC mismatch
    #[error("invalid keystore password")]
    InvalidKeystorePassword,

    /// Keystore cipher is not supported
    #[error("unknown cipher: {0}")]
    UnknownCipher(String),

    /// Keystore key derivation function is not supported
    #[error("unknown key derivation function: {0}")]
    UnknownKeyDerivationFunction(String),

    /// Keystore fields are malformed
    #[error("invalid keystore: {0}")]
    InvalidKeystore(String),

    /// Public key has the wrong length
    #[error("bad public key length: expected {expected} bytes, got {got}")]
    BadPubkeyLength {
        /// Required length
        expected: usize,
        /// Supplied length
        got: usize,
    },

    /// Secret key has the wrong length
    #[error("bad secret key length: expected {expected} bytes, got {got}")]
    BadSecretKeyLength {
        /// Required length
        expected: usize,
        /// Supplied length
        got: usize,
    },

    /// Public key bytes do not describe a curve point
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Key derivation failed
    #[error("key derivation failed: {0}")]
    DerivationFailed(String),

    /// BLS backend failure
    #[error("bls backend error: {0}")]
    Bls(String),

    /// Address error
    #[error("address error: {0}")]
    Address(#[from] AddressError),
}
