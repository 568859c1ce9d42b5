//! BLS validator keys
//!
//! The pairing library is not part of this crate. Callers hand a
//! [`BlsBackend`] implementation to whatever needs to sign or verify.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::CryptoError;

/// BLS signing and verification over raw key buffers
pub trait BlsBackend: Send + Sync {
    /// Public key of a secret key
    fn generate_public_key(&self, secret_key: &ValidatorSecretKey) -> Result<ValidatorPublicKey, CryptoError>;

    /// Sign `message`
    fn sign(&self, message: &[u8], secret_key: &ValidatorSecretKey) -> Result<Vec<u8>, CryptoError>;

    /// Verify `signature` over `message`
    fn verify(&self, message: &[u8], signature: &[u8], public_key: &ValidatorPublicKey) -> Result<bool, CryptoError>;
}

/// BLS secret key of a validator (32 bytes)
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ValidatorSecretKey {
    bytes: [u8; 32],
}

impl ValidatorSecretKey {
    /// Size in bytes
    pub const LEN: usize = 32;

    /// Create from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let bytes: [u8; 32] = bytes.try_into().map_err(|_| CryptoError::BadSecretKeyLength {
            expected: Self::LEN,
            got: bytes.len(),
        })?;
        Ok(Self { bytes })
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Hex of the raw bytes
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Debug for ValidatorSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValidatorSecretKey([REDACTED])")
    }
}

/// BLS public key of a validator (96 bytes, 192 hex characters)
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ValidatorPublicKey {
    bytes: Vec<u8>,
}

impl ValidatorPublicKey {
    /// Size in bytes
    pub const LEN: usize = 96;

    /// Create from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != Self::LEN {
            return Err(CryptoError::BadPubkeyLength {
                expected: Self::LEN,
                got: bytes.len(),
            });
        }
        Ok(Self { bytes: bytes.to_vec() })
    }

    /// Parse from hex
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s.trim()).map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Hex representation
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl fmt::Debug for ValidatorPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValidatorPublicKey({})", self.to_hex())
    }
}

impl fmt::Display for ValidatorPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
