//! Password-protected keystore files
//!
//! A keystore holds either a secret key (`secretKey`) or a mnemonic
//! (`mnemonic`), encrypted with [`erd_crypto::encrypt`]:
//!
//! ```json
//! {
//!     "version": 4,
//!     "kind": "secretKey",
//!     "id": "...",
//!     "address": "<public key hex>",
//!     "bech32": "erd1...",
//!     "crypto": {
//!         "ciphertext": "...",
//!         "cipherparams": { "iv": "..." },
//!         "cipher": "aes-128-ctr",
//!         "kdf": "scrypt",
//!         "kdfparams": { "dklen": 32, "salt": "...", "n": 4096, "r": 8, "p": 1 },
//!         "mac": "..."
//!     }
//! }
//! ```

use std::path::Path;

use erd_crypto::{decrypt, encrypt, EncryptedData, KdfParams, Mnemonic, Randomness, UserSecretKey};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::SdkError;

/// What a keystore holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WalletKind {
    /// A secret key (optionally followed by its public key)
    SecretKey,
    /// A mnemonic phrase
    Mnemonic,
}

/// A keystore file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserWallet {
    /// Format version
    pub version: u32,
    /// Payload kind; files older than version 4 carry none and hold a secret key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<WalletKind>,
    /// Envelope id
    pub id: String,
    /// Public key hex, secret key files only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Bech32 address, secret key files only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bech32: Option<String>,
    /// Encryption parameters and ciphertext
    pub crypto: KeystoreCrypto,
}

/// `crypto` section of a keystore file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeystoreCrypto {
    /// Ciphertext (hex)
    pub ciphertext: String,
    /// Cipher parameters
    pub cipherparams: CipherParams,
    /// Cipher name
    pub cipher: String,
    /// Key derivation function name
    pub kdf: String,
    /// Key derivation parameters
    pub kdfparams: KeystoreKdfParams,
    /// MAC (hex)
    pub mac: String,
}

/// `cipherparams` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherParams {
    /// Initialization vector (hex)
    pub iv: String,
}

/// `kdfparams` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeystoreKdfParams {
    /// Derived key length
    pub dklen: u32,
    /// Salt (hex)
    pub salt: String,
    /// scrypt N
    pub n: u32,
    /// scrypt r
    pub r: u32,
    /// scrypt p
    pub p: u32,
}

impl UserWallet {
    /// Encrypt a secret key; the plaintext is `secret_key || public_key`
    pub fn from_secret_key(secret_key: &UserSecretKey, password: &str, hrp: &str) -> Result<Self, SdkError> {
        Self::from_secret_key_with_randomness(secret_key, password, hrp, &Randomness::new())
    }

    /// [`UserWallet::from_secret_key`] with caller-supplied salt, iv and id
    pub fn from_secret_key_with_randomness(
        secret_key: &UserSecretKey,
        password: &str,
        hrp: &str,
        randomness: &Randomness,
    ) -> Result<Self, SdkError> {
        let public_key = secret_key.public_key();
        let address = public_key.to_address(hrp)?;

        let mut plaintext = Zeroizing::new(Vec::with_capacity(64));
        plaintext.extend_from_slice(secret_key.as_bytes());
        plaintext.extend_from_slice(public_key.as_bytes());

        let data = encrypt(&plaintext, password, randomness)?;
        debug!(address = %address, "Encrypted secret key keystore");

        Ok(Self {
            version: data.version,
            kind: Some(WalletKind::SecretKey),
            id: data.id.clone(),
            address: Some(public_key.to_hex()),
            bech32: Some(address.to_bech32()),
            crypto: KeystoreCrypto::from(&data),
        })
    }

    /// Encrypt a mnemonic phrase (validated first)
    pub fn from_mnemonic(phrase: &str, password: &str) -> Result<Self, SdkError> {
        Self::from_mnemonic_with_randomness(phrase, password, &Randomness::new())
    }

    /// [`UserWallet::from_mnemonic`] with caller-supplied salt, iv and id
    pub fn from_mnemonic_with_randomness(phrase: &str, password: &str, randomness: &Randomness) -> Result<Self, SdkError> {
        let mnemonic = Mnemonic::from_phrase(phrase)?;
        let data = encrypt(mnemonic.phrase().as_bytes(), password, randomness)?;
        debug!(words = mnemonic.word_count(), "Encrypted mnemonic keystore");

        Ok(Self {
            version: data.version,
            kind: Some(WalletKind::Mnemonic),
            id: data.id.clone(),
            address: None,
            bech32: None,
            crypto: KeystoreCrypto::from(&data),
        })
    }

    /// Payload kind, `secretKey` when the file does not say
    pub fn kind(&self) -> WalletKind {
        self.kind.unwrap_or(WalletKind::SecretKey)
    }

    /// Parse keystore JSON
    pub fn from_json(json: &str) -> Result<Self, SdkError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a keystore file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SdkError> {
        let path = path.as_ref();
        let wallet = Self::from_json(&std::fs::read_to_string(path)?)?;
        debug!(path = %path.display(), kind = ?wallet.kind(), version = wallet.version, "Loaded keystore");
        Ok(wallet)
    }

    /// Keystore JSON indented with 4 spaces
    pub fn to_json(&self) -> Result<String, SdkError> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        String::from_utf8(out).map_err(|e| SdkError::BadUsage(format!("keystore JSON is not UTF-8: {}", e)))
    }

    /// Write the keystore JSON to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SdkError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), kind = ?self.kind(), "Saved keystore");
        Ok(())
    }

    /// Decrypt a `secretKey` keystore
    ///
    /// Payloads shorter than 32 bytes are left-padded with zeros; only the
    /// first 32 bytes are used.
    pub fn decrypt_secret_key(&self, password: &str) -> Result<UserSecretKey, SdkError> {
        if self.kind() != WalletKind::SecretKey {
            return Err(SdkError::BadUsage("keystore does not hold a secret key".to_string()));
        }
        let plaintext = decrypt(&self.crypto.to_encrypted_data(&self.id, self.version)?, password)?;

        let mut buffer = Zeroizing::new(vec![0u8; UserSecretKey::LEN.saturating_sub(plaintext.len())]);
        buffer.extend_from_slice(&plaintext);
        Ok(UserSecretKey::from_bytes(&buffer[..UserSecretKey::LEN])?)
    }

    /// Decrypt a `mnemonic` keystore
    pub fn decrypt_mnemonic(&self, password: &str) -> Result<Mnemonic, SdkError> {
        if self.kind() != WalletKind::Mnemonic {
            return Err(SdkError::BadUsage("keystore does not hold a mnemonic".to_string()));
        }
        let plaintext = decrypt(&self.crypto.to_encrypted_data(&self.id, self.version)?, password)?;
        let phrase = std::str::from_utf8(&plaintext)
            .map_err(|_| SdkError::BadUsage("decrypted mnemonic is not UTF-8".to_string()))?;
        Ok(Mnemonic::from_phrase(phrase)?)
    }

    /// Secret key held by this keystore
    ///
    /// `mnemonic` keystores need `address_index`; `secretKey` keystores must
    /// not be given one.
    pub fn secret_key(&self, password: &str, address_index: Option<u32>) -> Result<UserSecretKey, SdkError> {
        match (self.kind(), address_index) {
            (WalletKind::SecretKey, None) => self.decrypt_secret_key(password),
            (WalletKind::SecretKey, Some(_)) => Err(SdkError::BadUsage(
                "address index must not be given for a secretKey keystore".to_string(),
            )),
            (WalletKind::Mnemonic, Some(index)) => Ok(self.decrypt_mnemonic(password)?.derive_key(index)?),
            (WalletKind::Mnemonic, None) => Err(SdkError::BadUsage(
                "address index is required for a mnemonic keystore".to_string(),
            )),
        }
    }

    /// Load the keystore at `path` and return its secret key
    pub fn load_secret_key(
        path: impl AsRef<Path>,
        password: &str,
        address_index: Option<u32>,
    ) -> Result<UserSecretKey, SdkError> {
        Self::load(path)?.secret_key(password, address_index)
    }
}

impl From<&EncryptedData> for KeystoreCrypto {
    fn from(data: &EncryptedData) -> Self {
        Self {
            ciphertext: hex::encode(&data.ciphertext),
            cipherparams: CipherParams {
                iv: hex::encode(&data.iv),
            },
            cipher: data.cipher.clone(),
            kdf: data.kdf.clone(),
            kdfparams: KeystoreKdfParams {
                dklen: data.kdfparams.dklen,
                salt: hex::encode(&data.salt),
                n: data.kdfparams.n,
                r: data.kdfparams.r,
                p: data.kdfparams.p,
            },
            mac: hex::encode(&data.mac),
        }
    }
}

impl KeystoreCrypto {
    fn to_encrypted_data(&self, id: &str, version: u32) -> Result<EncryptedData, SdkError> {
        Ok(EncryptedData {
            id: id.to_string(),
            version,
            cipher: self.cipher.clone(),
            ciphertext: decode_hex("ciphertext", &self.ciphertext)?,
            iv: decode_hex("iv", &self.cipherparams.iv)?,
            kdf: self.kdf.clone(),
            kdfparams: KdfParams {
                n: self.kdfparams.n,
                r: self.kdfparams.r,
                p: self.kdfparams.p,
                dklen: self.kdfparams.dklen,
            },
            salt: decode_hex("salt", &self.kdfparams.salt)?,
            mac: decode_hex("mac", &self.mac)?,
        })
    }
}

fn decode_hex(field: &str, value: &str) -> Result<Vec<u8>, SdkError> {
    hex::decode(value).map_err(|e| erd_crypto::CryptoError::InvalidKeystore(format!("{}: {}", field, e)).into())
}
