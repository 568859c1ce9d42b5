//! Password-based encryption used by keystore files
//!
//! `key = scrypt(password, salt, n, r, p, dklen = 32)`, then
//! `ciphertext = AES-128-CTR(key[..16], iv, plaintext)` and
//! `mac = HMAC-SHA256(key[16..32], ciphertext)`.
//! Decryption checks the MAC (in constant time) before touching the ciphertext.

use aes::cipher::{KeyIvInit, StreamCipher};
use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use scrypt::{scrypt, Params as ScryptParams};
use sha2::Sha256;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::CryptoError;

type Aes128Ctr = ctr::Ctr128BE<aes::Aes128>;
type HmacSha256 = Hmac<Sha256>;

/// Keystore format version written by [`encrypt`]
pub const KEYSTORE_VERSION: u32 = 4;

/// The only supported cipher
pub const CIPHER: &str = "aes-128-ctr";

/// The only supported key derivation function
pub const KDF: &str = "scrypt";

/// Upper bound on `128 * r * n * p`, the scrypt working set read from keystore files
pub const MAX_SCRYPT_COST: u128 = 256 * 1024 * 1024;

/// scrypt parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// CPU/memory cost, a power of two
    pub n: u32,
    /// Block size
    pub r: u32,
    /// Parallelization
    pub p: u32,
    /// Derived key length
    pub dklen: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            n: 4096,
            r: 8,
            p: 1,
            dklen: 32,
        }
    }
}

/// Per-encryption random inputs
///
/// A fresh value must be used for every encryption.
#[derive(Debug, Clone)]
pub struct Randomness {
    /// scrypt salt
    pub salt: [u8; 32],
    /// AES-CTR initial counter block
    pub iv: [u8; 16],
    /// Envelope id
    pub id: Uuid,
}

impl Randomness {
    /// Draw salt and iv from the OS random source, with a v4 id
    pub fn new() -> Self {
        let mut salt = [0u8; 32];
        let mut iv = [0u8; 16];
        OsRng.fill_bytes(&mut salt);
        OsRng.fill_bytes(&mut iv);
        Self {
            salt,
            iv,
            id: Uuid::new_v4(),
        }
    }
}

impl Default for Randomness {
    fn default() -> Self {
        Self::new()
    }
}

/// Encrypted payload with everything needed to decrypt it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedData {
    /// Envelope id
    pub id: String,
    /// Format version
    pub version: u32,
    /// Cipher name
    pub cipher: String,
    /// Encrypted bytes
    pub ciphertext: Vec<u8>,
    /// Cipher iv
    pub iv: Vec<u8>,
    /// Key derivation function name
    pub kdf: String,
    /// Key derivation parameters
    pub kdfparams: KdfParams,
    /// Key derivation salt
    pub salt: Vec<u8>,
    /// Integrity tag over the ciphertext
    pub mac: Vec<u8>,
}

/// Encrypt `plaintext` under `password`
pub fn encrypt(plaintext: &[u8], password: &str, randomness: &Randomness) -> Result<EncryptedData, CryptoError> {
    let kdfparams = KdfParams::default();
    let key = derive_key(password, &randomness.salt, &kdfparams)?;

    let mut ciphertext = plaintext.to_vec();
    let mut cipher = Aes128Ctr::new_from_slices(&key[..16], &randomness.iv)
        .map_err(|e| CryptoError::InvalidKeystore(format!("cipher init failed: {}", e)))?;
    cipher.apply_keystream(&mut ciphertext);

    let mac = new_mac(&key[16..32])?.chain_update(&ciphertext).finalize().into_bytes().to_vec();

    Ok(EncryptedData {
        id: randomness.id.to_string(),
        version: KEYSTORE_VERSION,
        cipher: CIPHER.to_string(),
        ciphertext,
        iv: randomness.iv.to_vec(),
        kdf: KDF.to_string(),
        kdfparams,
        salt: randomness.salt.to_vec(),
        mac,
    })
}

/// Decrypt `data` with `password`.
///
/// Fails with [`CryptoError::InvalidKeystorePassword`] when the MAC does not
/// match; no plaintext is produced in that case.
pub fn decrypt(data: &EncryptedData, password: &str) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    if data.kdf != KDF {
        return Err(CryptoError::UnknownKeyDerivationFunction(data.kdf.clone()));
    }
    if data.cipher != CIPHER {
        return Err(CryptoError::UnknownCipher(data.cipher.clone()));
    }

    let key = derive_key(password, &data.salt, &data.kdfparams)?;

    let mut mac = new_mac(&key[16..32])?;
    mac.update(&data.ciphertext);
    mac.verify_slice(&data.mac)
        .map_err(|_| CryptoError::InvalidKeystorePassword)?;

    let mut plaintext = Zeroizing::new(data.ciphertext.clone());
    let mut cipher = Aes128Ctr::new_from_slices(&key[..16], &data.iv)
        .map_err(|_| CryptoError::InvalidKeystore(format!("iv must be 16 bytes, got {}", data.iv.len())))?;
    cipher.apply_keystream(&mut plaintext);
    Ok(plaintext)
}

fn derive_key(password: &str, salt: &[u8], params: &KdfParams) -> Result<Zeroizing<[u8; 32]>, CryptoError> {
    if !params.n.is_power_of_two() || params.n < 2 {
        return Err(CryptoError::InvalidKeystore(format!("scrypt n must be a power of two, got {}", params.n)));
    }
    if params.dklen != 32 {
        return Err(CryptoError::InvalidKeystore(format!("scrypt dklen must be 32, got {}", params.dklen)));
    }
    let cost = 128 * u128::from(params.r) * u128::from(params.n) * u128::from(params.p);
    if cost > MAX_SCRYPT_COST {
        return Err(CryptoError::InvalidKeystore(format!(
            "scrypt cost too high: n={} r={} p={}",
            params.n, params.r, params.p
        )));
    }
    let log_n = params.n.trailing_zeros() as u8;
    let scrypt_params = ScryptParams::new(log_n, params.r, params.p, params.dklen as usize)
        .map_err(|e| CryptoError::InvalidKeystore(format!("invalid scrypt params: {}", e)))?;

    let mut key = Zeroizing::new([0u8; 32]);
    scrypt(password.as_bytes(), salt, &scrypt_params, &mut key[..])
        .map_err(|e| CryptoError::InvalidKeystore(format!("scrypt failed: {}", e)))?;
    Ok(key)
}

fn new_mac(key: &[u8]) -> Result<HmacSha256, CryptoError> {
    HmacSha256::new_from_slice(key)
        .map_err(|e| CryptoError::InvalidKeystore(format!("HMAC init failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAINTEXT: &str = "413f42575f7f26fad3317a778771212fdb80245850981e48b58a4f25e344e8f9\
                             0139472eff6886771a982f3083da5d421f24c29181e63888228dc81ca60d69e1";

    fn fixed_randomness() -> Randomness {
        let mut salt = [0u8; 32];
        for (i, b) in salt.iter_mut().enumerate() {
            *b = i as u8;
        }
        Randomness {
            salt,
            iv: [0xaa; 16],
            id: Uuid::nil(),
        }
    }

    // ==================== Known answer ====================

    #[test]
    fn test_encrypt_known_answer() {
        let plaintext = hex::decode(PLAINTEXT).unwrap();
        let data = encrypt(&plaintext, "password", &fixed_randomness()).unwrap();

        assert_eq!(data.version, 4);
        assert_eq!(data.cipher, "aes-128-ctr");
        assert_eq!(data.kdf, "scrypt");
        assert_eq!(data.kdfparams, KdfParams { n: 4096, r: 8, p: 1, dklen: 32 });
        assert_eq!(data.id, "00000000-0000-0000-0000-000000000000");
        assert_eq!(
            hex::encode(&data.ciphertext),
            "117aa4964513b7da0c2efd042c470d90cf27faabd30746448212446b137b8755\
             71d7310a2b06982f76f50292c7c93a96bf6e72cc7cf935e5de4ca8e6767df7ab"
        );
        assert_eq!(
            hex::encode(&data.mac),
            "ba78b9f9e63070df5b8e01b597f61f84e6fff29815dfb994691b24d6efc16ff4"
        );
    }

    // ==================== Round trip ====================

    #[test]
    fn test_decrypt_round_trip() {
        let plaintext = b"moral volcano peasant pass".to_vec();
        let data = encrypt(&plaintext, "secret", &Randomness::new()).unwrap();
        let decrypted = decrypt(&data, "secret").unwrap();
        assert_eq!(decrypted.as_slice(), plaintext.as_slice());
    }

    #[test]
    fn test_fresh_randomness_changes_ciphertext() {
        let a = encrypt(b"same", "pw", &Randomness::new()).unwrap();
        let b = encrypt(b"same", "pw", &Randomness::new()).unwrap();
        assert_ne!(a.ciphertext, b.ciphertext);
        assert_ne!(a.id, b.id);
    }

    // ==================== Failures ====================

    #[test]
    fn test_wrong_password() {
        let data = encrypt(b"payload", "right", &fixed_randomness()).unwrap();
        assert!(matches!(decrypt(&data, "wrong"), Err(CryptoError::InvalidKeystorePassword)));
    }

    #[test]
    fn test_tampered_ciphertext_is_rejected() {
        let mut data = encrypt(b"payload", "pw", &fixed_randomness()).unwrap();
        data.ciphertext[0] ^= 0x01;
        assert!(matches!(decrypt(&data, "pw"), Err(CryptoError::InvalidKeystorePassword)));
    }

    #[test]
    fn test_unknown_kdf_checked_first() {
        let mut data = encrypt(b"payload", "pw", &fixed_randomness()).unwrap();
        data.kdf = "pbkdf2".to_string();
        data.cipher = "aes-256-gcm".to_string();
        assert!(matches!(
            decrypt(&data, "pw"),
            Err(CryptoError::UnknownKeyDerivationFunction(kdf)) if kdf == "pbkdf2"
        ));
    }

    #[test]
    fn test_unknown_cipher() {
        let mut data = encrypt(b"payload", "pw", &fixed_randomness()).unwrap();
        data.cipher = "aes-256-gcm".to_string();
        assert!(matches!(decrypt(&data, "pw"), Err(CryptoError::UnknownCipher(_))));
    }

    #[test]
    fn test_bad_scrypt_params() {
        let mut data = encrypt(b"payload", "pw", &fixed_randomness()).unwrap();
        data.kdfparams.n = 1000;
        assert!(matches!(decrypt(&data, "pw"), Err(CryptoError::InvalidKeystore(_))));
    }

    #[test]
    fn test_scrypt_cost_is_bounded() {
        let data = encrypt(b"payload", "pw", &fixed_randomness()).unwrap();

        let mut huge_n = data.clone();
        huge_n.kdfparams.n = 1 << 26;
        assert!(matches!(decrypt(&huge_n, "pw"), Err(CryptoError::InvalidKeystore(_))));

        let mut huge_r = data.clone();
        huge_r.kdfparams.r = u32::MAX;
        assert!(matches!(decrypt(&huge_r, "pw"), Err(CryptoError::InvalidKeystore(_))));

        let mut huge_p = data.clone();
        huge_p.kdfparams.p = 1 << 20;
        assert!(matches!(decrypt(&huge_p, "pw"), Err(CryptoError::InvalidKeystore(_))));

        let mut all_max = data;
        all_max.kdfparams = KdfParams { n: 1 << 31, r: u32::MAX, p: u32::MAX, dklen: 32 };
        assert!(matches!(decrypt(&all_max, "pw"), Err(CryptoError::InvalidKeystore(_))));
    }
}
