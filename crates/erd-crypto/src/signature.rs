//! ed25519 user keys and signatures

use std::fmt;

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use erd_primitives::Address;
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroize;

use crate::CryptoError;

/// Length of an ed25519 signature in bytes
pub const SIGNATURE_LEN: usize = 64;

/// ed25519 secret key of a user account (32 bytes)
///
/// The key material is wiped on drop and never shown by `Debug`.
/// Not `Clone`: a secret has exactly one owner.
pub struct UserSecretKey {
    inner: SigningKey,
}

impl UserSecretKey {
    /// Size in bytes
    pub const LEN: usize = 32;

    /// Create from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let mut raw: [u8; 32] = bytes.try_into().map_err(|_| CryptoError::BadSecretKeyLength {
            expected: Self::LEN,
            got: bytes.len(),
        })?;
        let inner = SigningKey::from_bytes(&raw);
        raw.zeroize();
        Ok(Self { inner })
    }

    /// Parse from a hex string
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let mut bytes = hex::decode(s.trim())
            .map_err(|e| CryptoError::InvalidKeystore(format!("invalid secret key hex: {}", e)))?;
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    /// Generate a new random key from the OS random source
    pub fn generate() -> Self {
        let mut raw = [0u8; 32];
        OsRng.fill_bytes(&mut raw);
        let inner = SigningKey::from_bytes(&raw);
        raw.zeroize();
        Self { inner }
    }

    /// Raw secret bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.inner.as_bytes()
    }

    /// Hex of the raw secret bytes
    pub fn to_hex(&self) -> String {
        hex::encode(self.inner.as_bytes())
    }

    /// Matching public key
    pub fn public_key(&self) -> UserPublicKey {
        UserPublicKey {
            bytes: self.inner.verifying_key().to_bytes(),
        }
    }

    /// Sign a message, returning the 64-byte signature
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LEN] {
        self.inner.sign(message).to_bytes()
    }
}

impl fmt::Debug for UserSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserSecretKey")
            .field("public_key", &self.public_key().to_hex())
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// ed25519 public key of a user account (32 bytes)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserPublicKey {
    bytes: [u8; 32],
}

impl UserPublicKey {
    /// Size in bytes
    pub const LEN: usize = 32;

    /// Create from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let bytes: [u8; 32] = bytes.try_into().map_err(|_| CryptoError::BadPubkeyLength {
            expected: Self::LEN,
            got: bytes.len(),
        })?;
        Ok(Self { bytes })
    }

    /// Public key of an address
    pub fn from_address(address: &Address) -> Self {
        Self {
            bytes: *address.pubkey(),
        }
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Hex representation
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Address of this key under the given prefix
    pub fn to_address(&self, hrp: &str) -> Result<Address, CryptoError> {
        Ok(Address::new(&self.bytes, hrp)?)
    }

    /// Verify a signature over `message`.
    ///
    /// Returns `false` for malformed signatures and for keys that are not
    /// valid curve points.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(signature) = <[u8; SIGNATURE_LEN]>::try_from(signature) else {
            return false;
        };
        let Ok(key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        key.verify(message, &Signature::from_bytes(&signature)).is_ok()
    }
}

impl fmt::Debug for UserPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserPublicKey({})", self.to_hex())
    }
}

impl fmt::Display for UserPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE_SECRET: &str = "413f42575f7f26fad3317a778771212fdb80245850981e48b58a4f25e344e8f9";
    const ALICE_PUBLIC: &str = "0139472eff6886771a982f3083da5d421f24c29181e63888228dc81ca60d69e1";
    const ALICE_BECH32: &str = "erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th";

    #[test]
    fn test_public_key_from_known_secret() {
        let secret = UserSecretKey::from_hex(ALICE_SECRET).unwrap();
        let public = secret.public_key();
        assert_eq!(public.to_hex(), ALICE_PUBLIC);
        assert_eq!(public.to_address("erd").unwrap().to_bech32(), ALICE_BECH32);
    }

    #[test]
    fn test_sign_and_verify() {
        let secret = UserSecretKey::generate();
        let public = secret.public_key();

        let signature = secret.sign(b"test message");
        assert_eq!(signature.len(), SIGNATURE_LEN);
        assert!(public.verify(b"test message", &signature));
        assert!(!public.verify(b"other message", &signature));
    }

    #[test]
    fn test_signatures_are_deterministic() {
        let secret = UserSecretKey::from_hex(ALICE_SECRET).unwrap();
        assert_eq!(secret.sign(b"payload"), secret.sign(b"payload"));
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        let signer = UserSecretKey::generate();
        let other = UserSecretKey::generate();
        let signature = signer.sign(b"msg");
        assert!(!other.public_key().verify(b"msg", &signature));
    }

    #[test]
    fn test_verify_rejects_malformed_signature() {
        let secret = UserSecretKey::generate();
        let public = secret.public_key();
        let signature = secret.sign(b"msg");
        assert!(!public.verify(b"msg", &signature[..63]));
        assert!(!public.verify(b"msg", &[]));

        let mut tampered = signature;
        tampered[0] ^= 0x01;
        assert!(!public.verify(b"msg", &tampered));
    }

    #[test]
    fn test_bad_key_lengths() {
        assert!(matches!(
            UserSecretKey::from_bytes(&[1u8; 31]),
            Err(CryptoError::BadSecretKeyLength { expected: 32, got: 31 })
        ));
        assert!(matches!(
            UserPublicKey::from_bytes(&[1u8; 33]),
            Err(CryptoError::BadPubkeyLength { expected: 32, got: 33 })
        ));
    }

    #[test]
    fn test_secret_key_debug_is_redacted() {
        let secret = UserSecretKey::from_hex(ALICE_SECRET).unwrap();
        let debug = format!("{:?}", secret);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(ALICE_SECRET));
    }

    #[test]
    fn test_public_key_from_address() {
        let address = Address::from_bech32(ALICE_BECH32, Some("erd")).unwrap();
        assert_eq!(UserPublicKey::from_address(&address).to_hex(), ALICE_PUBLIC);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn signature_verifies_only_its_message(
                seed in proptest::array::uniform32(any::<u8>()),
                message in proptest::collection::vec(any::<u8>(), 0..256),
            ) {
                let secret = UserSecretKey::from_bytes(&seed).unwrap();
                let public = secret.public_key();
                let signature = secret.sign(&message);
                prop_assert!(public.verify(&message, &signature));

                let mut other = message.clone();
                other.push(0x2a);
                prop_assert!(!public.verify(&other, &signature));
            }
        }
    }
}
