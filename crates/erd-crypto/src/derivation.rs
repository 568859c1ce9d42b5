//! SLIP-0010 ed25519 key derivation
//!
//! Master key: `I = HMAC-SHA512(key = "ed25519 seed", data = seed)`.
//! Each child: `I = HMAC-SHA512(key = chain_code, data = 0x00 || key || be32(index | 0x80000000))`.
//! The left half of `I` is the next key, the right half the next chain code.
//! ed25519 only supports hardened children, so every segment is hardened.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

use crate::CryptoError;

type HmacSha512 = Hmac<Sha512>;

/// Master key seed constant
const MASTER_SECRET: &[u8] = b"ed25519 seed";

/// Offset added to every path segment
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// `m/44'/508'/0'/0'`, completed by the address index
pub const BIP44_PREFIX: [u32; 4] = [44, 508, 0, 0];

/// Derive the 32-byte secret key at `m/44'/508'/0'/0'/{address_index}'`
pub fn derive_secret_key(seed: &[u8], address_index: u32) -> Result<Zeroizing<[u8; 32]>, CryptoError> {
    let mut path = [0u32; 5];
    path[..4].copy_from_slice(&BIP44_PREFIX);
    path[4] = address_index;
    derive_path(seed, &path)
}

/// Derive the secret key for an arbitrary path; segments are hardened here
pub fn derive_path(seed: &[u8], path: &[u32]) -> Result<Zeroizing<[u8; 32]>, CryptoError> {
    let (mut key, mut chain_code) = split(hmac_sha512(MASTER_SECRET, &[seed])?);

    for &segment in path {
        let index = (segment | HARDENED_OFFSET).to_be_bytes();
        let (child_key, child_chain) = split(hmac_sha512(&chain_code, &[&[0x00], &key, &index])?);
        key.zeroize();
        chain_code.zeroize();
        key = child_key;
        chain_code = child_chain;
    }

    chain_code.zeroize();
    Ok(Zeroizing::new(key))
}

fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> Result<Zeroizing<[u8; 64]>, CryptoError> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| CryptoError::DerivationFailed(format!("HMAC init failed: {}", e)))?;
    for part in parts {
        mac.update(part);
    }
    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

fn split(buf: Zeroizing<[u8; 64]>) -> ([u8; 32], [u8; 32]) {
    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&buf[..32]);
    chain_code.copy_from_slice(&buf[32..]);
    (key, chain_code)
}
