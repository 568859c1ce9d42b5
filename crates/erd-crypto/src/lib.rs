//! # erd-crypto
//!
//! Cryptographic primitives for the erd SDK.
//!
//! - Keccak-256 and blake2b-256 hashing
//! - ed25519 user keys and signatures
//! - BIP39 mnemonics and SLIP-0010 key derivation
//! - Password-based keystore encryption (scrypt + AES-128-CTR + HMAC-SHA256)
//! - Shard and contract address computation
//! - BLS validator key types and the signing backend contract

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod bls;
pub mod derivation;
pub mod encryptor;
mod error;
mod hash;
pub mod mnemonic;
mod signature;

pub use address::AddressComputer;
pub use bls::{BlsBackend, ValidatorPublicKey, ValidatorSecretKey};
pub use derivation::derive_secret_key;
pub use encryptor::{decrypt, encrypt, EncryptedData, KdfParams, Randomness};
pub use error::CryptoError;
pub use hash::{blake2b256, keccak256};
pub use mnemonic::{Mnemonic, WordCount};
pub use signature::{UserPublicKey, UserSecretKey, SIGNATURE_LEN};
