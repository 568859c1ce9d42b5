//! # erd-primitives
//!
//! Primitive types for the erd SDK.
//!
//! - Bech32 encoding/decoding
//! - Addresses (32-byte public key + human-readable prefix), shard computation
//! - Token amounts in atomic units
//! - 32-byte digests

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod amount;
pub mod bech32;
mod error;
mod hash;

pub use address::{
    shard_of_pubkey, Address, AddressError, DEFAULT_HRP, DEFAULT_NUM_SHARDS, METACHAIN_ID,
    SC_ADDRESS_ZERO_PREFIX_LEN,
};
pub use amount::{amount_to_atomic, atomic_to_string, AmountError, TokenAmount, EGLD_NUM_DECIMALS};
pub use bech32::Bech32Error;
pub use error::PrimitiveError;
pub use hash::{HashError, H256};

// Re-export for callers handling atomic amounts
pub use num_bigint::BigUint;
