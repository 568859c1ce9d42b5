//! # erd-types
//!
//! Transactions and messages for the erd SDK, with the byte-exact encodings
//! that get signed and hashed.
//!
//! - [`Transaction`](transaction::Transaction) - logical transaction and its JSON form
//! - [`TransactionComputer`](computer::TransactionComputer) - signing bytes, hash, fee, options
//! - [`ProtoSerializer`](proto::ProtoSerializer) - protobuf wire layout used for hashing
//! - [`MessageComputer`](message::MessageComputer) - signed message bytes and packing

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod computer;
mod error;
pub mod message;
pub mod network;
pub mod proto;
pub mod transaction;

pub use computer::TransactionComputer;
pub use error::TxError;
pub use message::{Message, MessageComputer, PackedMessage};
pub use network::NetworkConfig;
pub use proto::ProtoSerializer;
pub use transaction::Transaction;

/// Lowest transaction version that accepts `options`
pub const MIN_TRANSACTION_VERSION_THAT_SUPPORTS_OPTIONS: u32 = 2;

/// Options bit: sign the keccak-256 of the canonical JSON instead of the JSON
pub const TRANSACTION_OPTIONS_TX_HASH_SIGN: u32 = 0b0001;

/// Options bit: the transaction is co-signed by a guardian
pub const TRANSACTION_OPTIONS_TX_GUARDED: u32 = 0b0010;
