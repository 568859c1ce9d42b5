//! # erd-sdk
//!
//! Key files and signers for the erd SDK.
//!
//! - **PEM**: [`UserPem`] and [`ValidatorPem`] key files
//! - **Keystore**: password-protected [`UserWallet`] files holding a secret key or a mnemonic
//! - **Signers**: [`UserSigner`], [`UserVerifier`] and the BLS-backed [`ValidatorSigner`]
//! - **Arguments**: contract call data built from typed [`Argument`]s
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use erd_sdk::{Transaction, UserSigner, UserVerifier};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let signer = UserSigner::from_pem_file("alice.pem", 0)?;
//!
//!     let mut tx = Transaction::new(
//!         signer.address().to_bech32(),
//!         "erd1spyavw0956vq68xj8y4tenjpq2wd5a9p2c6j8gsz7ztyrnpxrruqzu66jx",
//!         50_000,
//!         "D",
//!     )
//!     .with_nonce(7);
//!     signer.sign_transaction(&mut tx)?;
//!
//!     assert!(UserVerifier::from_address(signer.address()).verify_transaction(&tx)?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod args;
mod error;
pub mod keystore;
pub mod pem;
mod signer;

pub use args::{arg_to_buffer, arg_to_string, args_to_data, ArgSerialize, Argument};
pub use error::SdkError;
pub use keystore::{UserWallet, WalletKind};
pub use pem::{PemEntry, UserPem, ValidatorPem};
pub use signer::{UserSigner, UserVerifier, ValidatorSigner};

// Re-export the lower layers for convenience
pub use erd_crypto::{Mnemonic, UserPublicKey, UserSecretKey, ValidatorPublicKey, ValidatorSecretKey};
pub use erd_primitives::{Address, TokenAmount, H256};
pub use erd_types::{Message, MessageComputer, NetworkConfig, Transaction, TransactionComputer};
