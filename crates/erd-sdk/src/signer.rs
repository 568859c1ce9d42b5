//! Transaction and message signers
//!
//! [`UserSigner`] owns an ed25519 secret key and signs the canonical bytes
//! produced by [`TransactionComputer`] and [`MessageComputer`].
//! [`UserVerifier`] checks those signatures against a public key.

use std::fmt;
use std::path::Path;

use erd_crypto::{BlsBackend, Mnemonic, UserPublicKey, UserSecretKey, ValidatorPublicKey, ValidatorSecretKey, SIGNATURE_LEN};
use erd_primitives::{Address, DEFAULT_HRP};
use erd_types::{Message, MessageComputer, Transaction, TransactionComputer};
use tracing::debug;

use crate::{SdkError, UserPem, UserWallet, ValidatorPem};

/// Signs transactions and messages with a user key
///
/// Not `Clone`: the signer owns its secret key.
pub struct UserSigner {
    secret_key: UserSecretKey,
    address: Address,
}

impl UserSigner {
    /// Signer for `secret_key`, with its address under `hrp`
    pub fn new(secret_key: UserSecretKey, hrp: &str) -> Result<Self, SdkError> {
        let address = secret_key.public_key().to_address(hrp)?;
        Ok(Self { secret_key, address })
    }

    /// Signer for a PEM entry; the HRP comes from the bech32 label, or `erd`
    pub fn from_pem(pem: UserPem) -> Result<Self, SdkError> {
        let hrp = pem
            .address()
            .map(|address| address.hrp().to_string())
            .unwrap_or_else(|| DEFAULT_HRP.to_string());
        Self::new(pem.secret_key, &hrp)
    }

    /// Signer for the PEM entry at `index` of `path`
    pub fn from_pem_file(path: impl AsRef<Path>, index: usize) -> Result<Self, SdkError> {
        Self::from_pem(UserPem::from_file(path, index)?)
    }

    /// Signer for the key held by a keystore file
    pub fn from_wallet(
        path: impl AsRef<Path>,
        password: &str,
        address_index: Option<u32>,
        hrp: &str,
    ) -> Result<Self, SdkError> {
        Self::new(UserWallet::load_secret_key(path, password, address_index)?, hrp)
    }

    /// Signer for the key at `address_index` of `mnemonic`
    pub fn from_mnemonic(mnemonic: &Mnemonic, address_index: u32, hrp: &str) -> Result<Self, SdkError> {
        Self::new(mnemonic.derive_key(address_index)?, hrp)
    }

    /// Signer address
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Signer public key
    pub fn public_key(&self) -> UserPublicKey {
        self.secret_key.public_key()
    }

    /// Sign raw bytes
    pub fn sign(&self, data: &[u8]) -> [u8; SIGNATURE_LEN] {
        self.secret_key.sign(data)
    }

    /// Set `tx.signature`
    pub fn sign_transaction(&self, tx: &mut Transaction) -> Result<(), SdkError> {
        let bytes = self.computer().compute_bytes_for_signing(tx)?;
        tx.signature = self.sign(&bytes).to_vec();
        debug!(sender = %tx.sender, nonce = tx.nonce, "Signed transaction");
        Ok(())
    }

    /// Set `tx.guardian_signature`; the transaction must name this signer as guardian
    pub fn sign_transaction_as_guardian(&self, tx: &mut Transaction) -> Result<(), SdkError> {
        let computer = self.computer();
        if !computer.has_options_set_for_guarded_transaction(tx) {
            return Err(SdkError::BadUsage("transaction is not marked as guarded".to_string()));
        }
        if tx.guardian != self.address.to_bech32() {
            return Err(SdkError::BadUsage(format!(
                "transaction guardian {} is not the signer {}",
                tx.guardian, self.address
            )));
        }
        let bytes = computer.compute_bytes_for_signing(tx)?;
        tx.guardian_signature = self.sign(&bytes).to_vec();
        debug!(guardian = %tx.guardian, nonce = tx.nonce, "Co-signed transaction");
        Ok(())
    }

    /// Set `message.signature` and `message.address`
    pub fn sign_message(&self, message: &mut Message) {
        let digest = MessageComputer::new().compute_bytes_for_signing(message);
        message.signature = self.sign(digest.as_bytes()).to_vec();
        message.address = Some(self.address.clone());
        debug!(signer = %self.address, len = message.data.len(), "Signed message");
    }

    fn computer(&self) -> TransactionComputer {
        TransactionComputer::new(self.address.hrp())
    }
}

impl fmt::Debug for UserSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Verifies user signatures
#[derive(Debug, Clone)]
pub struct UserVerifier {
    public_key: UserPublicKey,
    hrp: String,
}

impl UserVerifier {
    /// Verifier for the account behind `address`
    pub fn from_address(address: &Address) -> Self {
        Self {
            public_key: UserPublicKey::from_address(address),
            hrp: address.hrp().to_string(),
        }
    }

    /// Verifier for a bech32 address
    pub fn from_bech32(address: &str) -> Result<Self, SdkError> {
        Ok(Self::from_address(&Address::from_bech32(address, None)?))
    }

    /// Public key in use
    pub fn public_key(&self) -> &UserPublicKey {
        &self.public_key
    }

    /// Check `signature` over raw bytes
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> bool {
        self.public_key.verify(data, signature)
    }

    /// Check `tx.signature`
    pub fn verify_transaction(&self, tx: &Transaction) -> Result<bool, SdkError> {
        let bytes = TransactionComputer::new(&self.hrp).compute_bytes_for_verifying(tx)?;
        Ok(self.verify(&bytes, &tx.signature))
    }

    /// Check `message.signature`
    pub fn verify_message(&self, message: &Message) -> bool {
        let digest = MessageComputer::new().compute_bytes_for_verifying(message);
        self.verify(digest.as_bytes(), &message.signature)
    }
}

/// Signs with a validator BLS key through a [`BlsBackend`]
pub struct ValidatorSigner<B: BlsBackend> {
    backend: B,
    secret_key: ValidatorSecretKey,
}

impl<B: BlsBackend> ValidatorSigner<B> {
    /// Signer for `secret_key`
    pub fn new(backend: B, secret_key: ValidatorSecretKey) -> Self {
        Self { backend, secret_key }
    }

    /// Signer for the validator PEM entry at `index` of `path`
    pub fn from_pem_file(backend: B, path: impl AsRef<Path>, index: usize) -> Result<Self, SdkError> {
        let pem = ValidatorPem::from_file(path, index)?;
        Ok(Self::new(backend, pem.secret_key))
    }

    /// Public key computed by the backend
    pub fn public_key(&self) -> Result<ValidatorPublicKey, SdkError> {
        Ok(self.backend.generate_public_key(&self.secret_key)?)
    }

    /// Sign `data`
    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>, SdkError> {
        Ok(self.backend.sign(data, &self.secret_key)?)
    }

    /// Check `signature` over `data` against this signer's key
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool, SdkError> {
        let public_key = self.public_key()?;
        Ok(self.backend.verify(data, signature, &public_key)?)
    }
}

impl<B: BlsBackend> fmt::Debug for ValidatorSigner<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorSigner").finish_non_exhaustive()
    }
}
