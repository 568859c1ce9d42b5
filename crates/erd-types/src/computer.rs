//! Signing bytes, hashes, fees and option bits of transactions
//!
//! The signing payload is compact JSON with a fixed key order:
//! `nonce, value, receiver, sender, senderUsername?, receiverUsername?,
//! gasPrice, gasLimit, data?, chainID, version?, options?, guardian?`.
//! External signers (hardware wallets included) sign exactly these bytes, so
//! the layout must never drift.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use erd_crypto::{blake2b256, keccak256};
use erd_primitives::{DEFAULT_HRP, H256};
use num_bigint::BigUint;
use serde::Serialize;

use crate::proto::{decode_address, ProtoSerializer};
use crate::{
    NetworkConfig, Transaction, TxError, MIN_TRANSACTION_VERSION_THAT_SUPPORTS_OPTIONS,
    TRANSACTION_OPTIONS_TX_GUARDED, TRANSACTION_OPTIONS_TX_HASH_SIGN,
};

/// Signing JSON projection; serde emits fields in declaration order
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SigningJson<'a> {
    nonce: u64,
    value: String,
    receiver: &'a str,
    sender: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sender_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    receiver_username: Option<String>,
    gas_price: u64,
    gas_limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<String>,
    #[serde(rename = "chainID")]
    chain_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    guardian: Option<&'a str>,
}

impl<'a> SigningJson<'a> {
    fn new(tx: &'a Transaction) -> Self {
        let b64 = |bytes: &[u8]| (!bytes.is_empty()).then(|| STANDARD.encode(bytes));
        Self {
            nonce: tx.nonce,
            value: tx.value.to_string(),
            receiver: &tx.receiver,
            sender: &tx.sender,
            sender_username: b64(tx.sender_username.as_bytes()),
            receiver_username: b64(tx.receiver_username.as_bytes()),
            gas_price: tx.gas_price,
            gas_limit: tx.gas_limit,
            data: b64(&tx.data[..]),
            chain_id: &tx.chain_id,
            version: (tx.version != 0).then_some(tx.version),
            options: (tx.options != 0).then_some(tx.options),
            guardian: (!tx.guardian.is_empty()).then_some(tx.guardian.as_str()),
        }
    }
}

/// Computes the bytes that get signed or hashed for a transaction
#[derive(Debug, Clone)]
pub struct TransactionComputer {
    hrp: String,
    serializer: ProtoSerializer,
}

impl TransactionComputer {
    /// Create a computer that accepts addresses with prefix `hrp`
    pub fn new(hrp: impl Into<String>) -> Self {
        let hrp = hrp.into();
        Self {
            serializer: ProtoSerializer::new(hrp.clone()),
            hrp,
        }
    }

    /// Address prefix in use
    pub fn hrp(&self) -> &str {
        &self.hrp
    }

    /// Bytes the sender signs.
    ///
    /// The canonical JSON, or its keccak-256 when hash signing is enabled
    /// (options bit 0 with version >= 2).
    pub fn compute_bytes_for_signing(&self, tx: &Transaction) -> Result<Vec<u8>, TxError> {
        self.ensure_fields(tx)?;
        let json = serde_json::to_vec(&SigningJson::new(tx))?;
        if tx.version >= MIN_TRANSACTION_VERSION_THAT_SUPPORTS_OPTIONS && self.has_options_set_for_hash_signing(tx) {
            return Ok(keccak256(&json).as_bytes().to_vec());
        }
        Ok(json)
    }

    /// Bytes a verifier checks the sender (or guardian) signature against
    pub fn compute_bytes_for_verifying(&self, tx: &Transaction) -> Result<Vec<u8>, TxError> {
        self.compute_bytes_for_signing(tx)
    }

    /// Transaction hash: blake2b-256 of the protobuf encoding
    pub fn compute_transaction_hash(&self, tx: &Transaction) -> Result<H256, TxError> {
        let encoded = self.serializer.serialize_transaction(tx)?;
        Ok(blake2b256(&encoded))
    }

    /// Fee charged for `tx`.
    ///
    /// Gas up to `min_gas_limit + len(data) * gas_per_data_byte` is paid at the
    /// full gas price, the rest at `floor(gas_price * gas_price_modifier)`.
    pub fn compute_transaction_fee(&self, tx: &Transaction, network: &NetworkConfig) -> Result<BigUint, TxError> {
        let move_balance_gas = network
            .min_gas_limit
            .checked_add((tx.data.len() as u64).saturating_mul(network.gas_per_data_byte))
            .ok_or_else(|| TxError::BadUsage("data too large".to_string()))?;
        if move_balance_gas > tx.gas_limit {
            return Err(TxError::BadUsage(format!(
                "not enough gas: limit {} is below the {} required for {} bytes of data",
                tx.gas_limit,
                move_balance_gas,
                tx.data.len()
            )));
        }

        let fee_for_move = BigUint::from(move_balance_gas) * BigUint::from(tx.gas_price);
        let processing_gas = tx.gas_limit - move_balance_gas;
        if processing_gas == 0 {
            return Ok(fee_for_move);
        }
        let modified_gas_price = (tx.gas_price as f64 * network.gas_price_modifier).floor() as u64;
        Ok(fee_for_move + BigUint::from(processing_gas) * BigUint::from(modified_gas_price))
    }

    /// Mark `tx` as guarded by `guardian`, raising the version to 2 if needed
    pub fn apply_guardian(&self, tx: &mut Transaction, guardian: &str) {
        if tx.version < MIN_TRANSACTION_VERSION_THAT_SUPPORTS_OPTIONS {
            tx.version = MIN_TRANSACTION_VERSION_THAT_SUPPORTS_OPTIONS;
        }
        tx.options |= TRANSACTION_OPTIONS_TX_GUARDED;
        tx.guardian = guardian.to_string();
    }

    /// Enable hash signing on `tx`, raising the version to 2 if needed
    pub fn apply_options_for_hash_signing(&self, tx: &mut Transaction) {
        if tx.version < MIN_TRANSACTION_VERSION_THAT_SUPPORTS_OPTIONS {
            tx.version = MIN_TRANSACTION_VERSION_THAT_SUPPORTS_OPTIONS;
        }
        tx.options |= TRANSACTION_OPTIONS_TX_HASH_SIGN;
    }

    /// Check the guarded option bit
    pub fn has_options_set_for_guarded_transaction(&self, tx: &Transaction) -> bool {
        tx.options & TRANSACTION_OPTIONS_TX_GUARDED == TRANSACTION_OPTIONS_TX_GUARDED
    }

    /// Check the hash signing option bit
    pub fn has_options_set_for_hash_signing(&self, tx: &Transaction) -> bool {
        tx.options & TRANSACTION_OPTIONS_TX_HASH_SIGN == TRANSACTION_OPTIONS_TX_HASH_SIGN
    }

    fn ensure_fields(&self, tx: &Transaction) -> Result<(), TxError> {
        decode_address("sender", &tx.sender, &self.hrp)?;
        decode_address("receiver", &tx.receiver, &self.hrp)?;
        if !tx.guardian.is_empty() {
            decode_address("guardian", &tx.guardian, &self.hrp)?;
        }
        if tx.chain_id.is_empty() {
            return Err(TxError::BadUsage("the chainID field is not set".to_string()));
        }
        if tx.options != 0 && tx.version < MIN_TRANSACTION_VERSION_THAT_SUPPORTS_OPTIONS {
            return Err(TxError::BadUsage(format!(
                "non-empty transaction options require version >= {}",
                MIN_TRANSACTION_VERSION_THAT_SUPPORTS_OPTIONS
            )));
        }
        Ok(())
    }
}

impl Default for TransactionComputer {
    fn default() -> Self {
        Self::new(DEFAULT_HRP)
    }
}
