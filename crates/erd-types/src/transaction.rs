//! Transaction type and its node-facing JSON form

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::TxError;

/// Default gas price (atomic units per gas unit)
pub const DEFAULT_GAS_PRICE: u64 = 1_000_000_000;

/// Default transaction version
pub const DEFAULT_TRANSACTION_VERSION: u32 = 2;

/// A transaction as built by callers
///
/// Addresses stay in their bech32 form until encoding; the codec rejects
/// malformed ones with [`TxError::BadAddress`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransactionJson", into = "TransactionJson")]
pub struct Transaction {
    /// Sender account nonce
    pub nonce: u64,
    /// Value in atomic units
    pub value: BigUint,
    /// Receiver (bech32)
    pub receiver: String,
    /// Sender (bech32)
    pub sender: String,
    /// Optional sender username
    pub sender_username: String,
    /// Optional receiver username
    pub receiver_username: String,
    /// Gas price
    pub gas_price: u64,
    /// Gas limit
    pub gas_limit: u64,
    /// Payload
    pub data: Bytes,
    /// Chain id
    pub chain_id: String,
    /// Transaction version
    pub version: u32,
    /// Option bits
    pub options: u32,
    /// Guardian (bech32), empty when unguarded
    pub guardian: String,
    /// Sender signature
    pub signature: Vec<u8>,
    /// Guardian signature
    pub guardian_signature: Vec<u8>,
}

impl Transaction {
    /// Create a transaction with zero nonce and value and the default gas price and version
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>, gas_limit: u64, chain_id: impl Into<String>) -> Self {
        Self {
            nonce: 0,
            value: BigUint::default(),
            receiver: receiver.into(),
            sender: sender.into(),
            sender_username: String::new(),
            receiver_username: String::new(),
            gas_price: DEFAULT_GAS_PRICE,
            gas_limit,
            data: Bytes::new(),
            chain_id: chain_id.into(),
            version: DEFAULT_TRANSACTION_VERSION,
            options: 0,
            guardian: String::new(),
            signature: Vec::new(),
            guardian_signature: Vec::new(),
        }
    }

    /// Set nonce
    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Set value
    pub fn with_value(mut self, value: impl Into<BigUint>) -> Self {
        self.value = value.into();
        self
    }

    /// Set data
    pub fn with_data(mut self, data: impl Into<Bytes>) -> Self {
        self.data = data.into();
        self
    }

    /// Set gas price
    pub fn with_gas_price(mut self, gas_price: u64) -> Self {
        self.gas_price = gas_price;
        self
    }

    /// Set version
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Check if signed by the sender
    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }

    /// JSON object submitted to a node: signing fields plus hex signatures
    pub fn to_send_json(&self) -> Result<serde_json::Value, TxError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Parse the JSON form produced by [`Transaction::to_send_json`]
    pub fn from_json(json: &str) -> Result<Self, TxError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Node-facing JSON shape; empty optional fields are left out
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionJson {
    #[serde(default)]
    nonce: u64,
    #[serde(default)]
    value: String,
    receiver: String,
    sender: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    sender_username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    receiver_username: String,
    gas_price: u64,
    gas_limit: u64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    data: String,
    #[serde(rename = "chainID")]
    chain_id: String,
    #[serde(default)]
    version: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    options: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    guardian: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    signature: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    guardian_signature: String,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl From<Transaction> for TransactionJson {
    fn from(tx: Transaction) -> Self {
        let b64 = |bytes: &[u8]| {
            if bytes.is_empty() {
                String::new()
            } else {
                STANDARD.encode(bytes)
            }
        };
        Self {
            nonce: tx.nonce,
            value: tx.value.to_string(),
            sender_username: b64(tx.sender_username.as_bytes()),
            receiver_username: b64(tx.receiver_username.as_bytes()),
            data: b64(&tx.data[..]),
            receiver: tx.receiver,
            sender: tx.sender,
            gas_price: tx.gas_price,
            gas_limit: tx.gas_limit,
            chain_id: tx.chain_id,
            version: tx.version,
            options: tx.options,
            guardian: tx.guardian,
            signature: hex::encode(&tx.signature),
            guardian_signature: hex::encode(&tx.guardian_signature),
        }
    }
}

impl TryFrom<TransactionJson> for Transaction {
    type Error = TxError;

    fn try_from(json: TransactionJson) -> Result<Self, Self::Error> {
        let value = if json.value.is_empty() {
            BigUint::default()
        } else {
            json.value.parse::<BigUint>().map_err(|e| TxError::InvalidField {
                field: "value",
                reason: e.to_string(),
            })?
        };

        Ok(Self {
            nonce: json.nonce,
            value,
            receiver: json.receiver,
            sender: json.sender,
            sender_username: decode_username("senderUsername", &json.sender_username)?,
            receiver_username: decode_username("receiverUsername", &json.receiver_username)?,
            gas_price: json.gas_price,
            gas_limit: json.gas_limit,
            data: Bytes::from(decode_base64("data", &json.data)?),
            chain_id: json.chain_id,
            version: json.version,
            options: json.options,
            guardian: json.guardian,
            signature: decode_hex("signature", &json.signature)?,
            guardian_signature: decode_hex("guardianSignature", &json.guardian_signature)?,
        })
    }
}

fn decode_base64(field: &'static str, value: &str) -> Result<Vec<u8>, TxError> {
    STANDARD.decode(value).map_err(|e| TxError::InvalidField {
        field,
        reason: e.to_string(),
    })
}

fn decode_username(field: &'static str, value: &str) -> Result<String, TxError> {
    String::from_utf8(decode_base64(field, value)?).map_err(|e| TxError::InvalidField {
        field,
        reason: e.to_string(),
    })
}

fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>, TxError> {
    hex::decode(value).map_err(|e| TxError::InvalidField {
        field,
        reason: e.to_string(),
    })
}
