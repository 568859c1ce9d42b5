//! Signed messages
//!
//! Signing bytes: `keccak256("\x17Elrond Signed Message:\n" || decimal(len(data)) || data)`.

use erd_crypto::keccak256;
use erd_primitives::{Address, H256};
use serde::{Deserialize, Serialize};

use crate::TxError;

/// Prefix mixed into every signed message
pub const MESSAGE_PREFIX: &[u8] = b"\x17Elrond Signed Message:\n";

/// Current message version
pub const DEFAULT_MESSAGE_VERSION: u32 = 1;

/// Signer name recorded by this SDK
pub const SDK_SIGNER: &str = "erd-sdk-rs";

/// Signer name used when a packed message does not carry one
pub const UNKNOWN_SIGNER: &str = "unknown";

/// A message to sign or verify
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Payload
    pub data: Vec<u8>,
    /// Signature, empty until signed
    pub signature: Vec<u8>,
    /// Signer address, when known
    pub address: Option<Address>,
    /// Message version
    pub version: u32,
    /// Name of the signing software
    pub signer: String,
}

impl Message {
    /// Unsigned message over `data`
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            signature: Vec::new(),
            address: None,
            version: DEFAULT_MESSAGE_VERSION,
            signer: SDK_SIGNER.to_string(),
        }
    }

    /// Set the signer address
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }
}

/// JSON-friendly form of a [`Message`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedMessage {
    /// Hex payload
    pub message: String,
    /// Hex signature
    #[serde(default)]
    pub signature: String,
    /// Signer address (bech32), empty when unknown
    #[serde(default)]
    pub address: String,
    /// Message version
    #[serde(default = "default_version")]
    pub version: u32,
    /// Name of the signing software
    #[serde(default = "unknown_signer")]
    pub signer: String,
}

fn default_version() -> u32 {
    DEFAULT_MESSAGE_VERSION
}

fn unknown_signer() -> String {
    UNKNOWN_SIGNER.to_string()
}

/// Computes message signing bytes and packs messages
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageComputer;

impl MessageComputer {
    /// Create a computer
    pub fn new() -> Self {
        Self
    }

    /// Digest the signer signs
    pub fn compute_bytes_for_signing(&self, message: &Message) -> H256 {
        let size = message.data.len().to_string();
        let mut content = Vec::with_capacity(MESSAGE_PREFIX.len() + size.len() + message.data.len());
        content.extend_from_slice(MESSAGE_PREFIX);
        content.extend_from_slice(size.as_bytes());
        content.extend_from_slice(&message.data);
        keccak256(&content)
    }

    /// Digest a verifier checks the signature against
    pub fn compute_bytes_for_verifying(&self, message: &Message) -> H256 {
        self.compute_bytes_for_signing(message)
    }

    /// JSON-friendly form with hex payload and signature
    pub fn pack_message(&self, message: &Message) -> PackedMessage {
        PackedMessage {
            message: hex::encode(&message.data),
            signature: hex::encode(&message.signature),
            address: message.address.as_ref().map(Address::to_bech32).unwrap_or_default(),
            version: message.version,
            signer: message.signer.clone(),
        }
    }

    /// Inverse of [`MessageComputer::pack_message`]; `0x` prefixes are accepted
    pub fn unpack_message(&self, packed: &PackedMessage) -> Result<Message, TxError> {
        let data = decode_hex("message", &packed.message)?;
        let signature = decode_hex("signature", &packed.signature)?;
        let address = if packed.address.is_empty() {
            None
        } else {
            Some(
                Address::from_bech32(&packed.address, None)
                    .map_err(|e| TxError::BadAddress(e.to_string()))?,
            )
        };
        Ok(Message {
            data,
            signature,
            address,
            version: packed.version,
            signer: packed.signer.clone(),
        })
    }
}

fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>, TxError> {
    let value = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(value).map_err(|e| TxError::InvalidField {
        field,
        reason: e.to_string(),
    })
}
