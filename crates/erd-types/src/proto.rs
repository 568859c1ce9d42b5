//! Protobuf wire encoding of transactions
//!
//! Field numbers follow the node's `Transaction` message:
//!
//! | # | field           | wire type |
//! |---|-----------------|-----------|
//! | 1 | Nonce           | varint    |
//! | 2 | Value           | bytes     |
//! | 3 | RcvAddr         | bytes     |
//! | 4 | RcvUserName     | bytes     |
//! | 5 | SndAddr         | bytes     |
//! | 6 | SndUserName     | bytes     |
//! | 7 | GasPrice        | varint    |
//! | 8 | GasLimit        | varint    |
//! | 9 | Data            | bytes     |
//! | 10| ChainID         | bytes     |
//! | 11| Version         | varint    |
//! | 12| Signature       | bytes     |
//! | 13| Options         | varint    |
//! | 14| GuardianAddr    | bytes     |
//! | 15| GuardianSignature | bytes   |
//!
//! Zero varints and empty byte fields are omitted, as proto3 does.

use bytes::{BufMut, BytesMut};
use erd_primitives::Address;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::{Transaction, TxError};

const WIRE_VARINT: u8 = 0;
const WIRE_LEN: u8 = 2;

/// Serializes transactions to the node's protobuf layout
#[derive(Debug, Clone)]
pub struct ProtoSerializer {
    hrp: String,
}

impl ProtoSerializer {
    /// Create a serializer that accepts addresses with prefix `hrp`
    pub fn new(hrp: impl Into<String>) -> Self {
        Self { hrp: hrp.into() }
    }

    /// Encode a transaction, signatures included
    pub fn serialize_transaction(&self, tx: &Transaction) -> Result<Vec<u8>, TxError> {
        let receiver = decode_address("receiver", &tx.receiver, &self.hrp)?;
        let sender = decode_address("sender", &tx.sender, &self.hrp)?;

        let mut buf = BytesMut::with_capacity(256);
        put_varint_field(&mut buf, 1, tx.nonce);
        put_bytes_field(&mut buf, 2, &serialize_value(&tx.value));
        put_bytes_field(&mut buf, 3, receiver.pubkey());
        put_bytes_field(&mut buf, 4, tx.receiver_username.as_bytes());
        put_bytes_field(&mut buf, 5, sender.pubkey());
        put_bytes_field(&mut buf, 6, tx.sender_username.as_bytes());
        put_varint_field(&mut buf, 7, tx.gas_price);
        put_varint_field(&mut buf, 8, tx.gas_limit);
        put_bytes_field(&mut buf, 9, &tx.data);
        put_bytes_field(&mut buf, 10, tx.chain_id.as_bytes());
        put_varint_field(&mut buf, 11, tx.version as u64);
        put_bytes_field(&mut buf, 12, &tx.signature);
        put_varint_field(&mut buf, 13, tx.options as u64);

        if !tx.guardian.is_empty() {
            let guardian = decode_address("guardian", &tx.guardian, &self.hrp)?;
            put_bytes_field(&mut buf, 14, guardian.pubkey());
            put_bytes_field(&mut buf, 15, &tx.guardian_signature);
        }

        Ok(buf.to_vec())
    }
}

/// Sign-prefixed big-endian magnitude: `[0, 0]` for zero, else `0x00 || magnitude`
pub fn serialize_value(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        return vec![0, 0];
    }
    let mut out = vec![0u8];
    out.extend_from_slice(&value.to_bytes_be());
    out
}

pub(crate) fn decode_address(field: &str, value: &str, hrp: &str) -> Result<Address, TxError> {
    Address::from_bech32(value, Some(hrp)).map_err(|e| TxError::BadAddress(format!("{}: {}", field, e)))
}

fn put_varint(buf: &mut BytesMut, mut value: u64) {
    while value >= 0x80 {
        buf.put_u8((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

fn put_tag(buf: &mut BytesMut, field: u32, wire_type: u8) {
    put_varint(buf, ((field as u64) << 3) | wire_type as u64);
}

fn put_varint_field(buf: &mut BytesMut, field: u32, value: u64) {
    if value == 0 {
        return;
    }
    put_tag(buf, field, WIRE_VARINT);
    put_varint(buf, value);
}

fn put_bytes_field(buf: &mut BytesMut, field: u32, value: &[u8]) {
    if value.is_empty() {
        return;
    }
    put_tag(buf, field, WIRE_LEN);
    put_varint(buf, value.len() as u64);
    buf.put_slice(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th";
    const BOB: &str = "erd1spyavw0956vq68xj8y4tenjpq2wd5a9p2c6j8gsz7ztyrnpxrruqzu66jx";

    fn varint(value: u64) -> Vec<u8> {
        let mut buf = BytesMut::new();
        put_varint(&mut buf, value);
        buf.to_vec()
    }

    // ==================== Varints ====================

    #[test]
    fn test_varint_encoding() {
        assert_eq!(varint(0), vec![0x00]);
        assert_eq!(varint(1), vec![0x01]);
        assert_eq!(varint(127), vec![0x7f]);
        assert_eq!(varint(128), vec![0x80, 0x01]);
        assert_eq!(varint(300), vec![0xac, 0x02]);
        assert_eq!(varint(1_000_000_000), vec![0x80, 0x94, 0xeb, 0xdc, 0x03]);
        assert_eq!(varint(u64::MAX).len(), 10);
    }

    // ==================== Values ====================

    #[test]
    fn test_serialize_value() {
        assert_eq!(serialize_value(&BigUint::zero()), vec![0, 0]);
        assert_eq!(serialize_value(&BigUint::from(1u32)), vec![0, 1]);
        assert_eq!(serialize_value(&BigUint::from(256u32)), vec![0, 1, 0]);
        assert_eq!(
            serialize_value(&BigUint::from(1_000_000_000_000_000_000u64)),
            vec![0x00, 0x0d, 0xe0, 0xb6, 0xb3, 0xa7, 0x64, 0x00, 0x00]
        );
    }

    // ==================== Transactions ====================

    #[test]
    fn test_serialize_known_transaction() {
        let mut tx = Transaction::new(ALICE, BOB, 50_000, "D").with_nonce(89).with_version(1);
        tx.signature = hex::decode(
            "59b7198695c5dcfbc9ee89d22c79c8ea880ceb9c93332fd27790f2c8cde7bfe2\
             8f14a5d117c1b8179cc6fed7431b59aecd8461a874b2c25100b536cc2927330b",
        )
        .unwrap();

        let encoded = ProtoSerializer::new("erd").serialize_transaction(&tx).unwrap();
        assert_eq!(
            hex::encode(encoded),
            "0859120200001a208049d639e5a6980d1cd2392abcce41029cda74a1563523a202f09641cc2618f8\
             2a200139472eff6886771a982f3083da5d421f24c29181e63888228dc81ca60d69e1\
             388094ebdc0340d086035201445801\
             624059b7198695c5dcfbc9ee89d22c79c8ea880ceb9c93332fd27790f2c8cde7bfe2\
             8f14a5d117c1b8179cc6fed7431b59aecd8461a874b2c25100b536cc2927330b"
        );
    }

    #[test]
    fn test_defaults_are_omitted() {
        let mut tx = Transaction::new(ALICE, BOB, 0, "D").with_version(0).with_gas_price(0);
        tx.nonce = 0;
        let encoded = ProtoSerializer::new("erd").serialize_transaction(&tx).unwrap();
        // value, receiver, sender and chain id only
        assert_eq!(encoded.len(), (2 + 2) + (2 + 32) + (2 + 32) + (2 + 1));
        assert_eq!(encoded[0], 0x12);
    }

    #[test]
    fn test_guardian_fields() {
        let mut tx = Transaction::new(ALICE, BOB, 50_000, "D");
        tx.options = 2;
        tx.guardian = BOB.to_string();
        tx.guardian_signature = vec![0xee; 64];
        let encoded = ProtoSerializer::new("erd").serialize_transaction(&tx).unwrap();

        let guardian_pubkey = Address::from_bech32(BOB, None).unwrap();
        let mut tail = vec![0x72, 0x20];
        tail.extend_from_slice(guardian_pubkey.pubkey());
        tail.extend_from_slice(&[0x7a, 0x40]);
        tail.extend_from_slice(&[0xee; 64]);
        assert!(encoded.ends_with(&tail));
    }

    #[test]
    fn test_bad_addresses() {
        let serializer = ProtoSerializer::new("erd");

        let tx = Transaction::new("erd1invalid", BOB, 50_000, "D");
        assert!(matches!(serializer.serialize_transaction(&tx), Err(TxError::BadAddress(_))));

        let tx = Transaction::new(ALICE, BOB, 50_000, "D");
        assert!(matches!(
            ProtoSerializer::new("test").serialize_transaction(&tx),
            Err(TxError::BadAddress(_))
        ));
    }
}
