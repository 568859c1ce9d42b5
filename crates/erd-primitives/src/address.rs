//! Account addresses: a 32-byte public key plus a human-readable prefix

use std::fmt;
use thiserror::Error;

use crate::bech32;

/// Default human-readable prefix of the network
pub const DEFAULT_HRP: &str = "erd";

/// Shard id reserved for the metachain
pub const METACHAIN_ID: u32 = u32::MAX;

/// Default number of regular shards
pub const DEFAULT_NUM_SHARDS: u32 = 3;

/// Number of leading zero bytes that mark a smart contract address
pub const SC_ADDRESS_ZERO_PREFIX_LEN: usize = 8;

/// Leading bytes shared by the system smart contracts living on the metachain
const METACHAIN_PREFIX: [u8; 25] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0,
];

/// Address error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Public key is not 32 bytes long
    #[error("bad public key length: expected {expected} bytes, got {got}")]
    BadPublicKeyLength {
        /// Required length
        expected: usize,
        /// Supplied length
        got: usize,
    },

    /// Not a valid bech32 address for the expected prefix
    #[error("bad address: {0}")]
    BadAddress(String),

    /// Human-readable prefix is empty or not printable lowercase ASCII
    #[error("bad human-readable prefix: {0:?}")]
    BadHrp(String),

    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
}

/// Account address
///
/// Two addresses are equal only when both the public key and the prefix match.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Address {
    pubkey: [u8; 32],
    hrp: String,
}

impl Address {
    /// Size of the public key in bytes
    pub const LEN: usize = 32;

    /// Create an address from a public key and a human-readable prefix
    pub fn new(pubkey: &[u8], hrp: &str) -> Result<Self, AddressError> {
        if pubkey.len() != Self::LEN {
            return Err(AddressError::BadPublicKeyLength {
                expected: Self::LEN,
                got: pubkey.len(),
            });
        }
        validate_hrp(hrp)?;
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(pubkey);
        Ok(Address {
            pubkey: bytes,
            hrp: hrp.to_string(),
        })
    }

    /// The all-zero address under the given prefix
    pub fn zero(hrp: &str) -> Result<Self, AddressError> {
        Self::new(&[0u8; 32], hrp)
    }

    /// Parse from a hex-encoded public key (with or without 0x prefix)
    pub fn from_hex(s: &str, hrp: &str) -> Result<Self, AddressError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Self::new(&bytes, hrp)
    }

    /// Decode a bech32 address.
    ///
    /// When `expected_hrp` is given, the decoded prefix must match it.
    pub fn from_bech32(value: &str, expected_hrp: Option<&str>) -> Result<Self, AddressError> {
        let (hrp, bytes) = bech32::decode_bytes(value)
            .map_err(|e| AddressError::BadAddress(format!("{}: {}", value, e)))?;

        if let Some(expected) = expected_hrp {
            if hrp != expected {
                return Err(AddressError::BadAddress(format!(
                    "{}: expected prefix {:?}, got {:?}",
                    value, expected, hrp
                )));
            }
        }

        Self::new(&bytes, &hrp).map_err(|e| AddressError::BadAddress(format!("{}: {}", value, e)))
    }

    /// Bech32 representation
    pub fn to_bech32(&self) -> String {
        // Prefix length and charset are checked on construction.
        bech32::encode_bytes(&self.hrp, &self.pubkey)
            .expect("validated address always encodes as bech32")
    }

    /// Hex representation of the public key (no 0x prefix)
    pub fn to_hex(&self) -> String {
        hex::encode(self.pubkey)
    }

    /// Public key bytes
    pub fn pubkey(&self) -> &[u8; 32] {
        &self.pubkey
    }

    /// Human-readable prefix
    pub fn hrp(&self) -> &str {
        &self.hrp
    }

    /// Check if this is the all-zero address
    pub fn is_zero(&self) -> bool {
        self.pubkey == [0u8; 32]
    }

    /// Smart contract addresses start with 8 zero bytes
    pub fn is_smart_contract(&self) -> bool {
        self.pubkey[..SC_ADDRESS_ZERO_PREFIX_LEN].iter().all(|&b| b == 0)
    }

    /// Shard of this address, with the default number of shards
    pub fn shard(&self) -> u32 {
        shard_of_pubkey(&self.pubkey, DEFAULT_NUM_SHARDS)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_bech32())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_bech32())
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.pubkey
    }
}

/// Longest prefix whose 32-byte address still fits in a bech32 string
const MAX_HRP_LEN: usize = crate::bech32::MAX_LENGTH - 1 - 52 - 6;

fn validate_hrp(hrp: &str) -> Result<(), AddressError> {
    let valid = !hrp.is_empty()
        && hrp.len() <= MAX_HRP_LEN
        && hrp.bytes().all(|b| (33..=126).contains(&b) && !b.is_ascii_uppercase());
    if valid {
        Ok(())
    } else {
        Err(AddressError::BadHrp(hrp.to_string()))
    }
}

/// Compute the shard of a 32-byte public key.
///
/// Metachain system contracts and the zero address map to [`METACHAIN_ID`].
/// Otherwise the last byte is masked with `0b11`; when that exceeds the shard
/// count it is masked again with `0b01`.
pub fn shard_of_pubkey(pubkey: &[u8; 32], num_shards: u32) -> u32 {
    const MASK_HIGH: u8 = 0b11;
    const MASK_LOW: u8 = 0b01;

    if is_pubkey_of_metachain(pubkey) {
        return METACHAIN_ID;
    }

    let last_byte = pubkey[31];
    let mut shard = (last_byte & MASK_HIGH) as u32;
    if shard > num_shards.saturating_sub(1) {
        shard = (last_byte & MASK_LOW) as u32;
    }
    shard
}

fn is_pubkey_of_metachain(pubkey: &[u8; 32]) -> bool {
    pubkey[..METACHAIN_PREFIX.len()] == METACHAIN_PREFIX || pubkey == &[0u8; 32]
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE_BECH32: &str = "erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th";
    const ALICE_HEX: &str = "0139472eff6886771a982f3083da5d421f24c29181e63888228dc81ca60d69e1";
    const BOB_BECH32: &str = "erd1spyavw0956vq68xj8y4tenjpq2wd5a9p2c6j8gsz7ztyrnpxrruqzu66jx";
    const BOB_HEX: &str = "8049d639e5a6980d1cd2392abcce41029cda74a1563523a202f09641cc2618f8";

    fn pubkey_ending_with(last: u8) -> [u8; 32] {
        let mut key = [0x42u8; 32];
        key[31] = last;
        key
    }

    // ==================== Construction ====================

    #[test]
    fn test_address_from_hex_to_bech32() {
        let addr = Address::from_hex(ALICE_HEX, "erd").unwrap();
        assert_eq!(addr.to_bech32(), ALICE_BECH32);
        assert_eq!(addr.to_string(), ALICE_BECH32);
    }

    #[test]
    fn test_address_from_bech32_to_hex() {
        let addr = Address::from_bech32(BOB_BECH32, Some("erd")).unwrap();
        assert_eq!(addr.to_hex(), BOB_HEX);
        assert_eq!(addr.hrp(), "erd");
    }

    #[test]
    fn test_address_from_hex_with_prefix() {
        let a = Address::from_hex(&format!("0x{}", ALICE_HEX), "erd").unwrap();
        let b = Address::from_hex(ALICE_HEX, "erd").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_address_bad_public_key_length() {
        match Address::new(&[0u8; 31], "erd") {
            Err(AddressError::BadPublicKeyLength { expected: 32, got: 31 }) => {}
            other => panic!("Expected BadPublicKeyLength, got {:?}", other),
        }
        assert!(Address::new(&[0u8; 33], "erd").is_err());
        assert!(Address::new(&[], "erd").is_err());
    }

    #[test]
    fn test_address_bad_hrp() {
        assert!(matches!(Address::new(&[0u8; 32], ""), Err(AddressError::BadHrp(_))));
        assert!(matches!(Address::new(&[0u8; 32], "ERD"), Err(AddressError::BadHrp(_))));
        assert!(matches!(Address::new(&[0u8; 32], "e d"), Err(AddressError::BadHrp(_))));

        let longest = "a".repeat(MAX_HRP_LEN);
        assert_eq!(Address::new(&[0u8; 32], &longest).unwrap().to_bech32().len(), 90);
        assert!(matches!(
            Address::new(&[0u8; 32], &"a".repeat(MAX_HRP_LEN + 1)),
            Err(AddressError::BadHrp(_))
        ));
    }

    #[test]
    fn test_address_equality_includes_hrp() {
        let erd = Address::from_hex(ALICE_HEX, "erd").unwrap();
        let test = Address::from_hex(ALICE_HEX, "test").unwrap();
        assert_ne!(erd, test);
        assert_eq!(erd.pubkey(), test.pubkey());
        assert!(test.to_bech32().starts_with("test1"));
    }

    // ==================== Bech32 failures ====================

    #[test]
    fn test_from_bech32_hrp_mismatch() {
        let result = Address::from_bech32(ALICE_BECH32, Some("test"));
        assert!(matches!(result, Err(AddressError::BadAddress(_))));
    }

    #[test]
    fn test_from_bech32_any_hrp() {
        let addr = Address::from_hex(ALICE_HEX, "test").unwrap();
        let decoded = Address::from_bech32(&addr.to_bech32(), None).unwrap();
        assert_eq!(decoded, addr);
    }

    #[test]
    fn test_from_bech32_bad_checksum() {
        let bad = "erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6tq";
        assert!(matches!(Address::from_bech32(bad, None), Err(AddressError::BadAddress(_))));
    }

    #[test]
    fn test_from_bech32_wrong_payload_length() {
        let short = bech32::encode_bytes("erd", &[1u8; 20]).unwrap();
        assert!(matches!(Address::from_bech32(&short, None), Err(AddressError::BadAddress(_))));
    }

    #[test]
    fn test_from_bech32_garbage() {
        assert!(Address::from_bech32("", None).is_err());
        assert!(Address::from_bech32("erd1", None).is_err());
        assert!(Address::from_bech32("not an address", None).is_err());
    }

    // ==================== Smart contracts ====================

    #[test]
    fn test_is_smart_contract() {
        let mut key = [0xabu8; 32];
        key[..10].copy_from_slice(&[0, 0, 0, 0, 0, 0, 0, 0, 5, 0]);
        let sc = Address::new(&key, "erd").unwrap();
        assert!(sc.is_smart_contract());
        assert!(sc.to_bech32().starts_with("erd1qqqqqqqqqqqqqpgq"));

        let user = Address::from_bech32(ALICE_BECH32, None).unwrap();
        assert!(!user.is_smart_contract());
    }

    // ==================== Shards ====================

    #[test]
    fn test_shard_of_known_addresses() {
        let alice = Address::from_bech32(ALICE_BECH32, None).unwrap();
        let bob = Address::from_bech32(BOB_BECH32, None).unwrap();
        // 0xe1 & 0b11 = 1
        assert_eq!(alice.shard(), 1);
        // 0xf8 & 0b11 = 0
        assert_eq!(bob.shard(), 0);
    }

    #[test]
    fn test_shard_remasks_above_shard_count() {
        // 0b11 = 3 is not a valid shard with 3 shards, 0b11 & 0b01 = 1
        assert_eq!(shard_of_pubkey(&pubkey_ending_with(0x03), 3), 1);
        assert_eq!(shard_of_pubkey(&pubkey_ending_with(0x02), 3), 2);
        assert_eq!(shard_of_pubkey(&pubkey_ending_with(0x07), 3), 1);
        assert_eq!(shard_of_pubkey(&pubkey_ending_with(0x04), 3), 0);
    }

    #[test]
    fn test_shard_with_two_shards() {
        assert_eq!(shard_of_pubkey(&pubkey_ending_with(0x02), 2), 0);
        assert_eq!(shard_of_pubkey(&pubkey_ending_with(0x03), 2), 1);
    }

    #[test]
    fn test_shard_zero_address_is_metachain() {
        assert_eq!(shard_of_pubkey(&[0u8; 32], 3), METACHAIN_ID);
    }

    #[test]
    fn test_shard_system_contract_is_metachain() {
        let mut key = [0u8; 32];
        key[17] = 1;
        key[30] = 0xff;
        key[31] = 0xff;
        assert_eq!(shard_of_pubkey(&key, 3), METACHAIN_ID);
    }

    // ==================== Properties ====================

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn bech32_round_trip(key in proptest::array::uniform32(any::<u8>())) {
                let addr = Address::new(&key, DEFAULT_HRP).unwrap();
                let decoded = Address::from_bech32(&addr.to_bech32(), Some(DEFAULT_HRP)).unwrap();
                prop_assert_eq!(decoded, addr);
            }

            #[test]
            fn shard_is_total(key in proptest::array::uniform32(any::<u8>())) {
                let shard = shard_of_pubkey(&key, DEFAULT_NUM_SHARDS);
                prop_assert!(shard < DEFAULT_NUM_SHARDS || shard == METACHAIN_ID);
            }
        }
    }
}
