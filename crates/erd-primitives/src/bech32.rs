//! Bech32 encoding and decoding
//!
//! Thin layer over the `bech32` crate that pins the classic bech32 checksum
//! constant (bech32m strings are rejected), enforces the 90 character limit
//! and maps failures onto [`Bech32Error`].

use bech32::Variant;
use thiserror::Error;

pub use bech32::u5;

/// Maximum length of a bech32 string, separator and checksum included
pub const MAX_LENGTH: usize = 90;

/// Separator between the human-readable part and the data part
pub const SEPARATOR: char = '1';

/// Bech32 codec error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Bech32Error {
    /// Polymod checksum does not match the bech32 constant
    #[error("invalid checksum")]
    InvalidChecksum,

    /// Character outside the bech32 alphabet, or mixed-case input
    #[error("invalid character: {0}")]
    InvalidCharacter(String),

    /// Too long, too short, or empty human-readable part
    #[error("invalid length")]
    InvalidLength,

    /// No `1` separator in the string
    #[error("missing separator")]
    MissingSeparator,

    /// A 5-bit group holds a value above 31
    #[error("invalid data value: {0}")]
    InvalidData(u8),

    /// Non-zero trailing bits when regrouping without padding
    #[error("invalid padding")]
    InvalidPadding,
}

impl From<bech32::Error> for Bech32Error {
    fn from(e: bech32::Error) -> Self {
        match e {
            bech32::Error::MissingSeparator => Bech32Error::MissingSeparator,
            bech32::Error::InvalidChecksum => Bech32Error::InvalidChecksum,
            bech32::Error::InvalidLength => Bech32Error::InvalidLength,
            bech32::Error::InvalidChar(c) => {
                Bech32Error::InvalidCharacter(format!("'{}' is not in the bech32 alphabet", c))
            }
            bech32::Error::InvalidData(v) => Bech32Error::InvalidData(v),
            bech32::Error::InvalidPadding => Bech32Error::InvalidPadding,
            bech32::Error::MixedCase => Bech32Error::InvalidCharacter("mixed case".to_string()),
        }
    }
}

/// Encode 5-bit groups under the given human-readable prefix
pub fn encode(hrp: &str, data: &[u5]) -> Result<String, Bech32Error> {
    let encoded = bech32::encode(hrp, data, Variant::Bech32)?;
    if encoded.len() > MAX_LENGTH {
        return Err(Bech32Error::InvalidLength);
    }
    Ok(encoded)
}

/// Decode a bech32 string into its (lowercase) prefix and 5-bit groups.
///
/// The returned groups exclude the 6-character checksum.
pub fn decode(value: &str) -> Result<(String, Vec<u5>), Bech32Error> {
    if value.len() > MAX_LENGTH {
        return Err(Bech32Error::InvalidLength);
    }
    let (hrp, data, variant) = bech32::decode(value)?;
    if variant != Variant::Bech32 {
        return Err(Bech32Error::InvalidChecksum);
    }
    Ok((hrp, data))
}

/// Regroup bits, e.g. 8-bit bytes into 5-bit groups.
///
/// With `pad == false` the input must leave no incomplete group and the
/// dropped trailing bits must all be zero.
pub fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, Bech32Error> {
    Ok(bech32::convert_bits(data, from, to, pad)?)
}

/// Encode raw bytes (8-bit) as bech32
pub fn encode_bytes(hrp: &str, bytes: &[u8]) -> Result<String, Bech32Error> {
    let groups = convert_bits(bytes, 8, 5, true)?;
    let data = groups
        .into_iter()
        .map(u5::try_from_u8)
        .collect::<Result<Vec<_>, _>>()?;
    encode(hrp, &data)
}

/// Decode a bech32 string back to raw bytes (8-bit)
pub fn decode_bytes(value: &str) -> Result<(String, Vec<u8>), Bech32Error> {
    let (hrp, data) = decode(value)?;
    let groups: Vec<u8> = data.iter().map(|g| g.to_u8()).collect();
    let bytes = convert_bits(&groups, 5, 8, false)?;
    Ok((hrp, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th";
    const ALICE_HEX: &str = "0139472eff6886771a982f3083da5d421f24c29181e63888228dc81ca60d69e1";

    // ==================== Known vectors ====================

    #[test]
    fn test_encode_bytes_known_address() {
        let bytes = hex::decode(ALICE_HEX).unwrap();
        assert_eq!(encode_bytes("erd", &bytes).unwrap(), ALICE);
    }

    #[test]
    fn test_decode_bytes_known_address() {
        let (hrp, bytes) = decode_bytes(ALICE).unwrap();
        assert_eq!(hrp, "erd");
        assert_eq!(hex::encode(bytes), ALICE_HEX);
    }

    #[test]
    fn test_bip173_valid_strings() {
        for s in [
            "A12UEL5L",
            "a12uel5l",
            "abcdef1qpzry9x8gf2tvdw0s3jn54khce6mua7lmqqqxw",
            "split1checkupstagehandshakeupstreamerranterredcaperred2y9e3w",
        ] {
            assert!(decode(s).is_ok(), "expected {} to decode", s);
        }
    }

    #[test]
    fn test_decode_uppercase_normalizes_hrp() {
        let (hrp, data) = decode("A12UEL5L").unwrap();
        assert_eq!(hrp, "a");
        assert!(data.is_empty());
    }

    // ==================== Failure kinds ====================

    #[test]
    fn test_decode_bad_checksum() {
        let mut tampered = ALICE.to_string();
        tampered.pop();
        tampered.push('q');
        assert_eq!(decode(&tampered), Err(Bech32Error::InvalidChecksum));
    }

    #[test]
    fn test_decode_character_outside_alphabet() {
        // 'b' is not part of the data alphabet
        let bad = "erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6tb";
        assert!(matches!(decode(bad), Err(Bech32Error::InvalidCharacter(_))));
    }

    #[test]
    fn test_decode_mixed_case() {
        let mixed = "erd1Qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th";
        assert!(matches!(decode(mixed), Err(Bech32Error::InvalidCharacter(_))));
    }

    #[test]
    fn test_decode_too_long() {
        let long = format!("erd1{}", "q".repeat(MAX_LENGTH));
        assert_eq!(decode(&long), Err(Bech32Error::InvalidLength));
    }

    #[test]
    fn test_decode_missing_separator() {
        assert_eq!(decode("pzry9x0s0muk"), Err(Bech32Error::MissingSeparator));
    }

    #[test]
    fn test_decode_rejects_bech32m() {
        // Valid bech32m test vector from BIP-350
        assert_eq!(decode("a1lqfn3a"), Err(Bech32Error::InvalidChecksum));
    }

    // ==================== Bit regrouping ====================

    #[test]
    fn test_convert_bits_pads_when_asked() {
        let groups = convert_bits(&[0xff], 8, 5, true).unwrap();
        assert_eq!(groups, vec![31, 28]);
    }

    #[test]
    fn test_convert_bits_rejects_non_zero_padding() {
        // 31, 29 leaves a trailing 1 bit that cannot belong to a byte
        assert_eq!(
            convert_bits(&[31, 29], 5, 8, false),
            Err(Bech32Error::InvalidPadding)
        );
    }

    #[test]
    fn test_convert_bits_round_trip_32_bytes() {
        let bytes = [0xa5u8; 32];
        let groups = convert_bits(&bytes, 8, 5, true).unwrap();
        assert_eq!(groups.len(), 52);
        assert_eq!(convert_bits(&groups, 5, 8, false).unwrap(), bytes.to_vec());
    }
}
