//! Keccak-256 and blake2b-256 hashing

use blake2::digest::consts::U32;
use blake2::Blake2b;
use erd_primitives::H256;
use sha3::{Digest, Keccak256};

type Blake2b256 = Blake2b<U32>;

/// Compute Keccak-256 hash of the input data
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    H256::from_bytes(result.into())
}

/// Compute blake2b hash of the input data with a 32-byte digest
pub fn blake2b256(data: &[u8]) -> H256 {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let result = hasher.finalize();
    H256::from_bytes(result.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Keccak-256 vectors ====================

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            keccak256(&[]).to_hex(),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_hello() {
        assert_eq!(
            keccak256(b"hello").to_hex(),
            "1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_keccak256_32_zero_bytes() {
        assert_eq!(
            keccak256(&[0u8; 32]).to_hex(),
            "290decd9548b62a8d60345a988386fc84ba6bc95484008f6362f93160ef3e563"
        );
    }

    #[test]
    fn test_keccak256_signed_message_digest() {
        // "\x17Elrond Signed Message:\n" || "5" || "hello"
        let mut data = hex::decode("17456c726f6e64205369676e6564204d6573736167653a0a").unwrap();
        data.extend_from_slice(b"5hello");
        assert_eq!(
            keccak256(&data).to_hex(),
            "999194090cc45ebbb30c1d41c27ba10e4d7335d052b17fbc334a2a21736c535a"
        );
    }

    #[test]
    fn test_keccak256_rate_boundary() {
        // 136 bytes is the keccak-256 rate; 137 spans two blocks
        let one_block = keccak256(&[0xab; 136]);
        let two_blocks = keccak256(&[0xab; 137]);
        assert_ne!(one_block, two_blocks);
        assert!(!one_block.is_zero());
    }

    // ==================== Blake2b-256 vectors ====================

    #[test]
    fn test_blake2b256_empty() {
        assert_eq!(
            blake2b256(&[]).to_hex(),
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
    }

    #[test]
    fn test_blake2b256_hello() {
        assert_eq!(
            blake2b256(b"hello").to_hex(),
            "324dcf027dd4a30a932c441f365a25e86b173defa4b8e58948253471b81b72cf"
        );
    }

    // ==================== Determinism ====================

    #[test]
    fn test_hashes_are_deterministic_and_distinct() {
        let data = b"test data for determinism";
        assert_eq!(keccak256(data), keccak256(data));
        assert_eq!(blake2b256(data), blake2b256(data));
        assert_ne!(keccak256(data), blake2b256(data));
        assert_ne!(keccak256(b"input1"), keccak256(b"input2"));
    }
}
