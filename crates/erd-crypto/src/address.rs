//! Shard and smart contract address computation

use erd_primitives::{shard_of_pubkey, Address, DEFAULT_NUM_SHARDS, SC_ADDRESS_ZERO_PREFIX_LEN};

use crate::{keccak256, CryptoError};

/// VM type marker placed after the zero prefix of contract addresses
const VM_TYPE_WASM: [u8; 2] = [5, 0];

/// Computes shards and contract addresses for a network layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressComputer {
    num_shards: u32,
}

impl AddressComputer {
    /// Create a computer for `num_shards` regular shards
    pub fn new(num_shards: u32) -> Self {
        Self { num_shards }
    }

    /// Number of regular shards
    pub fn num_shards(&self) -> u32 {
        self.num_shards
    }

    /// Shard of the given address, or `METACHAIN_ID`
    pub fn get_shard_of_address(&self, address: &Address) -> u32 {
        shard_of_pubkey(address.pubkey(), self.num_shards)
    }

    /// Address of the contract deployed by `deployer` with account nonce `nonce`.
    ///
    /// `h = keccak256(deployer || le64(nonce))`; the result is
    /// `8 zero bytes || [5, 0] || h[10..30] || deployer[30..32]` under the
    /// deployer's prefix.
    pub fn compute_contract_address(&self, deployer: &Address, nonce: u64) -> Result<Address, CryptoError> {
        let owner = deployer.pubkey();

        let mut to_hash = Vec::with_capacity(40);
        to_hash.extend_from_slice(owner);
        to_hash.extend_from_slice(&nonce.to_le_bytes());
        let hash = keccak256(&to_hash);

        let mut pubkey = [0u8; 32];
        pubkey[SC_ADDRESS_ZERO_PREFIX_LEN..10].copy_from_slice(&VM_TYPE_WASM);
        pubkey[10..30].copy_from_slice(&hash.as_bytes()[10..30]);
        pubkey[30..].copy_from_slice(&owner[30..]);

        Ok(Address::new(&pubkey, deployer.hrp())?)
    }
}

impl Default for AddressComputer {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_SHARDS)
    }
}
