//! Network parameters used for fee computation

use serde::{Deserialize, Serialize};

/// Network parameters supplied by a node or by local configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Chain id
    pub chain_id: String,
    /// Gas of a plain value transfer
    pub min_gas_limit: u64,
    /// Extra gas per byte of payload
    pub gas_per_data_byte: u64,
    /// Multiplier applied to the gas price for gas above the move-balance cost
    pub gas_price_modifier: f64,
    /// Lowest accepted gas price
    pub min_gas_price: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain_id: "D".to_string(),
            min_gas_limit: 50_000,
            gas_per_data_byte: 1_500,
            gas_price_modifier: 0.01,
            min_gas_price: 1_000_000_000,
        }
    }
}
