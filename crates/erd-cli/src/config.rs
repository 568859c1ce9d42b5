//! CLI configuration management

use std::path::{Path, PathBuf};

use erd_primitives::{DEFAULT_HRP, DEFAULT_NUM_SHARDS};
use erd_types::NetworkConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::CliError;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address prefix
    pub hrp: String,
    /// Chain id used for new transactions
    pub chain_id: String,
    /// Number of shards for shard lookups
    pub num_shards: u32,
    /// Gas of a plain value transfer
    pub min_gas_limit: u64,
    /// Extra gas per byte of payload
    pub gas_per_data_byte: u64,
    /// Gas price multiplier for gas above the move-balance cost
    pub gas_price_modifier: f64,
    /// Lowest accepted gas price
    pub min_gas_price: u64,
}

impl Default for Config {
    fn default() -> Self {
        let network = NetworkConfig::default();
        Self {
            hrp: DEFAULT_HRP.to_string(),
            chain_id: network.chain_id,
            num_shards: DEFAULT_NUM_SHARDS,
            min_gas_limit: network.min_gas_limit,
            gas_per_data_byte: network.gas_per_data_byte,
            gas_price_modifier: network.gas_price_modifier,
            min_gas_price: network.min_gas_price,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".erd"))
    }

    /// Get the default config file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from the default location, falling back to the defaults
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable config file");
                Self::default()
            }
        }
    }

    /// Save to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        debug!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Fee parameters
    pub fn network_config(&self) -> NetworkConfig {
        NetworkConfig {
            chain_id: self.chain_id.clone(),
            min_gas_limit: self.min_gas_limit,
            gas_per_data_byte: self.gas_per_data_byte,
            gas_price_modifier: self.gas_price_modifier,
            min_gas_price: self.min_gas_price,
        }
    }
}
