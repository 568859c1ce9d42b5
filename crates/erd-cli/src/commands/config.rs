//! `erd config`

use std::path::Path;

use erd_primitives::Address;

use crate::{config::Config, output::Output, CliError};

/// Show or edit configuration
#[derive(Debug, clap::Args)]
pub struct ConfigArgs {
    /// Show current configuration
    #[arg(long)]
    show: bool,
    /// Set the address prefix
    #[arg(long)]
    set_hrp: Option<String>,
    /// Set the chain id
    #[arg(long)]
    set_chain_id: Option<String>,
    /// Set the number of shards
    #[arg(long)]
    set_num_shards: Option<u32>,
    /// Set the move-balance gas limit
    #[arg(long)]
    set_min_gas_limit: Option<u64>,
    /// Set the gas per payload byte
    #[arg(long)]
    set_gas_per_data_byte: Option<u64>,
    /// Set the gas price modifier
    #[arg(long)]
    set_gas_price_modifier: Option<f64>,
    /// Set the minimum gas price
    #[arg(long)]
    set_min_gas_price: Option<u64>,
}

impl ConfigArgs {
    pub fn execute(self, config: &mut Config, path: &Path, json: bool) -> Result<(), CliError> {
        let mut modified = false;

        if let Some(hrp) = self.set_hrp {
            Address::zero(&hrp)?;
            config.hrp = hrp;
            modified = true;
        }
        if let Some(chain_id) = self.set_chain_id {
            config.chain_id = chain_id;
            modified = true;
        }
        if let Some(num_shards) = self.set_num_shards {
            if num_shards == 0 {
                return Err(CliError::InvalidInput("number of shards must be positive".to_string()));
            }
            config.num_shards = num_shards;
            modified = true;
        }
        if let Some(gas) = self.set_min_gas_limit {
            config.min_gas_limit = gas;
            modified = true;
        }
        if let Some(gas) = self.set_gas_per_data_byte {
            config.gas_per_data_byte = gas;
            modified = true;
        }
        if let Some(modifier) = self.set_gas_price_modifier {
            if !(0.0..=1.0).contains(&modifier) {
                return Err(CliError::InvalidInput("gas price modifier must be within 0..=1".to_string()));
            }
            config.gas_price_modifier = modifier;
            modified = true;
        }
        if let Some(price) = self.set_min_gas_price {
            config.min_gas_price = price;
            modified = true;
        }

        if modified {
            config.save_to(path)?;
            Output::new(json)
                .field("status", "saved")
                .field("path", &path.display().to_string())
                .message("Configuration saved")
                .print();
        } else if self.show {
            Output::new(json)
                .field("hrp", &config.hrp)
                .field("chain_id", &config.chain_id)
                .field_u64("num_shards", config.num_shards as u64)
                .field_u64("min_gas_limit", config.min_gas_limit)
                .field_u64("gas_per_data_byte", config.gas_per_data_byte)
                .field_value("gas_price_modifier", serde_json::json!(config.gas_price_modifier))
                .field_u64("min_gas_price", config.min_gas_price)
                .message(&format!(
                    "HRP: {}\nChain ID: {}\nShards: {}\nMin gas limit: {}\nGas per data byte: {}\nGas price modifier: {}\nMin gas price: {}",
                    config.hrp,
                    config.chain_id,
                    config.num_shards,
                    config.min_gas_limit,
                    config.gas_per_data_byte,
                    config.gas_price_modifier,
                    config.min_gas_price
                ))
                .print();
        } else {
            Output::new(json)
                .message("Use --show to display config, or --set-* options to modify it")
                .print();
        }

        Ok(())
    }
}
