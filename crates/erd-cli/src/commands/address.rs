//! Address commands

use clap::Subcommand;
use erd_crypto::AddressComputer;
use erd_primitives::{Address, METACHAIN_ID};

use crate::{config::Config, output::Output, CliError};

/// Address subcommands
#[derive(Debug, Subcommand)]
pub enum AddressCommand {
    /// Bech32 form of a hex public key
    Bech32 {
        /// Public key (hex)
        pubkey: String,
    },
    /// Hex public key of a bech32 address
    Hex {
        /// Bech32 address
        address: String,
    },
    /// Shard of an address
    Shard {
        /// Bech32 address
        address: String,
    },
    /// Address of a contract deployed by an account
    Contract {
        /// Deployer address (bech32)
        #[arg(long)]
        deployer: String,
        /// Deployer nonce at deployment
        #[arg(long)]
        nonce: u64,
    },
}

impl AddressCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        match self {
            AddressCommand::Bech32 { pubkey } => {
                let address = Address::from_hex(&pubkey, &config.hrp)?;
                Output::new(json)
                    .field("address", &address.to_bech32())
                    .field("pubkey", &address.to_hex())
                    .message(&address.to_bech32())
                    .print();
            }
            AddressCommand::Hex { address } => {
                let address = Address::from_bech32(&address, None)?;
                Output::new(json)
                    .field("address", &address.to_bech32())
                    .field("pubkey", &address.to_hex())
                    .message(&address.to_hex())
                    .print();
            }
            AddressCommand::Shard { address } => {
                let address = Address::from_bech32(&address, None)?;
                let shard = AddressComputer::new(config.num_shards).get_shard_of_address(&address);
                let label = if shard == METACHAIN_ID {
                    "metachain".to_string()
                } else {
                    shard.to_string()
                };
                Output::new(json)
                    .field("address", &address.to_bech32())
                    .field_u64("shard", shard as u64)
                    .message(&label)
                    .print();
            }
            AddressCommand::Contract { deployer, nonce } => {
                let deployer = Address::from_bech32(&deployer, None)?;
                let contract = AddressComputer::new(config.num_shards).compute_contract_address(&deployer, nonce)?;
                Output::new(json)
                    .field("deployer", &deployer.to_bech32())
                    .field_u64("nonce", nonce)
                    .field("contract", &contract.to_bech32())
                    .message(&contract.to_bech32())
                    .print();
            }
        }
        Ok(())
    }
}
