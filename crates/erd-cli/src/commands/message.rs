//! Message commands

use clap::Subcommand;
use erd_sdk::{Message, MessageComputer, UserSigner, UserVerifier};

use super::KeySource;
use crate::{config::Config, output::Output, CliError};

/// Message subcommands
#[derive(Debug, Subcommand)]
pub enum MessageCommand {
    /// Sign a message
    Sign {
        /// Message text
        #[arg(long)]
        message: String,
        /// Signing key
        #[command(flatten)]
        key: KeySource,
    },
    /// Verify a message signature
    Verify {
        /// Message text
        #[arg(long)]
        message: String,
        /// Signature (hex)
        #[arg(long)]
        signature: String,
        /// Signer address (bech32)
        #[arg(long)]
        address: String,
    },
}

impl MessageCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        match self {
            MessageCommand::Sign { message, key } => {
                let signer = UserSigner::new(key.load()?, &config.hrp)?;
                let mut message = Message::new(message.into_bytes());
                signer.sign_message(&mut message);

                let packed = MessageComputer::new().pack_message(&message);
                Output::new(json)
                    .field_value("message", serde_json::to_value(&packed)?)
                    .message(&packed.signature)
                    .print();
            }
            MessageCommand::Verify {
                message,
                signature,
                address,
            } => {
                let signature = signature.strip_prefix("0x").unwrap_or(&signature);
                let signature = hex::decode(signature).map_err(|e| CliError::InvalidHex(e.to_string()))?;
                let verifier = UserVerifier::from_bech32(&address)?;

                let mut message = Message::new(message.into_bytes());
                message.signature = signature;
                let valid = verifier.verify_message(&message);

                Output::new(json)
                    .field_bool("valid", valid)
                    .message(if valid { "Signature is valid" } else { "Signature is invalid" })
                    .print();
                if !valid {
                    return Err(CliError::VerificationFailed);
                }
            }
        }
        Ok(())
    }
}
