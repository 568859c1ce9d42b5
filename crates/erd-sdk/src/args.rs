//! Smart contract call arguments
//!
//! Call data is `function@arg1@arg2...` with every argument hex-encoded.

use std::fmt;

use erd_primitives::Address;
use num_bigint::{BigInt, Sign};

use crate::SdkError;

/// Custom argument encoding
pub trait ArgSerialize: fmt::Debug + Send + Sync {
    /// Raw bytes of the argument
    fn serialize_arg(&self) -> Result<Vec<u8>, SdkError>;
}

/// A call argument
#[derive(Debug)]
pub enum Argument {
    /// UTF-8 bytes of the string
    Str(String),
    /// Non-negative integer, big-endian
    Int(BigInt),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// `01` or `00`
    Bool(bool),
    /// The 32-byte public key
    Address(Address),
    /// Caller-defined encoding
    Custom(Box<dyn ArgSerialize>),
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::Str(value.to_string())
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Argument::Str(value)
    }
}

impl From<u64> for Argument {
    fn from(value: u64) -> Self {
        Argument::Int(value.into())
    }
}

impl From<i64> for Argument {
    fn from(value: i64) -> Self {
        Argument::Int(value.into())
    }
}

impl From<BigInt> for Argument {
    fn from(value: BigInt) -> Self {
        Argument::Int(value)
    }
}

impl From<Vec<u8>> for Argument {
    fn from(value: Vec<u8>) -> Self {
        Argument::Bytes(value)
    }
}

impl From<bool> for Argument {
    fn from(value: bool) -> Self {
        Argument::Bool(value)
    }
}

impl From<Address> for Argument {
    fn from(value: Address) -> Self {
        Argument::Address(value)
    }
}

/// Bytes of one argument. Negative integers are rejected.
pub fn arg_to_buffer(arg: &Argument) -> Result<Vec<u8>, SdkError> {
    match arg {
        Argument::Str(value) => Ok(value.as_bytes().to_vec()),
        Argument::Int(value) => {
            let (sign, bytes) = value.to_bytes_be();
            if sign == Sign::Minus {
                return Err(SdkError::CannotSerializeArgument(format!("negative integer {}", value)));
            }
            Ok(bytes)
        }
        Argument::Bytes(value) => Ok(value.clone()),
        Argument::Bool(value) => Ok(vec![u8::from(*value)]),
        Argument::Address(address) => Ok(address.pubkey().to_vec()),
        Argument::Custom(custom) => custom.serialize_arg(),
    }
}

/// Hex form of one argument
pub fn arg_to_string(arg: &Argument) -> Result<String, SdkError> {
    Ok(hex::encode(arg_to_buffer(arg)?))
}

/// Call data for `function` with `args`
pub fn args_to_data(function: &str, args: &[Argument]) -> Result<String, SdkError> {
    if function.is_empty() || function.contains('@') {
        return Err(SdkError::BadUsage(format!("invalid function name {:?}", function)));
    }
    let mut parts = Vec::with_capacity(args.len() + 1);
    parts.push(function.to_string());
    for arg in args {
        parts.push(arg_to_string(arg)?);
    }
    Ok(parts.join("@"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th";

    #[derive(Debug)]
    struct Pair(u8, u8);

    impl ArgSerialize for Pair {
        fn serialize_arg(&self) -> Result<Vec<u8>, SdkError> {
            Ok(vec![self.0, self.1])
        }
    }

    #[test]
    fn test_buffers() {
        assert_eq!(arg_to_buffer(&"abc".into()).unwrap(), b"abc");
        assert_eq!(arg_to_buffer(&256u64.into()).unwrap(), vec![1, 0]);
        assert_eq!(arg_to_buffer(&true.into()).unwrap(), vec![1]);
        assert_eq!(arg_to_buffer(&false.into()).unwrap(), vec![0]);
        assert_eq!(arg_to_buffer(&Argument::Custom(Box::new(Pair(4, 2)))).unwrap(), vec![4, 2]);

        let address = Address::from_bech32(ALICE, None).unwrap();
        assert_eq!(arg_to_buffer(&address.clone().into()).unwrap(), address.pubkey().to_vec());
    }

    #[test]
    fn test_zero_is_one_byte() {
        assert_eq!(arg_to_string(&0u64.into()).unwrap(), "00");
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            arg_to_buffer(&(-1i64).into()),
            Err(SdkError::CannotSerializeArgument(_))
        ));
    }

    #[test]
    fn test_call_data() {
        let args = vec![Argument::from("TOKEN-abcdef"), Argument::from(1_000u64), Argument::Bytes(vec![])];
        assert_eq!(
            args_to_data("ESDTTransfer", &args).unwrap(),
            "ESDTTransfer@544f4b454e2d616263646566@03e8@"
        );
        assert_eq!(args_to_data("claim", &[]).unwrap(), "claim");
        assert!(matches!(args_to_data("", &[]), Err(SdkError::BadUsage(_))));
    }
}
