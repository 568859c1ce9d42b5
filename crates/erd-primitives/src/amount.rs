//! Token amounts: decimal user input <-> atomic integer units
//!
//! Conversion is exact string arithmetic over unbounded integers, so there is
//! no precision ceiling even for very large supplies. Fractional digits beyond
//! `num_decimals` are truncated (never rounded up).

use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use thiserror::Error;

/// Number of decimals of the native token
pub const EGLD_NUM_DECIMALS: u32 = 18;

/// Largest accepted absolute exponent in scientific notation input
const MAX_EXPONENT: i64 = 1024;

/// Amount parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Input is empty
    #[error("empty amount")]
    Empty,

    /// Negative amounts cannot be represented
    #[error("negative amount: {0}")]
    Negative(String),

    /// Input is not a decimal number
    #[error("invalid decimal amount: {0}")]
    InvalidDecimal(String),

    /// Exponent outside the supported range
    #[error("exponent out of range: {0}")]
    ExponentOutOfRange(String),
}

/// An amount expressed in atomic units together with its number of decimals
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenAmount {
    atomic: BigUint,
    num_decimals: u32,
}

impl TokenAmount {
    /// Create from atomic units
    pub fn new(atomic: BigUint, num_decimals: u32) -> Self {
        Self { atomic, num_decimals }
    }

    /// Parse a decimal amount, e.g. `"1.5"` with 18 decimals
    pub fn from_decimal(amount: &str, num_decimals: u32) -> Result<Self, AmountError> {
        Ok(Self::new(amount_to_atomic(amount, num_decimals)?, num_decimals))
    }

    /// Native token amount from its decimal form
    pub fn egld(amount: &str) -> Result<Self, AmountError> {
        Self::from_decimal(amount, EGLD_NUM_DECIMALS)
    }

    /// Atomic units
    pub fn atomic(&self) -> &BigUint {
        &self.atomic
    }

    /// Number of decimals
    pub fn num_decimals(&self) -> u32 {
        self.num_decimals
    }

    /// Decimal string, optionally without insignificant trailing zeros
    pub fn to_decimal_string(&self, normalize: bool) -> String {
        atomic_to_string(&self.atomic, self.num_decimals, normalize)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string(true))
    }
}

/// Scale a decimal amount by `10^num_decimals`, truncating toward zero.
///
/// Accepts an optional leading `+`, an optional fractional part and an
/// optional exponent (`"2.5e3"`).
pub fn amount_to_atomic(amount: &str, num_decimals: u32) -> Result<BigUint, AmountError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(AmountError::Empty);
    }
    if amount.starts_with('-') {
        return Err(AmountError::Negative(amount.to_string()));
    }
    let unsigned = amount.strip_prefix('+').unwrap_or(amount);

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => {
            let exp_str = &unsigned[pos + 1..];
            let exponent: i64 = exp_str
                .parse()
                .map_err(|_| AmountError::InvalidDecimal(amount.to_string()))?;
            if exponent.abs() > MAX_EXPONENT {
                return Err(AmountError::ExponentOutOfRange(amount.to_string()));
            }
            (&unsigned[..pos], exponent)
        }
        None => (unsigned, 0),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part) {
        return Err(AmountError::InvalidDecimal(amount.to_string()));
    }

    let mut digits = String::with_capacity(int_part.len() + frac_part.len());
    digits.push_str(int_part);
    digits.push_str(frac_part);

    // value = digits * 10^(exponent - frac_len); atomic = value * 10^num_decimals
    let shift = exponent + num_decimals as i64 - frac_part.len() as i64;
    if shift >= 0 {
        let shift = u32::try_from(shift).map_err(|_| AmountError::ExponentOutOfRange(amount.to_string()))?;
        let coefficient = parse_digits(&digits);
        Ok(coefficient * pow10(shift))
    } else {
        let drop = (-shift) as usize;
        if drop >= digits.len() {
            return Ok(BigUint::zero());
        }
        Ok(parse_digits(&digits[..digits.len() - drop]))
    }
}

/// Render atomic units as a decimal string with `num_decimals` fractional digits.
///
/// With `normalize`, trailing fractional zeros are removed and an integral
/// value is printed without a decimal point.
pub fn atomic_to_string(atomic: &BigUint, num_decimals: u32, normalize: bool) -> String {
    let digits = atomic.to_str_radix(10);
    let decimals = num_decimals as usize;
    if decimals == 0 {
        return digits;
    }

    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals - digits.len() + 1), digits)
    } else {
        digits
    };
    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);

    if normalize {
        let trimmed = frac_part.trim_end_matches('0');
        if trimmed.is_empty() {
            return int_part.to_string();
        }
        return format!("{}.{}", int_part, trimmed);
    }
    format!("{}.{}", int_part, frac_part)
}

fn parse_digits(digits: &str) -> BigUint {
    if digits.is_empty() {
        return BigUint::zero();
    }
    BigUint::parse_bytes(digits.as_bytes(), 10).unwrap_or_default()
}

fn pow10(exp: u32) -> BigUint {
    BigUint::from(10u32).pow(exp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(s: &str) -> BigUint {
        BigUint::parse_bytes(s.as_bytes(), 10).unwrap()
    }

    // ==================== Decimal -> atomic ====================

    #[test]
    fn test_one_egld() {
        assert_eq!(amount_to_atomic("1", 18).unwrap(), big("1000000000000000000"));
    }

    #[test]
    fn test_fractional_amounts() {
        assert_eq!(amount_to_atomic("1.5", 18).unwrap(), big("1500000000000000000"));
        assert_eq!(amount_to_atomic("0.1", 18).unwrap(), big("100000000000000000"));
        assert_eq!(amount_to_atomic(".25", 2).unwrap(), big("25"));
        assert_eq!(amount_to_atomic("7.", 2).unwrap(), big("700"));
    }

    #[test]
    fn test_excess_digits_truncated_not_rounded() {
        assert_eq!(amount_to_atomic("1.999", 2).unwrap(), big("199"));
        assert_eq!(amount_to_atomic("0.0000009", 6).unwrap(), big("0"));
        assert_eq!(
            amount_to_atomic("0.1234567891234567899", 18).unwrap(),
            big("123456789123456789")
        );
    }

    #[test]
    fn test_zero_decimals() {
        assert_eq!(amount_to_atomic("42.9", 0).unwrap(), big("42"));
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(amount_to_atomic("1e3", 2).unwrap(), big("100000"));
        assert_eq!(amount_to_atomic("2.5E-1", 2).unwrap(), big("25"));
        assert_eq!(amount_to_atomic("1e-30", 18).unwrap(), big("0"));
    }

    #[test]
    fn test_large_supply_keeps_precision() {
        let amount = "123456789012345678901234567890123456789012345678901234567890.123456789012345678";
        let expected = "123456789012345678901234567890123456789012345678901234567890123456789012345678";
        assert_eq!(amount_to_atomic(amount, 18).unwrap(), big(expected));
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(amount_to_atomic("", 18), Err(AmountError::Empty));
        assert!(matches!(amount_to_atomic("-1", 18), Err(AmountError::Negative(_))));
        assert!(matches!(amount_to_atomic("abc", 18), Err(AmountError::InvalidDecimal(_))));
        assert!(matches!(amount_to_atomic("1.2.3", 18), Err(AmountError::InvalidDecimal(_))));
        assert!(matches!(amount_to_atomic(".", 18), Err(AmountError::InvalidDecimal(_))));
        assert!(matches!(amount_to_atomic("1e", 18), Err(AmountError::InvalidDecimal(_))));
        assert!(matches!(
            amount_to_atomic("1e99999", 18),
            Err(AmountError::ExponentOutOfRange(_))
        ));
    }

    #[test]
    fn test_shift_past_u32_is_out_of_range() {
        assert!(matches!(
            amount_to_atomic("1e1024", u32::MAX),
            Err(AmountError::ExponentOutOfRange(_))
        ));
        assert!(matches!(
            amount_to_atomic("1e1", u32::MAX),
            Err(AmountError::ExponentOutOfRange(_))
        ));
    }

    // ==================== Atomic -> decimal ====================

    #[test]
    fn test_format_fraction_only() {
        assert_eq!(
            atomic_to_string(&big("123456789123456789"), 18, false),
            "0.123456789123456789"
        );
    }

    #[test]
    fn test_format_without_normalize_keeps_zeros() {
        assert_eq!(
            atomic_to_string(&big("1000000000000000000"), 18, false),
            "1.000000000000000000"
        );
        assert_eq!(atomic_to_string(&big("0"), 2, false), "0.00");
    }

    #[test]
    fn test_format_normalized() {
        assert_eq!(atomic_to_string(&big("1000000000000000000"), 18, true), "1");
        assert_eq!(atomic_to_string(&big("1500000000000000000"), 18, true), "1.5");
        assert_eq!(atomic_to_string(&big("100"), 2, true), "1");
        assert_eq!(atomic_to_string(&big("0"), 18, true), "0");
        assert_eq!(atomic_to_string(&big("5"), 3, true), "0.005");
    }

    #[test]
    fn test_format_zero_decimals() {
        assert_eq!(atomic_to_string(&big("12345"), 0, false), "12345");
    }

    // ==================== TokenAmount ====================

    #[test]
    fn test_token_amount_egld() {
        let amount = TokenAmount::egld("2.75").unwrap();
        assert_eq!(amount.atomic(), &big("2750000000000000000"));
        assert_eq!(amount.num_decimals(), 18);
        assert_eq!(amount.to_string(), "2.75");
        assert_eq!(amount.to_decimal_string(false), "2.750000000000000000");
    }

    #[test]
    fn test_token_amount_round_trip_through_string() {
        let amount = TokenAmount::new(big("123456789123456789"), 18);
        let parsed = TokenAmount::from_decimal(&amount.to_decimal_string(false), 18).unwrap();
        assert_eq!(parsed, amount);
    }
}
