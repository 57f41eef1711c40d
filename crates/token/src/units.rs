//! Conversion between human-readable amounts and base units.

use crate::SessionError;
use alloy_primitives::{
    utils::{format_units, parse_units, ParseUnits},
    U256,
};

/// Parse a decimal amount such as `"12.5"` into base units.
///
/// Negative and malformed amounts are rejected, as are amounts with more
/// significant fractional digits than `decimals`.
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, SessionError> {
    let trimmed = amount.trim();
    if let Some((_, fraction)) = trimmed.split_once('.') {
        if fraction.trim_end_matches('0').len() > usize::from(decimals) {
            return Err(SessionError::InvalidAmount(amount.to_string()));
        }
    }
    match parse_units(trimmed, decimals) {
        Ok(ParseUnits::U256(value)) => Ok(value),
        Ok(ParseUnits::I256(_)) | Err(_) => Err(SessionError::InvalidAmount(amount.to_string())),
    }
}

/// Parse an amount that must be strictly positive.
pub fn parse_positive_amount(amount: &str, decimals: u8) -> Result<U256, SessionError> {
    let value = parse_amount(amount, decimals)?;
    if value.is_zero() {
        return Err(SessionError::NonPositiveAmount);
    }
    Ok(value)
}

/// Render base units as a decimal string with trailing zeros trimmed,
/// keeping at least one fractional digit (`"999900.0"`).
pub fn format_amount(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }

    let Ok(formatted) = format_units(value, decimals) else {
        return value.to_string();
    };

    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ether(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18))
    }

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(parse_amount("100", 18).unwrap(), ether(100));
        assert_eq!(
            parse_amount("0.5", 18).unwrap(),
            U256::from(500_000_000_000_000_000u64)
        );
        assert_eq!(parse_amount(" 42 ", 0).unwrap(), U256::from(42));
    }

    #[test]
    fn test_parse_rejects_garbage_and_negative() {
        assert_eq!(
            parse_amount("abc", 18),
            Err(SessionError::InvalidAmount("abc".to_string()))
        );
        assert!(parse_amount("-1", 18).is_err());
    }

    #[test]
    fn test_parse_rejects_excess_precision() {
        assert_eq!(
            parse_amount("1.0000009", 6),
            Err(SessionError::InvalidAmount("1.0000009".to_string()))
        );
        assert_eq!(
            parse_positive_amount("0.0000001", 6),
            Err(SessionError::InvalidAmount("0.0000001".to_string()))
        );
        assert_eq!(
            parse_amount("1.5", 0),
            Err(SessionError::InvalidAmount("1.5".to_string()))
        );
        // trailing zeros carry no precision
        assert_eq!(parse_amount("1.2500000", 6).unwrap(), U256::from(1_250_000));
        assert_eq!(parse_amount("7.000", 0).unwrap(), U256::from(7));
    }

    #[test]
    fn test_positive_amount() {
        assert_eq!(
            parse_positive_amount("0", 18),
            Err(SessionError::NonPositiveAmount)
        );
        assert_eq!(parse_positive_amount("1", 6).unwrap(), U256::from(1_000_000));
    }

    #[test]
    fn test_format_trims_trailing_zeros() {
        assert_eq!(format_amount(ether(999_900), 18), "999900.0");
        assert_eq!(
            format_amount(U256::from(1_500_000u64), 6),
            "1.5"
        );
        assert_eq!(format_amount(U256::from(1_000_000_000u64), 18), "0.000000001");
    }

    #[test]
    fn test_format_without_decimals() {
        assert_eq!(format_amount(U256::from(1234), 0), "1234");
    }
}
