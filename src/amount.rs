//! Conversion between human amounts ("1.5") and raw amounts in a token's
//! smallest unit ("1500000000000000000").
//!
//! Human → raw is exact: the decimal is parsed with `rust_decimal` and scaled
//! with 256-bit integers, so 18-decimal tokens never pass through `f64`.
//! Raw → human is `f64` and only meant for display.

use crate::error::{Error, Result};
use crate::models::Token;
use alloy::primitives::U256;
use rust_decimal::{Decimal, RoundingStrategy};
use std::borrow::Cow;
use std::str::FromStr;

/// Scales `human_amount` to the token's smallest unit, rounding half away from
/// zero.
///
/// Plain decimals may carry any number of fraction digits. Scientific input
/// (`"1e3"`) must stay within 28 fraction digits once expanded, so `"1e-30"`
/// is rejected with [`Error::InvalidAmount`] rather than rounded to `"0"`.
pub fn to_raw_amount(human_amount: &str, decimals: u8) -> Result<String> {
    let input = truncate_fraction(human_amount.trim(), u32::from(decimals));
    let input = input.as_ref();
    let human = Decimal::from_str(input)
        .or_else(|_| Decimal::from_scientific(input))
        .map_err(|e| Error::invalid_amount(human_amount, e))?;
    if human.is_sign_negative() && !human.is_zero() {
        return Err(Error::invalid_amount(human_amount, "amount must not be negative"));
    }

    let decimals = u32::from(decimals);
    // Digits beyond the token's precision are rounded half away from zero.
    let human = human.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);

    let mantissa = U256::from(human.mantissa().unsigned_abs());
    let exponent = decimals - human.scale();
    U256::from(10u8)
        .checked_pow(U256::from(exponent))
        .and_then(|scale| mantissa.checked_mul(scale))
        .map(|raw| raw.to_string())
        .ok_or_else(|| Error::invalid_amount(human_amount, "amount does not fit in 256 bits"))
}

/// Drops fraction digits past `decimals + 1`. Rounding half away from zero to
/// `decimals` places only looks at the first dropped digit.
fn truncate_fraction(input: &str, decimals: u32) -> Cow<'_, str> {
    let keep = decimals as usize + 1;
    match input.split_once('.') {
        Some((int, frac)) if frac.len() > keep && frac.bytes().all(|b| b.is_ascii_digit()) => {
            Cow::Owned(format!("{}.{}", int, &frac[..keep]))
        }
        _ => Cow::Borrowed(input),
    }
}

pub fn to_human_amount(raw_amount: &str, decimals: u8) -> Result<f64> {
    let raw = raw_amount.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_amount(raw_amount, "raw amount must be an unsigned integer"));
    }
    let raw: f64 = raw
        .parse()
        .map_err(|e| Error::invalid_amount(raw_amount, e))?;
    Ok(raw / 10_f64.powi(i32::from(decimals)))
}

/// Units of `to_token` received per unit of `from_token`.
pub fn calculate_price(
    from_token: &Token,
    from_raw_amount: &str,
    to_token: &Token,
    to_raw_amount: &str,
) -> Result<f64> {
    let from_human = to_human_amount(from_raw_amount, from_token.decimals)?;
    let to_human = to_human_amount(to_raw_amount, to_token.decimals)?;

    if from_human == 0.0 {
        return Ok(0.0);
    }

    Ok(to_human / from_human)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_raw_amount_eighteen_decimals() {
        assert_eq!(to_raw_amount("1.5", 18).unwrap(), "1500000000000000000");
        assert_eq!(to_raw_amount("0.000000000000000001", 18).unwrap(), "1");
        assert_eq!(
            to_raw_amount("123456789.123456789123456789", 18).unwrap(),
            "123456789123456789123456789"
        );
    }

    #[test]
    fn test_to_raw_amount_small_decimals() {
        assert_eq!(to_raw_amount("100", 6).unwrap(), "100000000");
        assert_eq!(to_raw_amount("2.5", 0).unwrap(), "3");
        assert_eq!(to_raw_amount("0", 18).unwrap(), "0");
    }

    #[test]
    fn test_to_raw_amount_rounds_excess_digits() {
        assert_eq!(to_raw_amount("1.2345675", 6).unwrap(), "1234568");
        assert_eq!(to_raw_amount("1.2345674", 6).unwrap(), "1234567");
    }

    #[test]
    fn test_to_raw_amount_long_fraction() {
        let tiny = format!("0.{}1", "0".repeat(29));
        assert_eq!(to_raw_amount(&tiny, 18).unwrap(), "0");
        let half = format!("1.{}5{}", "0".repeat(18), "0".repeat(20));
        assert_eq!(to_raw_amount(&half, 18).unwrap(), "1000000000000000001");

        // Scientific input past 28 fraction digits is out of range.
        assert!(matches!(
            to_raw_amount("1e-30", 18),
            Err(Error::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_to_raw_amount_beyond_decimal_range() {
        // 10^40 overflows a plain 96-bit decimal mantissa but not U256.
        assert_eq!(
            to_raw_amount("1", 40).unwrap(),
            format!("1{}", "0".repeat(40))
        );
    }

    #[test]
    fn test_to_raw_amount_scientific_notation() {
        assert_eq!(to_raw_amount("1e3", 6).unwrap(), "1000000000");
    }

    #[test]
    fn test_to_raw_amount_rejects_bad_input() {
        assert!(to_raw_amount("abc", 18).is_err());
        assert!(to_raw_amount("", 18).is_err());
        assert!(matches!(
            to_raw_amount("-1", 18),
            Err(Error::InvalidAmount { .. })
        ));
        assert!(to_raw_amount("1", 200).is_err());
    }

    #[test]
    fn test_to_human_amount() {
        assert_eq!(to_human_amount("1500000000000000000", 18).unwrap(), 1.5);
        assert_eq!(to_human_amount("2000000", 6).unwrap(), 2.0);
        assert!(to_human_amount("1.5", 6).is_err());
        assert!(to_human_amount("-5", 6).is_err());
    }

    #[test]
    fn test_round_trip_within_display_tolerance() {
        for (human, decimals) in [("1.5", 18), ("0.1", 18), ("42.000001", 6), ("7", 0), ("3.14159", 8)] {
            let raw = to_raw_amount(human, decimals).unwrap();
            let back = to_human_amount(&raw, decimals).unwrap();
            let expected: f64 = human.parse().unwrap();
            assert!((back - expected).abs() <= expected.abs() * 1e-12, "{human} -> {raw} -> {back}");
        }
    }

    #[test]
    fn test_calculate_price() {
        let eth = Token::new("0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee", "ETH", 18);
        let usdc = Token::new("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48", "USDC", 6);
        let price = calculate_price(&eth, "1000000000000000000", &usdc, "2000000").unwrap();
        assert_eq!(price, 2.0);

        let inverse = calculate_price(&usdc, "2000000", &eth, "1000000000000000000").unwrap();
        assert_eq!(inverse, 0.5);
    }

    #[test]
    fn test_calculate_price_zero_input() {
        let a = Token::new("0xa", "A", 18);
        let b = Token::new("0xb", "B", 6);
        assert_eq!(calculate_price(&a, "0", &b, "100").unwrap(), 0.0);
    }
}
