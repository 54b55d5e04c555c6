// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Exact integer arithmetic over token amounts
//!
//! Reserves and amounts routinely exceed 64 bits, so everything here works on
//! [`U256`], the chain's native word. Division truncates toward zero, matching
//! the EVM. Human-readable amounts ("1.5") are scaled by `10^decimals` on the
//! way in and back down on the way out.

use alloy_primitives::U256;

use crate::errors::QuoteError;

/// Number of fractional digits used for quote amounts (ERC-20 standard).
pub const AMOUNT_DECIMALS: u8 = 18;

/// Largest decimal precision whose scale factor still fits in a U256.
pub const MAX_DECIMALS: u8 = 77;

/// `10^decimals` as a U256.
pub fn scale_factor(decimals: u8) -> Result<U256, QuoteError> {
    U256::from(10u64)
        .checked_pow(U256::from(decimals))
        .ok_or_else(|| QuoteError::invalid_amount(format!("precision {decimals} is too large")))
}

/// Overflow-checked addition.
pub fn checked_add(a: U256, b: U256) -> Result<U256, QuoteError> {
    a.checked_add(b).ok_or_else(overflow)
}

/// Overflow-checked multiplication.
pub fn checked_mul(a: U256, b: U256) -> Result<U256, QuoteError> {
    a.checked_mul(b).ok_or_else(overflow)
}

/// Truncating division. Fails on a zero divisor instead of panicking.
pub fn checked_div(a: U256, b: U256) -> Result<U256, QuoteError> {
    a.checked_div(b)
        .ok_or_else(|| QuoteError::invalid_amount("division by zero"))
}

fn overflow() -> QuoteError {
    QuoteError::invalid_amount("amount exceeds the 256-bit range")
}

/// Parse a human-decimal string into its scaled integer representation.
///
/// Accepts plain digits with at most one `.`; either side of the point may be
/// empty but not both. Signs, exponents, whitespace and separators are
/// rejected, as is any fractional part longer than `decimals`.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use semioquote::parse_units;
///
/// assert_eq!(parse_units("1.5", 18).unwrap(), U256::from(1_500_000_000_000_000_000u128));
/// assert_eq!(parse_units("42", 0).unwrap(), U256::from(42));
/// assert!(parse_units("0.1234567", 6).is_err());
/// ```
pub fn parse_units(input: &str, decimals: u8) -> Result<U256, QuoteError> {
    let (whole, fraction) = match input.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (input, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(QuoteError::invalid_amount(format!(
            "'{input}' is not a decimal number"
        )));
    }

    if fraction.len() > decimals as usize {
        return Err(QuoteError::invalid_amount(format!(
            "'{input}' has more than {decimals} fractional digits"
        )));
    }

    let whole_value = parse_digits(whole)?;
    let fraction_value = parse_digits(fraction)?;

    let scaled_whole = checked_mul(whole_value, scale_factor(decimals)?)?;
    // Right-pad the fraction: "5" with 18 decimals is 5 * 10^17.
    let pad = decimals - fraction.len() as u8;
    let scaled_fraction = checked_mul(fraction_value, scale_factor(pad)?)?;

    checked_add(scaled_whole, scaled_fraction)
}

fn parse_digits(digits: &str) -> Result<U256, QuoteError> {
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 10).map_err(|_| overflow())
}

/// Format a scaled integer back into a human-decimal string.
///
/// Trailing fractional zeros are trimmed and the point is dropped for whole
/// values, so `1.500` prints as `1.5` and `2.000` as `2`.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use semioquote::format_units;
///
/// assert_eq!(format_units(U256::from(1_500_000u64), 6), "1.5");
/// assert_eq!(format_units(U256::ZERO, 18), "0");
/// ```
pub fn format_units(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }

    let Ok(divisor) = scale_factor(decimals) else {
        return value.to_string();
    };
    let whole = value / divisor;
    let fractional = value % divisor;

    let fractional_str = format!("{:0width$}", fractional, width = decimals as usize);
    let trimmed = fractional_str.trim_end_matches('0');

    if trimmed.is_empty() {
        format!("{}", whole)
    } else {
        format!("{}.{}", whole, trimmed)
    }
}
