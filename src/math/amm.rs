// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Constant-product pricing with a proportional fee
//!
//! Solving `reserve_in * reserve_out <= (reserve_in + amount_in') * (reserve_out - amount_out)`
//! for `amount_out`, with the fee folded into the input and both terms scaled by
//! the fee denominator so the whole computation stays in integers:
//!
//! ```text
//! amount_in_with_fee = amount_in * numerator / denominator        (truncating)
//! amount_out = amount_in_with_fee * reserve_out
//!            / (reserve_in * denominator + amount_in_with_fee)    (truncating)
//! ```
//!
//! No upper bound is placed on `amount_in`. A huge input drains the output side
//! asymptotically and the quote follows it there.

use alloy_primitives::U256;

use crate::errors::QuoteError;
use crate::math::fixed_point::{checked_add, checked_div, checked_mul};

/// Fee numerator for the 0.3% Uniswap V2 fee.
pub const FEE_NUMERATOR: u64 = 997;

/// Fee denominator for the 0.3% Uniswap V2 fee.
pub const FEE_DENOMINATOR: u64 = 1000;

/// A proportional swap fee expressed as `numerator / denominator` of the input
/// that actually reaches the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantProductFee {
    numerator: u64,
    denominator: u64,
}

impl ConstantProductFee {
    /// The 0.3% fee charged by Uniswap V2 pairs.
    pub const UNISWAP_V2: Self = Self {
        numerator: FEE_NUMERATOR,
        denominator: FEE_DENOMINATOR,
    };

    /// No fee, same scaling as [`Self::UNISWAP_V2`]. Useful as a baseline.
    pub const ZERO: Self = Self {
        numerator: FEE_DENOMINATOR,
        denominator: FEE_DENOMINATOR,
    };

    /// Build a fee from its fraction. Returns `None` unless
    /// `0 < numerator <= denominator`.
    pub const fn new(numerator: u64, denominator: u64) -> Option<Self> {
        if numerator == 0 || numerator > denominator {
            return None;
        }
        Some(Self {
            numerator,
            denominator,
        })
    }

    /// Share of the input that reaches the pool, numerator.
    pub const fn numerator(&self) -> u64 {
        self.numerator
    }

    /// Share of the input that reaches the pool, denominator.
    pub const fn denominator(&self) -> u64 {
        self.denominator
    }
}

impl Default for ConstantProductFee {
    fn default() -> Self {
        Self::UNISWAP_V2
    }
}

/// Output amount for swapping `amount_in` through a pair with the 0.3% fee.
///
/// # Errors
///
/// - [`QuoteError::InsufficientLiquidity`] if either reserve is zero
/// - [`QuoteError::InvalidAmount`] if `amount_in` is zero or an intermediate
///   product overflows 256 bits
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use semioquote::estimate_amount_out;
///
/// let out = estimate_amount_out(U256::from(1000), U256::from(1000), U256::from(1000)).unwrap();
/// assert!(out < U256::from(1000));
/// ```
pub fn estimate_amount_out(
    reserve_in: U256,
    reserve_out: U256,
    amount_in: U256,
) -> Result<U256, QuoteError> {
    estimate_amount_out_with_fee(reserve_in, reserve_out, amount_in, ConstantProductFee::UNISWAP_V2)
}

/// Same as [`estimate_amount_out`] with an explicit fee.
pub fn estimate_amount_out_with_fee(
    reserve_in: U256,
    reserve_out: U256,
    amount_in: U256,
    fee: ConstantProductFee,
) -> Result<U256, QuoteError> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(QuoteError::InsufficientLiquidity);
    }
    if amount_in.is_zero() {
        return Err(QuoteError::invalid_amount("amount in must be greater than zero"));
    }

    let numerator = U256::from(fee.numerator);
    let denominator = U256::from(fee.denominator);

    let amount_in_with_fee = checked_div(checked_mul(amount_in, numerator)?, denominator)?;
    let scaled_numerator = checked_mul(amount_in_with_fee, reserve_out)?;
    let scaled_denominator = checked_add(checked_mul(reserve_in, denominator)?, amount_in_with_fee)?;

    checked_div(scaled_numerator, scaled_denominator)
}
