// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for swap quotes.
//!
//! Validation and business-rule failures (`InvalidAddress`, `InvalidAmount`,
//! `PairNotFound`, `InsufficientLiquidity`) are distinct variants a caller can act
//! on. `ReserveFetchFailed` is the single catch-all for anything unexpected that
//! happens while reading pair state from the chain.

use alloy_primitives::Address;

/// Errors that can occur while producing a swap quote.
///
/// The type is `Clone` because a single failed cache load is delivered to every
/// caller that was waiting on it.
///
/// # Examples
///
/// ```rust
/// use semioquote::QuoteError;
///
/// let error = QuoteError::invalid_amount("amount must be greater than zero");
/// assert!(error.is_client_fault());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    /// A token identifier is not a well-formed 20-byte hex address.
    #[error("Invalid token address: {input}")]
    InvalidAddress {
        /// The rejected input, verbatim
        input: String,
    },

    /// The input amount is zero, not numeric, too precise, or too large.
    #[error("Invalid amount: {reason}")]
    InvalidAmount {
        /// Why the amount was rejected
        reason: String,
    },

    /// The factory has no market for this token pair.
    #[error("Pair not found for {from} -> {to}")]
    PairNotFound {
        /// Input token
        from: Address,
        /// Output token
        to: Address,
    },

    /// One of the pair's reserves is zero.
    ///
    /// This is terminal for the pair, retrying will not help until someone
    /// adds liquidity.
    #[error("Insufficient liquidity")]
    InsufficientLiquidity,

    /// Reading or interpreting pair state failed.
    ///
    /// Network outages and malformed chain responses both land here.
    #[error("Failed to get pair reserves: {details}")]
    ReserveFetchFailed {
        /// Description of the underlying failure
        details: String,
    },
}

impl QuoteError {
    /// Create an `InvalidAddress` error for the rejected input.
    pub fn invalid_address(input: impl Into<String>) -> Self {
        QuoteError::InvalidAddress {
            input: input.into(),
        }
    }

    /// Create an `InvalidAmount` error with a reason.
    pub fn invalid_amount(reason: impl Into<String>) -> Self {
        QuoteError::InvalidAmount {
            reason: reason.into(),
        }
    }

    /// Create a `ReserveFetchFailed` error with details.
    pub fn reserve_fetch_failed(details: impl Into<String>) -> Self {
        QuoteError::ReserveFetchFailed {
            details: details.into(),
        }
    }

    /// Whether this error is reported to the caller as a client fault (HTTP 400).
    ///
    /// Every quote error currently is, including `ReserveFetchFailed`.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            QuoteError::InvalidAddress { .. }
                | QuoteError::InvalidAmount { .. }
                | QuoteError::PairNotFound { .. }
                | QuoteError::InsufficientLiquidity
                | QuoteError::ReserveFetchFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            QuoteError::invalid_address("not-a-valid-address").to_string(),
            "Invalid token address: not-a-valid-address"
        );
        assert_eq!(
            QuoteError::InsufficientLiquidity.to_string(),
            "Insufficient liquidity"
        );
        assert_eq!(
            QuoteError::reserve_fetch_failed("timeout").to_string(),
            "Failed to get pair reserves: timeout"
        );
    }

    #[test]
    fn pair_not_found_names_both_tokens() {
        let from = Address::repeat_byte(0x11);
        let to = Address::repeat_byte(0x22);
        let message = QuoteError::PairNotFound { from, to }.to_string();
        assert!(message.contains(&from.to_string()));
        assert!(message.contains(&to.to_string()));
    }
}
