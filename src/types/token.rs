// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Token identifiers as they arrive from callers

use std::str::FromStr;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::errors::QuoteError;

/// Length of an address in hex characters, without the `0x` prefix.
const ADDRESS_HEX_LEN: usize = 40;

/// A syntactically valid token contract address.
///
/// Parsing accepts an optional `0x`/`0X` prefix followed by exactly 40 hex
/// digits in any case. Mixed-case input is not checked against EIP-55; two
/// spellings that differ only in case are the same token.
///
/// # Examples
///
/// ```
/// use semioquote::TokenAddress;
///
/// let lower: TokenAddress = "0x1f9840a85d5af5bf1d1764f4f5dc98555f0e61f9".parse().unwrap();
/// let upper: TokenAddress = "0x1F9840A85D5AF5BF1D1764F4F5DC98555F0E61F9".parse().unwrap();
/// assert_eq!(lower, upper);
///
/// assert!("not-a-valid-address".parse::<TokenAddress>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAddress(Address);

impl TokenAddress {
    /// Validate and parse a token address.
    pub fn parse(input: &str) -> Result<Self, QuoteError> {
        let hex = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input);

        if hex.len() != ADDRESS_HEX_LEN || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(QuoteError::invalid_address(input));
        }

        Address::from_str(hex)
            .map(Self)
            .map_err(|_| QuoteError::invalid_address(input))
    }

    /// Get the inner address.
    pub const fn as_address(&self) -> Address {
        self.0
    }
}

impl FromStr for TokenAddress {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Address> for TokenAddress {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl From<TokenAddress> for Address {
    fn from(token: TokenAddress) -> Self {
        token.0
    }
}

impl std::fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
