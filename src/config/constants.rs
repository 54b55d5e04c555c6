// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Well-known addresses and defaults

use std::time::Duration;

use alloy_primitives::{address, Address};

/// Uniswap V2 factory on Ethereum mainnet
///
/// Contract: 0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f
pub const UNISWAP_V2_FACTORY: Address = address!("5c69bee701ef814a2b6a3edd4b1652cb9cc5aa6f");

/// Default lifetime of a cached swap quote.
pub const DEFAULT_QUOTE_TTL: Duration = Duration::from_secs(60);

/// Default interval between background gas price refreshes.
pub const DEFAULT_GAS_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Default port for the HTTP API.
pub const DEFAULT_API_PORT: u16 = 3000;
