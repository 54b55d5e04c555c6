// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for semioquote
//!
//! # Example: Using defaults
//!
//! ```rust
//! use semioquote::QuoteConfig;
//!
//! // Uniswap V2 mainnet factory, 60s quote TTL, 30s gas refresh
//! let config = QuoteConfig::default();
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use semioquote::QuoteConfigBuilder;
//! use std::time::Duration;
//!
//! let config = QuoteConfigBuilder::new()
//!     .rpc_url("https://eth.llamarpc.com")
//!     .quote_ttl(Duration::from_secs(12))
//!     .gas_refresh_interval(Duration::from_secs(15))
//!     .build();
//! ```
//!
//! # Example: From the environment
//!
//! ```rust,ignore
//! use semioquote::QuoteConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = QuoteConfig::from_env()?;
//! ```

use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::Address;

use crate::errors::ConfigError;
use crate::math::{AMOUNT_DECIMALS, MAX_DECIMALS};

pub mod constants;

use constants::{
    DEFAULT_API_PORT, DEFAULT_GAS_REFRESH_INTERVAL, DEFAULT_QUOTE_TTL, UNISWAP_V2_FACTORY,
};

/// Environment variable holding the node RPC URL (required by `from_env`).
pub const ENV_RPC_URL: &str = "ETHEREUM_RPC_URL";
/// Environment variable overriding the Uniswap V2 factory address.
pub const ENV_FACTORY: &str = "UNISWAP_V2_FACTORY";
/// Environment variable overriding the quote TTL, in milliseconds.
pub const ENV_QUOTE_TTL_MS: &str = "CACHE_TTL";
/// Environment variable overriding the gas refresh interval, in milliseconds.
pub const ENV_GAS_REFRESH_MS: &str = "GAS_REFRESH_INTERVAL_MS";
/// Environment variable overriding the API port.
pub const ENV_API_PORT: &str = "API_PORT";

/// Configuration for the quote service
///
/// Use [`QuoteConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteConfig {
    /// Node RPC endpoint
    /// Default: `http://localhost:8545`
    pub rpc_url: String,

    /// Factory used to resolve pairs
    /// Default: Uniswap V2 mainnet factory
    pub factory_address: Address,

    /// How long a computed swap quote is served from cache
    /// Default: 60 seconds
    pub quote_ttl: Duration,

    /// Interval between background gas price refreshes
    /// Default: 30 seconds
    pub gas_refresh_interval: Duration,

    /// Fractional digits of quote amounts, in and out
    /// Default: 18
    pub amount_decimals: u8,

    /// Port the HTTP API listens on
    /// Default: 3000
    pub api_port: u16,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            factory_address: UNISWAP_V2_FACTORY,
            quote_ttl: DEFAULT_QUOTE_TTL,
            gas_refresh_interval: DEFAULT_GAS_REFRESH_INTERVAL,
            amount_decimals: AMOUNT_DECIMALS,
            api_port: DEFAULT_API_PORT,
        }
    }
}

impl QuoteConfig {
    /// Build a config from process environment variables (and `.env`, if the
    /// caller has loaded it with `dotenvy::dotenv()`).
    ///
    /// # Errors
    ///
    /// Fails if `ETHEREUM_RPC_URL` is unset or any variable holds a value that
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Build a config from an arbitrary key/value lookup.
    ///
    /// Unset optional keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let rpc_url = lookup(ENV_RPC_URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::missing(ENV_RPC_URL))?;

        let factory_address = match lookup(ENV_FACTORY).filter(|v| !v.is_empty()) {
            Some(value) => Address::from_str(&value)
                .map_err(|e| ConfigError::invalid(ENV_FACTORY, &value, e.to_string()))?,
            None => defaults.factory_address,
        };

        let quote_ttl = match lookup(ENV_QUOTE_TTL_MS) {
            Some(value) => parse_millis(ENV_QUOTE_TTL_MS, &value)?,
            None => defaults.quote_ttl,
        };

        let gas_refresh_interval = match lookup(ENV_GAS_REFRESH_MS) {
            Some(value) => parse_millis(ENV_GAS_REFRESH_MS, &value)?,
            None => defaults.gas_refresh_interval,
        };

        let api_port = match lookup(ENV_API_PORT) {
            Some(value) => value
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid(ENV_API_PORT, &value, e.to_string()))?,
            None => defaults.api_port,
        };

        Ok(Self {
            rpc_url,
            factory_address,
            quote_ttl,
            gas_refresh_interval,
            amount_decimals: defaults.amount_decimals,
            api_port,
        })
    }
}

fn parse_millis(key: &str, value: &str) -> Result<Duration, ConfigError> {
    let millis = value
        .parse::<u64>()
        .map_err(|e| ConfigError::invalid(key, value, e.to_string()))?;
    if millis == 0 {
        return Err(ConfigError::invalid(key, value, "must be greater than zero"));
    }
    Ok(Duration::from_millis(millis))
}

/// Builder for [`QuoteConfig`]
///
/// Starts from [`QuoteConfig::default`].
#[derive(Debug, Clone, Default)]
pub struct QuoteConfigBuilder {
    config: QuoteConfig,
}

impl QuoteConfigBuilder {
    /// Create a builder seeded with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the node RPC URL
    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.config.rpc_url = url.into();
        self
    }

    /// Set the factory address
    pub fn factory_address(mut self, factory: Address) -> Self {
        self.config.factory_address = factory;
        self
    }

    /// Set the swap quote TTL
    pub fn quote_ttl(mut self, ttl: Duration) -> Self {
        self.config.quote_ttl = ttl;
        self
    }

    /// Set the gas refresh interval
    pub fn gas_refresh_interval(mut self, interval: Duration) -> Self {
        self.config.gas_refresh_interval = interval;
        self
    }

    /// Set amount precision. Values above 77 are clamped, since `10^78`
    /// does not fit in 256 bits.
    pub fn amount_decimals(mut self, decimals: u8) -> Self {
        self.config.amount_decimals = decimals.min(MAX_DECIMALS);
        self
    }

    /// Set the API port
    pub fn api_port(mut self, port: u16) -> Self {
        self.config.api_port = port;
        self
    }

    /// Build the configuration
    pub fn build(self) -> QuoteConfig {
        self.config
    }
}
