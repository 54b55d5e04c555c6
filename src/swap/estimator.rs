// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Swap output estimation through a single constant-product pair
//!
//! A request goes through these steps:
//!
//! 1. Both token addresses and the input amount are validated. No chain call
//!    happens for malformed input.
//! 2. The pair is resolved through the factory. The zero address means no
//!    market exists.
//! 3. The quote is served from the cache, keyed by
//!    `(from, to, amount as typed)`. On a miss a single load reads the pair's
//!    reserves, orients them, prices the swap and stores the result.
//!
//! Chain failures from steps 2 and 3 surface as
//! [`QuoteError::ReserveFetchFailed`]. Validation errors, a missing pair and
//! an illiquid pair keep their own variants.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, U256};
use serde::Serialize;
use tracing::{debug, error, Instrument};

use crate::cache::{CacheLoadError, CacheStats, TtlCache};
use crate::chain::ChainClient;
use crate::errors::{QuoteError, RpcError};
use crate::math::{estimate_amount_out, format_units, parse_units, AMOUNT_DECIMALS, MAX_DECIMALS};
use crate::tracing::spans;
use crate::types::TokenAddress;

/// Cache key for one swap quote.
///
/// The amount is kept exactly as the caller typed it, so `"1"` and `"1.0"`
/// are separate entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SwapQuoteKey {
    /// Input token
    pub from: Address,
    /// Output token
    pub to: Address,
    /// Input amount, verbatim
    pub amount_in: String,
}

impl fmt::Display for SwapQuoteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.from, self.to, self.amount_in)
    }
}

/// A priced swap, as stored in the quote cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapEstimate {
    /// Output amount scaled by `10^amount_decimals`
    pub amount_out: U256,
    /// `amount_out` as a decimal string, trailing zeros trimmed
    pub formatted: String,
    /// Pair the quote was priced against
    pub pair: Address,
}

/// Prices swaps against Uniswap V2 style pairs, caching each quote for a fixed TTL
///
/// # Example
///
/// ```rust,ignore
/// let estimator = SwapEstimator::new(client, Duration::from_secs(60));
/// let out = estimator
///     .estimate(
///         "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984",
///         "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
///         "1.5",
///     )
///     .await?;
/// ```
pub struct SwapEstimator {
    client: Arc<dyn ChainClient>,
    cache: TtlCache<SwapQuoteKey, SwapEstimate, QuoteError>,
    amount_decimals: u8,
}

impl fmt::Debug for SwapEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwapEstimator")
            .field("cache", &self.cache)
            .field("amount_decimals", &self.amount_decimals)
            .finish_non_exhaustive()
    }
}

impl SwapEstimator {
    /// Create an estimator whose quotes live for `quote_ttl`.
    ///
    /// Amounts use 18 decimals unless changed with
    /// [`with_amount_decimals`](Self::with_amount_decimals).
    pub fn new(client: Arc<dyn ChainClient>, quote_ttl: Duration) -> Self {
        Self {
            client,
            cache: TtlCache::new(quote_ttl),
            amount_decimals: AMOUNT_DECIMALS,
        }
    }

    /// Set the fractional digits used to parse inputs and format outputs.
    ///
    /// Clamped to 77.
    pub fn with_amount_decimals(mut self, decimals: u8) -> Self {
        self.amount_decimals = decimals.min(MAX_DECIMALS);
        self
    }

    /// Lifetime of a cached quote
    pub fn quote_ttl(&self) -> Duration {
        self.cache.default_ttl()
    }

    /// Quote cache counters
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Estimate the output of swapping `amount_in` of `from` into `to`.
    ///
    /// Returns the output as a decimal string.
    ///
    /// # Errors
    ///
    /// See [`estimate_detailed`](Self::estimate_detailed).
    pub async fn estimate(&self, from: &str, to: &str, amount_in: &str) -> Result<String, QuoteError> {
        Ok(self.estimate_detailed(from, to, amount_in).await?.formatted)
    }

    /// Estimate a swap and return the full [`SwapEstimate`].
    ///
    /// # Errors
    ///
    /// - [`QuoteError::InvalidAddress`] if either token is not a 20-byte hex address
    /// - [`QuoteError::InvalidAmount`] if the amount is not a positive decimal
    ///   with at most `amount_decimals` fractional digits
    /// - [`QuoteError::PairNotFound`] if the factory has no pair for the tokens
    /// - [`QuoteError::InsufficientLiquidity`] if either reserve is zero
    /// - [`QuoteError::ReserveFetchFailed`] for any chain failure
    pub async fn estimate_detailed(
        &self,
        from: &str,
        to: &str,
        amount_in: &str,
    ) -> Result<SwapEstimate, QuoteError> {
        let span = spans::estimate_swap(from, to, amount_in);
        self.estimate_inner(from, to, amount_in)
            .instrument(span)
            .await
    }

    async fn estimate_inner(
        &self,
        from: &str,
        to: &str,
        amount_in: &str,
    ) -> Result<SwapEstimate, QuoteError> {
        let from = TokenAddress::parse(from)?.as_address();
        let to = TokenAddress::parse(to)?.as_address();

        let amount = parse_units(amount_in, self.amount_decimals)?;
        if amount.is_zero() {
            return Err(QuoteError::invalid_amount(
                "amount in must be greater than zero",
            ));
        }

        let pair = self
            .client
            .resolve_pair(from, to)
            .await
            .map_err(fetch_failed)?;
        if pair == Address::ZERO {
            return Err(QuoteError::PairNotFound { from, to });
        }

        let key = SwapQuoteKey {
            from,
            to,
            amount_in: amount_in.to_string(),
        };
        debug!(%key, %pair, "Looking up swap quote");

        let client = Arc::clone(&self.client);
        let decimals = self.amount_decimals;
        self.cache
            .get_or_load(key, self.cache.default_ttl(), move || {
                load_quote(client, pair, from, to, amount, decimals)
            })
            .await
            .map_err(|e| match e {
                CacheLoadError::Loader(e) => e,
                CacheLoadError::Aborted => {
                    error!(%pair, "Swap quote load aborted");
                    QuoteError::reserve_fetch_failed("quote computation aborted")
                }
            })
    }
}

/// Read reserves for `pair` and price the swap. Runs as the cache loader.
async fn load_quote(
    client: Arc<dyn ChainClient>,
    pair: Address,
    from: Address,
    to: Address,
    amount_in: U256,
    decimals: u8,
) -> Result<SwapEstimate, QuoteError> {
    async move {
        let reserves = client.get_reserves(pair).await.map_err(fetch_failed)?;

        let (reserve_in, reserve_out) = reserves.oriented(from, to).ok_or_else(|| {
            error!(
                %pair,
                token0 = %reserves.token0,
                "Pair token0 matches neither side of the swap"
            );
            QuoteError::reserve_fetch_failed(format!(
                "pair {pair} reports token0 {}, which is neither {from} nor {to}",
                reserves.token0
            ))
        })?;

        let amount_out = estimate_amount_out(reserve_in, reserve_out, amount_in)?;
        debug!(%reserve_in, %reserve_out, %amount_out, "Priced swap");

        Ok(SwapEstimate {
            amount_out,
            formatted: format_units(amount_out, decimals),
            pair,
        })
    }
    .instrument(spans::load_swap_quote(pair, from, to))
    .await
}

fn fetch_failed(e: RpcError) -> QuoteError {
    error!(error = ?e, "Chain read failed while quoting");
    QuoteError::reserve_fetch_failed(e.to_string())
}
