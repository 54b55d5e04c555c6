// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for semioquote operations.
//!
//! Telemetry is kept apart from business logic: instead of `#[instrument]` on
//! each function, every instrumented operation has a helper here. The
//! operations are async and run on spawned tasks, so spans are attached with
//! [`tracing::Instrument`] rather than held across `.await` with `enter()`.
//!
//! Usage pattern:
//! ```rust,ignore
//! use tracing::Instrument;
//!
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param_value);
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(span)
//!     .await
//! }
//! ```

use alloy_primitives::Address;
use tracing::Span;

/// Create span for a swap estimate request.
///
/// This is the public entry point of the quote path.
///
/// Parent: None (root span for this operation, or the HTTP request span)
/// Children: load_swap_quote span on a cache miss
#[inline]
pub(crate) fn estimate_swap(from: &str, to: &str, amount_in: &str) -> Span {
    tracing::info_span!(
        "semioquote.estimate_swap",
        from = from,
        to = to,
        amount_in = amount_in,
    )
}

/// Create span for the cache loader that reads reserves and prices a swap.
///
/// Runs on the cache's load task, so it outlives the caller that started it.
///
/// Parent: estimate_swap span of the caller that missed
/// Children: chain client calls
#[inline]
pub(crate) fn load_swap_quote(pair: Address, from: Address, to: Address) -> Span {
    tracing::debug_span!(
        "semioquote.load_swap_quote",
        pair = %pair,
        from = %from,
        to = %to,
    )
}

/// Create span for one gas price refresh, timer-driven or manual.
///
/// Parent: None (background task)
/// Children: chain client gas price call
#[inline]
pub(crate) fn refresh_gas_price() -> Span {
    tracing::debug_span!("semioquote.refresh_gas_price")
}
