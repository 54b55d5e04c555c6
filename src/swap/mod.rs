// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Swap quoting.
//!
//! ## Public API
//!
//! - [`SwapEstimator`] - Validates, resolves the pair and prices a swap, with caching
//! - [`SwapEstimate`] - Cached quote: raw output, formatted output and pair
//! - [`SwapQuoteKey`] - Cache key for a quote

mod estimator;

pub use estimator::{SwapEstimate, SwapEstimator, SwapQuoteKey};
