// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Gas price and Uniswap V2 swap quotes for Ethereum, with caching.
//!
//! - [`GasPriceMonitor`] keeps the network gas price fresh in the background
//! - [`SwapEstimator`] prices a swap through a single constant-product pair
//!   and caches each quote in a [`TtlCache`]
//! - [`estimate_amount_out`] is the pure pricing formula underneath
//!
//! Chain access goes through the [`ChainClient`] trait; [`UniswapV2Client`]
//! implements it over any alloy provider.

mod api;
pub mod bootstrap;
mod cache;
mod chain;
mod config;
mod errors;
mod gas;
mod math;
mod provider;
mod swap;
mod tracing;
mod types;

pub use api::*;
pub use cache::*;
pub use chain::*;
pub use config::constants::*;
pub use config::*;
pub use errors::*;
pub use gas::*;
pub use math::*;
pub use provider::*;
pub use swap::*;
pub use types::*;
