// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the semioquote library.
//!
//! Like the rest of the crate this follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained handling ([`QuoteError`],
//!   [`GasMonitorError`], [`RpcError`], [`ConfigError`])
//! - **Unified error type** ([`SemioquoteError`]) when you don't need to
//!   distinguish between error sources
//!
//! # Examples
//!
//! ```rust,ignore
//! use semioquote::{QuoteError, SwapEstimator};
//!
//! async fn example(estimator: &SwapEstimator) {
//!     match estimator.estimate(from, to, "1.5").await {
//!         Ok(amount) => println!("You get {amount}"),
//!         Err(QuoteError::PairNotFound { .. }) => eprintln!("No market for that pair"),
//!         Err(QuoteError::ReserveFetchFailed { details }) => {
//!             eprintln!("Chain read failed, try again later: {details}");
//!         }
//!         Err(e) => eprintln!("Bad request: {e}"),
//!     }
//! }
//! ```

mod config;
mod gas;
mod quote;
mod rpc;

pub use config::ConfigError;
pub use gas::GasMonitorError;
pub use quote::QuoteError;
pub use rpc::RpcError;

/// Unified error type for all semioquote operations.
///
/// All module-specific error types convert into `SemioquoteError` via `From`,
/// so `?` works across module boundaries.
#[derive(Debug, thiserror::Error)]
pub enum SemioquoteError {
    /// Error from a swap quote.
    #[error("Quote error: {0}")]
    Quote(#[from] QuoteError),

    /// Error from a chain RPC call.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Error from the gas price monitor lifecycle.
    #[error("Gas monitor error: {0}")]
    GasMonitor(#[from] GasMonitorError),

    /// Error from loading configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
