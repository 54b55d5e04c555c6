// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared RPC error types for chain client operations.
//!
//! Every call a [`ChainClient`](crate::ChainClient) makes to the node can fail
//! with one of these. Callers above the chain client never branch on the
//! failure shape: the swap estimator folds them into
//! [`QuoteError::ReserveFetchFailed`](crate::QuoteError::ReserveFetchFailed) and
//! the gas price monitor logs them and keeps its previous value.

/// Errors that can occur while talking to the blockchain node.
///
/// # Examples
///
/// ```rust
/// use semioquote::RpcError;
///
/// let error = RpcError::malformed_response("getReserves", "empty return data");
/// assert!(error.to_string().contains("getReserves"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The RPC call itself failed (network error, timeout, revert, provider down).
    #[error("Chain call failed during {operation}")]
    ChainCallFailed {
        /// Description of the operation that failed (e.g. "getPair")
        operation: String,
        /// The underlying transport or contract error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The node answered, but the answer could not be interpreted.
    #[error("Malformed response for {operation}: {details}")]
    MalformedResponse {
        /// Description of the operation whose response was malformed
        operation: String,
        /// What was wrong with it
        details: String,
    },

    /// The configured RPC endpoint URL could not be parsed.
    #[error("Invalid provider URL: {0}")]
    ProviderUrlInvalid(String),
}

impl RpcError {
    /// Helper to create a `ChainCallFailed` error from any error type.
    pub fn chain_call_failed(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::ChainCallFailed {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `MalformedResponse` error.
    pub fn malformed_response(operation: impl Into<String>, details: impl Into<String>) -> Self {
        RpcError::MalformedResponse {
            operation: operation.into(),
            details: details.into(),
        }
    }
}
