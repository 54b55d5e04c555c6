// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for loading configuration from the environment.

/// Errors that can occur while building a [`QuoteConfig`](crate::QuoteConfig)
/// from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("Missing required environment variable {key}")]
    Missing {
        /// Variable name
        key: String,
    },

    /// A variable is set but its value cannot be used.
    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        /// Variable name
        key: String,
        /// The rejected value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

impl ConfigError {
    /// Create a `Missing` error for a variable.
    pub fn missing(key: impl Into<String>) -> Self {
        ConfigError::Missing { key: key.into() }
    }

    /// Create an `Invalid` error for a variable.
    pub fn invalid(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::Invalid {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
