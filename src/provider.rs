// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider factory for the HTTP node connection

use alloy_network::Ethereum;
use alloy_provider::ProviderBuilder;
use alloy_rpc_client::ClientBuilder;

use crate::errors::RpcError;

/// Type alias for an HTTP provider using the Ethereum network
pub type EthereumHttpProvider = alloy_provider::RootProvider<Ethereum>;

/// Create an HTTP provider for `url`.
///
/// Recommended fillers are disabled: every call this crate makes is a read,
/// so nonce/gas/chain-id filling would only add round trips.
///
/// # Errors
///
/// Returns [`RpcError::ProviderUrlInvalid`] if the URL cannot be parsed.
pub fn create_http_provider(url: &str) -> Result<EthereumHttpProvider, RpcError> {
    let url: url::Url = url
        .parse()
        .map_err(|e| RpcError::ProviderUrlInvalid(format!("{e}")))?;

    let client = ClientBuilder::default().http(url);

    Ok(ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_client(client))
}
