// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    api::{serve_api, AppState},
    chain::{ChainClient, UniswapV2Client},
    config::QuoteConfig,
    gas::GasPriceMonitor,
    provider::create_http_provider,
    swap::SwapEstimator,
};

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = QuoteConfig::from_env().context("Failed to load configuration")?;
    info!(
        factory = %config.factory_address,
        quote_ttl_ms = config.quote_ttl.as_millis() as u64,
        gas_refresh_ms = config.gas_refresh_interval.as_millis() as u64,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(("0.0.0.0", config.api_port))
        .await
        .with_context(|| format!("Failed to bind API port {}", config.api_port))?;

    let provider = create_http_provider(&config.rpc_url)?;
    let client: Arc<dyn ChainClient> =
        Arc::new(UniswapV2Client::new(provider, config.factory_address));

    let gas = Arc::new(GasPriceMonitor::new(
        Arc::clone(&client),
        config.gas_refresh_interval,
    ));
    gas.start().await?;

    let estimator = Arc::new(
        SwapEstimator::new(client, config.quote_ttl).with_amount_decimals(config.amount_decimals),
    );

    let result = serve_api(listener, AppState::new(Arc::clone(&gas), estimator)).await;
    gas.stop();
    result
}
