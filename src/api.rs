// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP surface
//!
//! - `GET /gasPrice` returns `{"gasPrice": <wei>}`
//! - `GET /return/{fromTokenAddress}/{toTokenAddress}/{amountIn}` returns
//!   `{"estimatedOutputAmount": "<decimal>"}`
//!
//! Every quote failure is answered with `400` and a
//! `{"statusCode", "message", "error"}` body.

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;

use crate::errors::QuoteError;
use crate::gas::GasPriceMonitor;
use crate::swap::SwapEstimator;
use crate::types::GasPrice;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Background-refreshed gas price
    pub gas: Arc<GasPriceMonitor>,
    /// Swap quoting with its cache
    pub estimator: Arc<SwapEstimator>,
}

impl AppState {
    /// Bundle the two services for the router
    pub fn new(gas: Arc<GasPriceMonitor>, estimator: Arc<SwapEstimator>) -> Self {
        Self { gas, estimator }
    }
}

/// Body of `GET /gasPrice`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasPriceResponse {
    /// Gas price in wei; `0` until the first refresh succeeds
    pub gas_price: GasPrice,
}

/// Body of `GET /return/...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedAmountOutResponse {
    /// Output amount as a decimal string
    pub estimated_output_amount: String,
}

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP status code, repeated in the body
    pub status_code: u16,
    /// Human-readable failure description
    pub message: String,
    /// Status reason phrase
    pub error: String,
}

/// A [`QuoteError`] rendered as an HTTP response
#[derive(Debug)]
pub struct ApiError(QuoteError);

impl From<QuoteError> for ApiError {
    fn from(error: QuoteError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_fault() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = ErrorResponse {
            status_code: status.as_u16(),
            message: self.0.to_string(),
            error: status.canonical_reason().unwrap_or_default().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

async fn get_gas_price(State(state): State<AppState>) -> Json<GasPriceResponse> {
    Json(GasPriceResponse {
        gas_price: state.gas.read(),
    })
}

async fn get_estimated_amount_out(
    State(state): State<AppState>,
    Path((from, to, amount_in)): Path<(String, String, String)>,
) -> Result<Json<EstimatedAmountOutResponse>, ApiError> {
    let estimated_output_amount = state.estimator.estimate(&from, &to, &amount_in).await?;
    Ok(Json(EstimatedAmountOutResponse {
        estimated_output_amount,
    }))
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    info!(%method, %uri, "Request started");

    let response = next.run(request).await;

    info!(%method, %uri, status = response.status().as_u16(), "Request finished");
    response
}

/// Build the router with request logging.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/gasPrice", get(get_gas_price))
        .route(
            "/return/{fromTokenAddress}/{toTokenAddress}/{amountIn}",
            get(get_estimated_amount_out),
        )
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Starts the API server.
pub async fn serve_api(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    let app = router(state);

    let addr = listener.local_addr()?;

    tracing::info!(address = ?addr, "Starting server");

    axum::serve(listener, app).await?;

    Ok(())
}
