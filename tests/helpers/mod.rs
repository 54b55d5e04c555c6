// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for semioquote integration tests
//!
//! Provides a mock [`ChainClient`] so the quote and gas paths can be tested
//! without a node.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use alloy_primitives::{address, Address, U256};
use async_trait::async_trait;
use semioquote::{ChainClient, PairReserves, RpcError};

pub const UNI: &str = "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984";
pub const WETH: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";
pub const UNI_ADDRESS: Address = address!("1f9840a85d5af5bf1d1762f925bdaddc4201f984");
pub const WETH_ADDRESS: Address = address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
pub const UNI_WETH_PAIR: Address = address!("d3d2e2692501a5c9ca623199d38826e513033a17");

/// 1000 tokens at 18 decimals
pub const THOUSAND: u128 = 1_000_000_000_000_000_000_000;

/// Build a reserve snapshot
pub fn reserves(token0: Address, reserve0: u128, reserve1: u128) -> PairReserves {
    PairReserves {
        reserve0: U256::from(reserve0),
        reserve1: U256::from(reserve1),
        token0,
    }
}

fn failure(operation: &str, message: &str) -> RpcError {
    RpcError::chain_call_failed(operation, std::io::Error::other(message.to_string()))
}

/// Mock ChainClient for testing the estimator and gas monitor
///
/// Pairs, reserves and gas prices are all scripted; every call is counted.
///
/// # Example
///
/// ```rust,ignore
/// let mock = MockChainClient::new()
///     .with_pair(UNI_ADDRESS, WETH_ADDRESS, UNI_WETH_PAIR)
///     .with_reserves(UNI_WETH_PAIR, reserves(UNI_ADDRESS, THOUSAND, 2 * THOUSAND))
///     .with_latency(Duration::from_millis(100));
/// ```
#[derive(Default)]
pub struct MockChainClient {
    pairs: HashMap<(Address, Address), Address>,
    reserves: Mutex<HashMap<Address, Result<PairReserves, String>>>,
    resolve_failure: Option<String>,
    gas_script: Mutex<VecDeque<Result<u128, String>>>,
    latency: Duration,
    resolve_calls: AtomicUsize,
    reserve_calls: AtomicUsize,
    gas_calls: AtomicUsize,
}

impl MockChainClient {
    /// Create a client with no pairs and no gas prices
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pair for both token orders
    pub fn with_pair(mut self, token_a: Address, token_b: Address, pair: Address) -> Self {
        self.pairs.insert((token_a, token_b), pair);
        self.pairs.insert((token_b, token_a), pair);
        self
    }

    /// Set the reserves returned for `pair`
    pub fn with_reserves(self, pair: Address, reserves: PairReserves) -> Self {
        self.set_reserves(pair, reserves);
        self
    }

    /// Make `get_reserves(pair)` fail
    pub fn with_reserve_failure(self, pair: Address, message: &str) -> Self {
        self.reserves
            .lock()
            .unwrap()
            .insert(pair, Err(message.to_string()));
        self
    }

    /// Make every `resolve_pair` call fail
    pub fn with_resolve_failure(mut self, message: &str) -> Self {
        self.resolve_failure = Some(message.to_string());
        self
    }

    /// Script gas price responses. The last entry repeats once the rest are used.
    pub fn with_gas_script(self, script: Vec<Result<u128, &str>>) -> Self {
        *self.gas_script.lock().unwrap() = script
            .into_iter()
            .map(|r| r.map_err(str::to_string))
            .collect();
        self
    }

    /// Delay every call by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Replace the reserves for `pair` on a shared client
    pub fn set_reserves(&self, pair: Address, reserves: PairReserves) {
        self.reserves.lock().unwrap().insert(pair, Ok(reserves));
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    pub fn reserve_calls(&self) -> usize {
        self.reserve_calls.load(Ordering::SeqCst)
    }

    pub fn gas_calls(&self) -> usize {
        self.gas_calls.load(Ordering::SeqCst)
    }

    /// Total chain calls of any kind
    pub fn total_calls(&self) -> usize {
        self.resolve_calls() + self.reserve_calls() + self.gas_calls()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn resolve_pair(&self, token_a: Address, token_b: Address) -> Result<Address, RpcError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        if let Some(message) = &self.resolve_failure {
            return Err(failure("getPair", message));
        }
        Ok(self
            .pairs
            .get(&(token_a, token_b))
            .copied()
            .unwrap_or(Address::ZERO))
    }

    async fn get_reserves(&self, pair: Address) -> Result<PairReserves, RpcError> {
        self.reserve_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        let entry = self.reserves.lock().unwrap().get(&pair).cloned();
        match entry {
            Some(Ok(reserves)) => Ok(reserves),
            Some(Err(message)) => Err(failure("getReserves", &message)),
            None => Err(RpcError::malformed_response(
                "getReserves",
                format!("no contract at {pair}"),
            )),
        }
    }

    async fn get_gas_price(&self) -> Result<u128, RpcError> {
        self.gas_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        let next = {
            let mut script = self.gas_script.lock().unwrap();
            if script.len() > 1 {
                script.pop_front()
            } else {
                script.front().cloned()
            }
        };
        match next {
            Some(Ok(price)) => Ok(price),
            Some(Err(message)) => Err(failure("eth_gasPrice", &message)),
            None => Err(RpcError::malformed_response("eth_gasPrice", "no price scripted")),
        }
    }
}
