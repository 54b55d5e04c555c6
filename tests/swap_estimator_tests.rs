// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests for SwapEstimator against a mock chain
//!
//! Covers validation ordering (no chain call for bad input), error
//! classification, reserve orientation and the quote cache.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, U256};
use futures::future::join_all;
use helpers::*;
use semioquote::{ChainClient, QuoteError, SwapEstimator};

const TTL: Duration = Duration::from_secs(60);

/// Quote of 1 UNI in a 1000 UNI / 2000 WETH pool
const ONE_UNI_OUT: &str = "0.001993998011983982";

fn uni_weth_client() -> MockChainClient {
    MockChainClient::new()
        .with_pair(UNI_ADDRESS, WETH_ADDRESS, UNI_WETH_PAIR)
        .with_reserves(UNI_WETH_PAIR, reserves(UNI_ADDRESS, THOUSAND, 2 * THOUSAND))
}

fn estimator(client: &Arc<MockChainClient>) -> SwapEstimator {
    let chain: Arc<dyn ChainClient> = client.clone();
    SwapEstimator::new(chain, TTL)
}

#[tokio::test]
async fn test_estimate_prices_swap() {
    let client = Arc::new(uni_weth_client());
    let estimator = estimator(&client);

    let out = estimator.estimate(UNI, WETH, "1").await.unwrap();
    assert_eq!(out, ONE_UNI_OUT);
    assert_eq!(client.resolve_calls(), 1);
    assert_eq!(client.reserve_calls(), 1);
}

#[tokio::test]
async fn test_reverse_direction_uses_swapped_reserves() {
    let client = Arc::new(uni_weth_client());
    let estimator = estimator(&client);

    let detailed = estimator.estimate_detailed(WETH, UNI, "2").await.unwrap();
    // reserve_in = 2000 WETH, reserve_out = 1000 UNI
    assert_eq!(detailed.pair, UNI_WETH_PAIR);
    assert_eq!(detailed.amount_out, U256::from(996_999_005_991_991u128));
}

#[tokio::test]
async fn test_addresses_compare_case_insensitively() {
    let client = Arc::new(uni_weth_client());
    let estimator = estimator(&client);

    let lower = estimator
        .estimate(&UNI.to_lowercase(), &WETH.to_uppercase().replace("0X", "0x"), "1")
        .await
        .unwrap();
    assert_eq!(lower, ONE_UNI_OUT);
}

#[tokio::test]
async fn test_invalid_address_makes_no_chain_call() {
    let client = Arc::new(uni_weth_client());
    let estimator = estimator(&client);

    for (from, to) in [
        ("not-a-valid-address", WETH),
        (UNI, "not-a-valid-address"),
        ("0x1234", WETH),
        (UNI, "0xZZ9840a85d5aF5bf1D1762F925BDADdC4201F984"),
    ] {
        let err = estimator.estimate(from, to, "1").await.unwrap_err();
        assert!(
            matches!(err, QuoteError::InvalidAddress { .. }),
            "{from} -> {to} gave {err:?}"
        );
    }
    assert_eq!(client.total_calls(), 0);
}

#[tokio::test]
async fn test_invalid_amount_makes_no_chain_call() {
    let client = Arc::new(uni_weth_client());
    let estimator = estimator(&client);

    for amount in ["0", "0.000", "abc", "-1", "1e18", "1.2.3", "", "0.1234567890123456789"] {
        let err = estimator.estimate(UNI, WETH, amount).await.unwrap_err();
        assert!(
            matches!(err, QuoteError::InvalidAmount { .. }),
            "{amount:?} gave {err:?}"
        );
    }
    assert_eq!(client.total_calls(), 0);
}

#[tokio::test]
async fn test_zero_pair_address_is_pair_not_found() {
    let client = Arc::new(uni_weth_client());
    let estimator = estimator(&client);
    let dai = "0x6B175474E89094C44Da98b954EedeAC495271d0F";

    let err = estimator.estimate(UNI, dai, "1").await.unwrap_err();
    assert!(matches!(err, QuoteError::PairNotFound { from, .. } if from == UNI_ADDRESS));
    assert_eq!(client.reserve_calls(), 0);
}

#[tokio::test]
async fn test_resolve_failure_is_reserve_fetch_failed() {
    let client = Arc::new(uni_weth_client().with_resolve_failure("connection refused"));
    let estimator = estimator(&client);

    let err = estimator.estimate(UNI, WETH, "1").await.unwrap_err();
    assert!(matches!(err, QuoteError::ReserveFetchFailed { .. }));
}

#[tokio::test]
async fn test_reserve_failure_is_not_cached() {
    let client = Arc::new(
        MockChainClient::new()
            .with_pair(UNI_ADDRESS, WETH_ADDRESS, UNI_WETH_PAIR)
            .with_reserve_failure(UNI_WETH_PAIR, "timeout"),
    );
    let estimator = estimator(&client);

    let err = estimator.estimate(UNI, WETH, "1").await.unwrap_err();
    assert!(matches!(err, QuoteError::ReserveFetchFailed { .. }));

    client.set_reserves(UNI_WETH_PAIR, reserves(UNI_ADDRESS, THOUSAND, 2 * THOUSAND));
    assert_eq!(estimator.estimate(UNI, WETH, "1").await.unwrap(), ONE_UNI_OUT);
    assert_eq!(client.reserve_calls(), 2);
}

#[tokio::test]
async fn test_empty_pool_is_insufficient_liquidity() {
    let client = Arc::new(
        MockChainClient::new()
            .with_pair(UNI_ADDRESS, WETH_ADDRESS, UNI_WETH_PAIR)
            .with_reserves(UNI_WETH_PAIR, reserves(UNI_ADDRESS, THOUSAND, 0)),
    );
    let estimator = estimator(&client);

    let err = estimator.estimate(UNI, WETH, "1").await.unwrap_err();
    assert_eq!(err, QuoteError::InsufficientLiquidity);
}

#[tokio::test]
async fn test_mismatched_token0_is_reserve_fetch_failed() {
    let client = Arc::new(
        MockChainClient::new()
            .with_pair(UNI_ADDRESS, WETH_ADDRESS, UNI_WETH_PAIR)
            .with_reserves(UNI_WETH_PAIR, reserves(Address::repeat_byte(0x42), THOUSAND, THOUSAND)),
    );
    let estimator = estimator(&client);

    let err = estimator.estimate(UNI, WETH, "1").await.unwrap_err();
    assert!(matches!(err, QuoteError::ReserveFetchFailed { .. }));
}

#[tokio::test]
async fn test_repeat_quote_served_from_cache() {
    let client = Arc::new(uni_weth_client());
    let estimator = estimator(&client);

    for _ in 0..3 {
        assert_eq!(estimator.estimate(UNI, WETH, "1").await.unwrap(), ONE_UNI_OUT);
    }

    // The pair is resolved on every request; reserves only on the miss
    assert_eq!(client.resolve_calls(), 3);
    assert_eq!(client.reserve_calls(), 1);
    assert_eq!(estimator.cache_stats().hits, 2);
}

#[tokio::test]
async fn test_amount_spelling_is_part_of_the_key() {
    let client = Arc::new(uni_weth_client());
    let estimator = estimator(&client);

    let plain = estimator.estimate(UNI, WETH, "1").await.unwrap();
    let padded = estimator.estimate(UNI, WETH, "1.0").await.unwrap();
    let leading = estimator.estimate(UNI, WETH, "01").await.unwrap();

    assert_eq!(plain, padded);
    assert_eq!(plain, leading);
    assert_eq!(client.reserve_calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_requests_share_one_reserve_read() {
    let client = Arc::new(uni_weth_client().with_latency(Duration::from_millis(200)));
    let estimator = Arc::new(estimator(&client));

    let requests = (0..16).map(|_| {
        let estimator = Arc::clone(&estimator);
        tokio::spawn(async move { estimator.estimate(UNI, WETH, "1").await })
    });
    let results = join_all(requests).await;

    for result in results {
        assert_eq!(result.unwrap().unwrap(), ONE_UNI_OUT);
    }
    assert_eq!(client.resolve_calls(), 16);
    assert_eq!(client.reserve_calls(), 1);
    assert_eq!(estimator.cache_stats().loads, 1);
}

#[tokio::test(start_paused = true)]
async fn test_quote_reloads_after_ttl() {
    let client = Arc::new(uni_weth_client());
    let estimator = estimator(&client);

    assert_eq!(estimator.estimate(UNI, WETH, "1").await.unwrap(), ONE_UNI_OUT);

    client.set_reserves(UNI_WETH_PAIR, reserves(UNI_ADDRESS, THOUSAND, THOUSAND));
    tokio::time::advance(TTL - Duration::from_secs(1)).await;
    assert_eq!(estimator.estimate(UNI, WETH, "1").await.unwrap(), ONE_UNI_OUT);

    tokio::time::advance(Duration::from_secs(1)).await;
    let refreshed = estimator.estimate(UNI, WETH, "1").await.unwrap();
    assert_ne!(refreshed, ONE_UNI_OUT);
    assert_eq!(client.reserve_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_stale_quotes_for_one_off_amounts_are_dropped() {
    let client = Arc::new(uni_weth_client());
    let estimator = estimator(&client);

    for amount in 1..=500u32 {
        estimator.estimate(UNI, WETH, &amount.to_string()).await.unwrap();
    }
    tokio::time::advance(Duration::from_secs(3600)).await;
    for amount in 501..=1000u32 {
        estimator.estimate(UNI, WETH, &amount.to_string()).await.unwrap();
    }

    let stats = estimator.cache_stats();
    assert_eq!(stats.loads, 1000);
    assert_eq!(stats.expirations, 500);
}
