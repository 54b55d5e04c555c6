// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! [`ChainClient`] backed by a Uniswap V2 factory and an alloy provider

use std::marker::PhantomData;

use alloy_network::{Ethereum, Network};
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use async_trait::async_trait;
use tracing::trace;

use super::{ChainClient, PairReserves};
use crate::errors::RpcError;

alloy_sol_types::sol! {
    #[sol(rpc)]
    interface IUniswapV2Factory {
        function getPair(address tokenA, address tokenB) external view returns (address pair);
    }

    #[sol(rpc)]
    interface IUniswapV2Pair {
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);
        function token0() external view returns (address);
    }
}

/// Reads pair addresses, reserves and gas price from an EVM node.
///
/// # Examples
///
/// ```rust,ignore
/// use semioquote::{create_http_provider, UniswapV2Client, UNISWAP_V2_FACTORY};
///
/// let provider = create_http_provider("https://eth.llamarpc.com")?;
/// let client = UniswapV2Client::new(provider, UNISWAP_V2_FACTORY);
/// let pair = client.resolve_pair(uni, weth).await?;
/// ```
#[derive(Debug, Clone)]
pub struct UniswapV2Client<P, N = Ethereum> {
    provider: P,
    factory: Address,
    _network: PhantomData<fn() -> N>,
}

impl<P, N> UniswapV2Client<P, N>
where
    P: Provider<N>,
    N: Network,
{
    /// Create a client that resolves pairs through `factory`.
    pub fn new(provider: P, factory: Address) -> Self {
        Self {
            provider,
            factory,
            _network: PhantomData,
        }
    }

    /// The factory this client resolves pairs through.
    pub fn factory(&self) -> Address {
        self.factory
    }
}

#[async_trait]
impl<P, N> ChainClient for UniswapV2Client<P, N>
where
    P: Provider<N> + Send + Sync,
    N: Network,
{
    async fn resolve_pair(&self, token_a: Address, token_b: Address) -> Result<Address, RpcError> {
        trace!(factory = %self.factory, %token_a, %token_b, "getPair");
        let factory = IUniswapV2Factory::new(self.factory, &self.provider);
        factory
            .getPair(token_a, token_b)
            .call()
            .await
            .map_err(|e| RpcError::chain_call_failed("getPair", e))
    }

    async fn get_reserves(&self, pair: Address) -> Result<PairReserves, RpcError> {
        trace!(%pair, "getReserves + token0");
        let contract = IUniswapV2Pair::new(pair, &self.provider);
        let reserves_call = contract.getReserves();
        let token0_call = contract.token0();

        let (reserves, token0) = futures::try_join!(
            async {
                reserves_call
                    .call()
                    .await
                    .map_err(|e| RpcError::chain_call_failed("getReserves", e))
            },
            async {
                token0_call
                    .call()
                    .await
                    .map_err(|e| RpcError::chain_call_failed("token0", e))
            },
        )?;

        Ok(PairReserves {
            reserve0: U256::from(reserves.reserve0),
            reserve1: U256::from(reserves.reserve1),
            token0,
        })
    }

    async fn get_gas_price(&self) -> Result<u128, RpcError> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| RpcError::chain_call_failed("eth_gasPrice", e))
    }
}
