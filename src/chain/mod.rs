// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The boundary between the caching core and the blockchain node
//!
//! Everything the core needs from the chain goes through [`ChainClient`]. The
//! core only awaits these calls and treats any error as "it failed", so
//! swapping the node transport, or a test double, touches nothing else.
//!
//! [`UniswapV2Client`] is the production implementation on top of an alloy
//! [`Provider`](alloy_provider::Provider).

use alloy_primitives::{Address, U256};
use async_trait::async_trait;

use crate::errors::RpcError;

mod uniswap_v2;

pub use uniswap_v2::UniswapV2Client;

/// Reserve snapshot of a pair, in the pair's own token order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairReserves {
    /// Reserve of `token0`
    pub reserve0: U256,
    /// Reserve of the other token
    pub reserve1: U256,
    /// Address of the pair's first token; pairs sort their tokens by address
    pub token0: Address,
}

impl PairReserves {
    /// Orient the reserves for a swap of `from` into `to`.
    ///
    /// Returns `(reserve_in, reserve_out)`, or `None` if neither `from` nor `to`
    /// is `token0`, which means the snapshot does not belong to this pair.
    pub fn oriented(&self, from: Address, to: Address) -> Option<(U256, U256)> {
        if self.token0 == from {
            Some((self.reserve0, self.reserve1))
        } else if self.token0 == to {
            Some((self.reserve1, self.reserve0))
        } else {
            None
        }
    }
}

/// Read-only access to the chain state needed for quotes.
///
/// All methods may suspend on network I/O and may fail with any [`RpcError`].
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Resolve the pair contract for two tokens.
    ///
    /// Returns [`Address::ZERO`] when no pair exists.
    async fn resolve_pair(&self, token_a: Address, token_b: Address) -> Result<Address, RpcError>;

    /// Fetch reserves and token ordering for a pair contract.
    async fn get_reserves(&self, pair: Address) -> Result<PairReserves, RpcError>;

    /// Fetch the current network gas price in wei.
    async fn get_gas_price(&self) -> Result<u128, RpcError>;
}
