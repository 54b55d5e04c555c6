// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Caching infrastructure.
//!
//! [`TtlCache`] backs the swap quote path: entries expire after a fixed
//! lifetime and concurrent misses for one key collapse into a single load.

mod ttl;

pub use ttl::{CacheLoadError, CacheStats, TtlCache};
