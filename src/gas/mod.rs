// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Gas price domain.
//!
//! ## Public API
//!
//! - [`GasPriceMonitor`] - Background-refreshed gas price, read without I/O
//! - [`MonitorState`] - Lifecycle of the monitor

mod monitor;

pub use monitor::{GasPriceMonitor, MonitorState, MIN_REFRESH_INTERVAL};
