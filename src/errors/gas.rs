// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the gas price monitor lifecycle.
//!
//! Refresh failures are not represented here: they are logged by the monitor and
//! never reach a caller. Only misuse of the `start`/`stop` state machine is.

/// Errors returned by [`GasPriceMonitor`](crate::GasPriceMonitor) lifecycle calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GasMonitorError {
    /// `start` was called on a monitor that is already running.
    #[error("Gas price monitor is already running")]
    AlreadyStarted,

    /// `start` was called on a monitor that has been stopped.
    ///
    /// A stopped monitor keeps serving its last value but cannot be restarted;
    /// build a new one instead.
    #[error("Gas price monitor has been stopped")]
    Stopped,
}
