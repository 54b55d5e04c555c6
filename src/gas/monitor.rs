// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Background-refreshed gas price
//!
//! [`GasPriceMonitor`] fetches the network gas price once on [`start`], then
//! again on every tick of a fixed interval. Reads never touch the network:
//! [`read`] returns whatever the last successful refresh stored, or
//! [`GasPrice::ZERO`] if none has succeeded yet.
//!
//! A failed refresh is logged and otherwise ignored. The previous value stays
//! in place and the timer keeps running.
//!
//! [`start`]: GasPriceMonitor::start
//! [`read`]: GasPriceMonitor::read

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn, Instrument};

use crate::chain::ChainClient;
use crate::errors::{GasMonitorError, RpcError};
use crate::tracing::spans;
use crate::types::GasPrice;

/// Shortest refresh interval the monitor will arm.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(1);

/// Lifecycle of a [`GasPriceMonitor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Constructed, `start` not called yet
    Uninitialized,
    /// Initial fetch attempted and the refresh timer is armed
    Running,
    /// Timer cancelled; reads return the last stored value
    Stopped,
}

struct Lifecycle {
    state: MonitorState,
    task: Option<JoinHandle<()>>,
}

struct Refresher {
    client: Arc<dyn ChainClient>,
    price: watch::Sender<GasPrice>,
}

impl Refresher {
    async fn refresh(&self) -> Result<GasPrice, RpcError> {
        async {
            match self.client.get_gas_price().await {
                Ok(wei) => {
                    let price = GasPrice::new(wei);
                    self.price.send_replace(price);
                    debug!(gas_price = %price, "Gas price refreshed");
                    Ok(price)
                }
                Err(e) => {
                    let previous = *self.price.borrow();
                    warn!(
                        error = %e,
                        previous = %previous,
                        "Gas price refresh failed, keeping previous value"
                    );
                    Err(e)
                }
            }
        }
        .instrument(spans::refresh_gas_price())
        .await
    }
}

/// Periodically refreshed gas price cache
///
/// # Example
///
/// ```rust,ignore
/// let monitor = GasPriceMonitor::new(client, Duration::from_secs(30));
/// monitor.start().await?;
/// let price = monitor.read();
/// if price.is_available() {
///     println!("gas: {price}");
/// }
/// ```
pub struct GasPriceMonitor {
    refresher: Arc<Refresher>,
    interval: Duration,
    lifecycle: Mutex<Lifecycle>,
}

impl std::fmt::Debug for GasPriceMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GasPriceMonitor")
            .field("interval", &self.interval)
            .field("state", &self.state())
            .field("price", &self.read())
            .finish()
    }
}

impl GasPriceMonitor {
    /// Create a monitor that refreshes every `interval`.
    ///
    /// Intervals below [`MIN_REFRESH_INTERVAL`] are raised to it. Nothing is
    /// fetched until [`start`](Self::start).
    pub fn new(client: Arc<dyn ChainClient>, interval: Duration) -> Self {
        let (price, _) = watch::channel(GasPrice::ZERO);
        Self {
            refresher: Arc::new(Refresher { client, price }),
            interval: interval.max(MIN_REFRESH_INTERVAL),
            lifecycle: Mutex::new(Lifecycle {
                state: MonitorState::Uninitialized,
                task: None,
            }),
        }
    }

    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch once, then arm the refresh timer.
    ///
    /// Returns after the first fetch has finished. If that fetch failed the
    /// monitor still runs and [`read`](Self::read) returns [`GasPrice::ZERO`]
    /// until a later tick succeeds.
    ///
    /// The fetch and the timer run on one background task, so dropping this
    /// future early leaves a running monitor behind; the first value simply
    /// lands later.
    ///
    /// # Errors
    ///
    /// - [`GasMonitorError::AlreadyStarted`] if the monitor is running
    /// - [`GasMonitorError::Stopped`] if it was stopped, including by a
    ///   concurrent [`stop`](Self::stop) during the first fetch
    pub async fn start(&self) -> Result<(), GasMonitorError> {
        let first_fetch = {
            let mut lifecycle = self.lifecycle();
            match lifecycle.state {
                MonitorState::Uninitialized => {}
                MonitorState::Running => return Err(GasMonitorError::AlreadyStarted),
                MonitorState::Stopped => return Err(GasMonitorError::Stopped),
            }

            let (fetched, first_fetch) = oneshot::channel();
            let refresher = Arc::clone(&self.refresher);
            let period = self.interval;
            lifecycle.task = Some(tokio::spawn(async move {
                // Failures are already logged by the refresher.
                let _ = refresher.refresh().await;
                let _ = fetched.send(());

                let mut ticker = time::interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    let _ = refresher.refresh().await;
                }
            }));
            lifecycle.state = MonitorState::Running;
            first_fetch
        };

        // The sender only goes away unsent if the task was aborted by `stop`.
        if first_fetch.await.is_err() {
            return Err(GasMonitorError::Stopped);
        }

        info!(
            interval_ms = self.interval.as_millis() as u64,
            gas_price = %self.read(),
            "Gas price monitor started"
        );
        Ok(())
    }

    /// Cancel the refresh timer. The last stored value stays readable.
    ///
    /// Stopping is permanent and idempotent.
    pub fn stop(&self) {
        let mut lifecycle = self.lifecycle();
        if let Some(task) = lifecycle.task.take() {
            task.abort();
        }
        if lifecycle.state != MonitorState::Stopped {
            lifecycle.state = MonitorState::Stopped;
            info!("Gas price monitor stopped");
        }
    }

    /// Current gas price; [`GasPrice::ZERO`] means not yet available.
    pub fn read(&self) -> GasPrice {
        *self.refresher.price.borrow()
    }

    /// Receiver notified on every successful refresh.
    pub fn subscribe(&self) -> watch::Receiver<GasPrice> {
        self.refresher.price.subscribe()
    }

    /// Current lifecycle state
    pub fn state(&self) -> MonitorState {
        self.lifecycle().state
    }

    /// Configured refresh interval
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Drop for GasPriceMonitor {
    fn drop(&mut self) {
        if let Some(task) = self.lifecycle().task.take() {
            task.abort();
        }
    }
}
