// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Keyed cache with per-entry expiry and single-flight loading
//!
//! Entries expire lazily: nothing evicts them in the background, a read after
//! the TTL simply treats the entry as absent. Writes sweep the whole table at
//! most once per default TTL, so keys that are never read again do not pile
//! up. [`TtlCache::purge_expired`] sweeps on demand.
//!
//! [`TtlCache::get_or_load`] guarantees that at most one load per key is in
//! flight at a time. The load runs on its own tokio task, so a caller that
//! stops polling does not cancel it; the result is still written back for the
//! next reader.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use tokio::time::Instant;
use tracing::trace;

/// Error returned by [`TtlCache::get_or_load`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheLoadError<E> {
    /// The loader itself failed. Every caller joined to that load sees the same error.
    #[error("{0}")]
    Loader(E),

    /// The load task panicked or was cancelled before producing a value.
    #[error("cache load aborted before completion")]
    Aborted,
}

/// Snapshot of cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads served from a live entry
    pub hits: u64,
    /// Reads that found nothing live
    pub misses: u64,
    /// Loader invocations started
    pub loads: u64,
    /// Callers that joined a load already in flight
    pub coalesced: u64,
    /// Entries dropped because their TTL had elapsed
    pub expirations: u64,
}

type SharedLoad<V, E> = Shared<BoxFuture<'static, Result<V, CacheLoadError<E>>>>;

enum Slot<V, E> {
    Ready {
        value: V,
        created_at: Instant,
        ttl: Duration,
    },
    Loading {
        id: u64,
        load: SharedLoad<V, E>,
    },
}

impl<V, E> Slot<V, E> {
    fn is_expired(&self, now: Instant) -> bool {
        match self {
            Slot::Ready {
                created_at, ttl, ..
            } => now.saturating_duration_since(*created_at) >= *ttl,
            Slot::Loading { .. } => false,
        }
    }
}

enum Lookup<V, E> {
    Hit(V),
    Join(SharedLoad<V, E>),
    Miss,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    loads: AtomicU64,
    coalesced: AtomicU64,
    expirations: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            loads: self.loads.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
        }
    }
}

struct Table<K, V, E> {
    slots: HashMap<K, Slot<V, E>>,
    swept_at: Instant,
}

impl<K, V, E> Table<K, V, E>
where
    K: Eq + Hash,
{
    /// Drop every expired entry and return how many went.
    fn sweep(&mut self, now: Instant) -> usize {
        let before = self.slots.len();
        self.slots.retain(|_, slot| !slot.is_expired(now));
        self.swept_at = now;
        before - self.slots.len()
    }
}

struct Inner<K, V, E> {
    table: Mutex<Table<K, V, E>>,
    next_load_id: AtomicU64,
    default_ttl: Duration,
    counters: Counters,
}

impl<K, V, E> Inner<K, V, E>
where
    K: Eq + Hash,
{
    fn lock(&self) -> MutexGuard<'_, Table<K, V, E>> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sweep(&self, table: &mut Table<K, V, E>, now: Instant) -> usize {
        let purged = table.sweep(now);
        self.counters
            .expirations
            .fetch_add(purged as u64, Ordering::Relaxed);
        purged
    }

    /// Sweep before an insert if a full default TTL has passed since the
    /// last sweep.
    fn sweep_if_due(&self, table: &mut Table<K, V, E>, now: Instant) {
        if now.saturating_duration_since(table.swept_at) >= self.default_ttl {
            let purged = self.sweep(table, now);
            if purged > 0 {
                trace!(purged, "swept expired cache entries");
            }
        }
    }

    /// Classify `key` under the lock. An expired value is removed here.
    fn lookup(&self, table: &mut Table<K, V, E>, key: &K, now: Instant) -> Lookup<V, E>
    where
        V: Clone,
    {
        match table.slots.get(key) {
            Some(slot @ Slot::Ready { value, .. }) if !slot.is_expired(now) => {
                return Lookup::Hit(value.clone());
            }
            Some(Slot::Loading { load, .. }) => return Lookup::Join(load.clone()),
            Some(Slot::Ready { .. }) => {}
            None => return Lookup::Miss,
        }
        table.slots.remove(key);
        Counters::bump(&self.counters.expirations);
        Lookup::Miss
    }

    /// Store the outcome of load `id`, unless the slot has since been
    /// overwritten by `set`, invalidated, or taken over by a newer load.
    fn complete(&self, key: K, id: u64, outcome: &Result<V, CacheLoadError<E>>, ttl: Duration)
    where
        V: Clone,
    {
        let mut table = self.lock();
        let still_ours = matches!(
            table.slots.get(&key),
            Some(Slot::Loading { id: current, .. }) if *current == id
        );
        if !still_ours {
            return;
        }
        match outcome {
            Ok(value) => {
                table.slots.insert(
                    key,
                    Slot::Ready {
                        value: value.clone(),
                        created_at: Instant::now(),
                        ttl,
                    },
                );
            }
            Err(_) => {
                table.slots.remove(&key);
            }
        }
    }
}

/// Keyed cache with lazy TTL expiry and single-flight loading
///
/// Cloning is cheap; clones share the same entries and counters.
///
/// # Type Parameters
///
/// * `K` - Cache key
/// * `V` - Cached value, cloned out to every reader
/// * `E` - Error type of the loaders passed to [`get_or_load`](Self::get_or_load)
pub struct TtlCache<K, V, E> {
    inner: Arc<Inner<K, V, E>>,
}

impl<K, V, E> Clone for TtlCache<K, V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V, E> fmt::Debug for TtlCache<K, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("default_ttl", &self.inner.default_ttl)
            .field("stats", &self.inner.counters.snapshot())
            .finish_non_exhaustive()
    }
}

impl<K, V, E> TtlCache<K, V, E>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create an empty cache. `default_ttl` is exposed to callers that do not
    /// pick a TTL per entry.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                table: Mutex::new(Table {
                    slots: HashMap::new(),
                    swept_at: Instant::now(),
                }),
                next_load_id: AtomicU64::new(0),
                default_ttl,
                counters: Counters::default(),
            }),
        }
    }

    /// TTL given at construction
    pub fn default_ttl(&self) -> Duration {
        self.inner.default_ttl
    }

    /// Return the live value for `key`, if any.
    ///
    /// Never waits on a load in progress. An expired entry found here is removed.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let mut table = self.inner.lock();
        let counters = &self.inner.counters;

        match self.inner.lookup(&mut table, key, now) {
            Lookup::Hit(value) => {
                Counters::bump(&counters.hits);
                Some(value)
            }
            Lookup::Join(_) | Lookup::Miss => {
                Counters::bump(&counters.misses);
                None
            }
        }
    }

    /// Store `value` under `key` for `ttl`, replacing whatever is there.
    ///
    /// A load in flight for the same key keeps running and still resolves for
    /// its awaiters, but its result is not written over this value.
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        let now = Instant::now();
        let mut table = self.inner.lock();
        self.inner.sweep_if_due(&mut table, now);
        table.slots.insert(
            key,
            Slot::Ready {
                value,
                created_at: now,
                ttl,
            },
        );
    }

    /// Return the live value for `key`, loading it with `loader` on a miss.
    ///
    /// Concurrent callers for the same key share one invocation of `loader`
    /// and all receive its result. A failed load caches nothing.
    ///
    /// `loader` is called without the cache lock held, so it may use this
    /// cache. If another caller starts a load for `key` meanwhile, the future
    /// `loader` returned is dropped unpolled and this call joins that load.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn get_or_load<F, Fut>(
        &self,
        key: K,
        ttl: Duration,
        loader: F,
    ) -> Result<V, CacheLoadError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        let counters = &self.inner.counters;

        let lookup = {
            let mut table = self.inner.lock();
            self.inner.lookup(&mut table, &key, Instant::now())
        };
        match lookup {
            Lookup::Hit(value) => {
                Counters::bump(&counters.hits);
                return Ok(value);
            }
            Lookup::Join(load) => {
                Counters::bump(&counters.coalesced);
                trace!("joining in-flight cache load");
                return load.await;
            }
            Lookup::Miss => {}
        }

        let fut = loader();

        let load = {
            let now = Instant::now();
            let mut table = self.inner.lock();
            match self.inner.lookup(&mut table, &key, now) {
                Lookup::Hit(value) => {
                    Counters::bump(&counters.hits);
                    return Ok(value);
                }
                Lookup::Join(load) => {
                    Counters::bump(&counters.coalesced);
                    trace!("joining cache load started while building ours");
                    load
                }
                Lookup::Miss => {
                    Counters::bump(&counters.misses);
                    Counters::bump(&counters.loads);
                    self.inner.sweep_if_due(&mut table, now);
                    let id = self.inner.next_load_id.fetch_add(1, Ordering::Relaxed);
                    let load = self.spawn_load(key.clone(), id, ttl, fut);
                    table.slots.insert(
                        key,
                        Slot::Loading {
                            id,
                            load: load.clone(),
                        },
                    );
                    load
                }
            }
        };

        load.await
    }

    fn spawn_load<Fut>(&self, key: K, id: u64, ttl: Duration, fut: Fut) -> SharedLoad<V, E>
    where
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let outcome = match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(e)) => Err(CacheLoadError::Loader(e)),
                Err(_) => Err(CacheLoadError::Aborted),
            };
            inner.complete(key, id, &outcome, ttl);
            outcome
        });

        task.map(|joined| joined.unwrap_or(Err(CacheLoadError::Aborted)))
            .boxed()
            .shared()
    }

    /// Drop the entry for `key`. Returns whether anything was stored.
    ///
    /// Invalidating an in-flight load detaches it: awaiters still get its
    /// result, but nothing is cached.
    pub fn invalidate(&self, key: &K) -> bool {
        self.inner.lock().slots.remove(key).is_some()
    }

    /// Remove every expired entry and return how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let mut table = self.inner.lock();
        self.inner.sweep(&mut table, Instant::now())
    }

    /// Number of stored values, counting expired entries that have not been
    /// swept yet. Loads in flight are not counted.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .slots
            .values()
            .filter(|slot| matches!(slot, Slot::Ready { .. }))
            .count()
    }

    /// Whether no values are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current counter values
    pub fn stats(&self) -> CacheStats {
        self.inner.counters.snapshot()
    }
}
