//! Keyed query cache with in-flight de-duplication and prefix invalidation.
//!
//! The cache is an ordinary value: construct it with [`QueryCache::new`],
//! share it through an `Arc`, and tear it down with [`QueryCache::clear`] or by
//! dropping it. It never lives in a global.
//!
//! Reads are keyed by [`CacheKey`]. A fresh entry is served without touching
//! the network; a stale or missing one runs the caller's fetch. Readers that
//! arrive while a fetch for the same key is running await that fetch instead
//! of starting another. Mutations go through [`QueryCache::mutate`], which
//! invalidates the given prefixes only after the mutation succeeded.

mod key;
pub mod keys;

pub use key::{CacheKey, KeyPart};

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

use crate::Result;
use crate::error::Error;

type CachedValue = Arc<dyn Any + Send + Sync>;
type SharedFetch = Shared<BoxFuture<'static, Result<CachedValue>>>;
type Entries = Arc<Mutex<HashMap<CacheKey, Entry>>>;

/// Default time an unused entry survives [`QueryCache::evict_idle`].
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(5 * 60);

/// Cache configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long an entry with no subscribers is kept after its last use.
    pub idle_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            idle_ttl: DEFAULT_IDLE_TTL,
        }
    }
}

struct Entry {
    value: Option<CachedValue>,
    fresh: bool,
    /// Replaced on every invalidation. Generations come from one counter per
    /// cache, so an entry recreated after [`QueryCache::clear`] never matches
    /// a fetch started before it.
    generation: u64,
    in_flight: Option<(u64, SharedFetch)>,
    subscribers: usize,
    last_used: Instant,
    notify: watch::Sender<u64>,
}

impl Entry {
    fn new(generation: u64) -> Self {
        let (notify, _) = watch::channel(generation);
        Self {
            value: None,
            fresh: false,
            generation,
            in_flight: None,
            subscribers: 0,
            last_used: Instant::now(),
            notify,
        }
    }

    fn fetch_running(&self) -> bool {
        self.in_flight
            .as_ref()
            .and_then(|(_, fetch)| fetch.strong_count())
            .is_some_and(|n| n > 1)
    }
}

/// A keyed cache of query results.
pub struct QueryCache {
    config: CacheConfig,
    entries: Entries,
    generations: AtomicU64,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("config", &self.config)
            .field("entries", &self.len())
            .finish()
    }
}

impl QueryCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
            generations: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, Entry>> {
        lock(&self.entries)
    }

    fn next_generation(&self) -> u64 {
        self.generations.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Read `key`, running `fetch` when there is no fresh value.
    ///
    /// Concurrent readers of the same key share one fetch. A fetch that
    /// completes after the key was invalidated still answers its readers but
    /// is not stored as fresh. Failures are never cached.
    pub async fn read<T, F, Fut>(&self, key: &CacheKey, fetch: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (generation, shared, fallback) = {
            let mut entries = self.lock();
            let entry = entries.entry(key.clone()).or_insert_with(|| Entry::new(self.next_generation()));
            entry.last_used = Instant::now();

            if entry.fresh {
                if let Some(value) = &entry.value {
                    match value.downcast_ref::<T>() {
                        Some(value) => {
                            trace!(%key, "cache hit");
                            return Ok(value.clone());
                        }
                        None => warn!(%key, "cached value has a different type, treating as a miss"),
                    }
                }
            }

            match &entry.in_flight {
                Some((generation, shared)) if *generation == entry.generation => {
                    trace!(%key, "joining in-flight fetch");
                    (*generation, shared.clone(), Some(fetch))
                }
                _ => {
                    debug!(%key, "cache miss, fetching");
                    let fut = fetch();
                    let shared = async move { fut.await.map(|value| Arc::new(value) as CachedValue) }
                        .boxed()
                        .shared();
                    entry.in_flight = Some((entry.generation, shared.clone()));
                    (entry.generation, shared, None)
                }
            }
        };

        let result = shared.await;
        self.settle(key, generation, &result);

        let value = result?;
        if let Some(value) = value.downcast_ref::<T>() {
            return Ok(value.clone());
        }
        // Another reader started this fetch with a different value type.
        warn!(%key, "in-flight fetch produced a different type, fetching directly");
        match fallback {
            Some(fetch) => fetch().await,
            None => Err(Error::malformed(format!("cached value for {key} has an unexpected type"))),
        }
    }

    /// Record the outcome of the fetch started under `generation`.
    fn settle(&self, key: &CacheKey, generation: u64, result: &Result<CachedValue>) {
        let mut entries = self.lock();
        let Some(entry) = entries.get_mut(key) else {
            return;
        };
        match &entry.in_flight {
            Some((started, _)) if *started == generation => {}
            _ => return,
        }
        entry.in_flight = None;

        if entry.generation != generation {
            debug!(%key, "discarding result fetched before invalidation");
            return;
        }
        if let Ok(value) = result {
            entry.value = Some(value.clone());
            entry.fresh = true;
        }
    }

    /// Returns the fresh cached value for `key`, if any, without fetching.
    pub fn get<T: Clone + 'static>(&self, key: &CacheKey) -> Option<T> {
        let entries = self.lock();
        let entry = entries.get(key)?;
        if !entry.fresh {
            return None;
        }
        entry.value.as_ref()?.downcast_ref::<T>().cloned()
    }

    /// Returns true if `key` holds a value that does not need refetching.
    pub fn is_fresh(&self, key: &CacheKey) -> bool {
        self.lock().get(key).is_some_and(|e| e.fresh && e.value.is_some())
    }

    /// Number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Register a consumer of `key`.
    ///
    /// The returned [`Subscription`] resolves [`Subscription::invalidated`]
    /// whenever the key is invalidated, and keeps the entry from being
    /// evicted until it is dropped.
    pub fn subscribe(&self, key: &CacheKey) -> Subscription {
        let mut entries = self.lock();
        let entry = entries.entry(key.clone()).or_insert_with(|| Entry::new(self.next_generation()));
        entry.subscribers += 1;
        entry.last_used = Instant::now();
        Subscription {
            key: key.clone(),
            rx: entry.notify.subscribe(),
            entries: Arc::downgrade(&self.entries),
        }
    }

    /// Mark every entry under `prefix` stale and notify its subscribers.
    ///
    /// Returns the number of entries matched.
    pub fn invalidate(&self, prefix: &CacheKey) -> usize {
        let mut entries = self.lock();
        let mut matched = 0;
        for (key, entry) in entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.fresh = false;
                entry.generation = self.next_generation();
                entry.notify.send_replace(entry.generation);
                matched += 1;
            }
        }
        info!(%prefix, matched, "invalidated cache entries");
        matched
    }

    /// Run a mutation and, if it succeeds, invalidate every prefix.
    ///
    /// A failed mutation leaves the cache untouched. Nothing is retried.
    pub async fn mutate<T, Fut>(&self, prefixes: &[CacheKey], op: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        let out = op.await?;
        for prefix in prefixes {
            self.invalidate(prefix);
        }
        Ok(out)
    }

    /// Drop entries that have no subscribers, no running fetch and have not
    /// been used for the configured idle time. Returns the number dropped.
    pub fn evict_idle(&self) -> usize {
        let ttl = self.config.idle_ttl;
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, e| e.subscribers > 0 || e.fetch_running() || e.last_used.elapsed() < ttl);
        let evicted = before - entries.len();
        if evicted > 0 {
            debug!(evicted, "evicted idle cache entries");
        }
        evicted
    }

    /// Drop every entry. Live subscriptions observe the teardown as an
    /// invalidation.
    pub fn clear(&self) {
        self.lock().clear();
        debug!("cache cleared");
    }
}

fn lock(entries: &Mutex<HashMap<CacheKey, Entry>>) -> MutexGuard<'_, HashMap<CacheKey, Entry>> {
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A registered consumer of one cache key.
pub struct Subscription {
    key: CacheKey,
    rx: watch::Receiver<u64>,
    entries: std::sync::Weak<Mutex<HashMap<CacheKey, Entry>>>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("key", &self.key).finish_non_exhaustive()
    }
}

impl Subscription {
    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    /// Wait until the key is invalidated (or the cache is torn down).
    pub async fn invalidated(&mut self) {
        // An Err means the entry is gone, which also calls for a refetch.
        let _ = self.rx.changed().await;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(entries) = self.entries.upgrade() else {
            return;
        };
        let mut entries = lock(&entries);
        if let Some(entry) = entries.get_mut(&self.key) {
            entry.subscribers = entry.subscribers.saturating_sub(1);
            entry.last_used = Instant::now();
        }
    }
}
