//! Cache Store Module
//!
//! Thread-safe wrapper that serializes every call to one lazily built
//! [`LruStore`] behind a single mutex.

use parking_lot::Mutex;
use tracing::{info, trace};

use crate::cache::{ByteView, CacheStats, LruStore, OnEvicted};
use crate::config::Config;

struct Inner {
    capacity_bytes: u64,
    /// Built on the first `put`
    lru: Option<LruStore<ByteView>>,
    /// Handed to the store when it is built
    on_evicted: Option<OnEvicted<ByteView>>,
    stats: CacheStats,
}

// == Cache Store ==
/// Concurrency-safe, byte-bounded LRU cache of [`ByteView`] payloads.
///
/// Every operation takes the same exclusive lock, so all calls on one
/// instance are linearizable. Share it between threads with `Arc`.
pub struct CacheStore {
    inner: Mutex<Inner>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a cache with a byte budget (0 = unbounded).
    ///
    /// No memory is reserved until the first `put`.
    pub fn new(capacity_bytes: u64) -> Self {
        Self::build(capacity_bytes, None)
    }

    /// Creates a cache that reports capacity evictions to `on_evicted`.
    ///
    /// # Deadlock
    /// The callback runs on the writing thread while the cache lock is held.
    /// It must not call back into the same `CacheStore`; the lock is not
    /// reentrant and doing so deadlocks.
    pub fn with_eviction_callback(
        capacity_bytes: u64,
        on_evicted: impl FnMut(String, ByteView) + Send + 'static,
    ) -> Self {
        Self::build(capacity_bytes, Some(Box::new(on_evicted)))
    }

    /// Creates a cache from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cache_bytes)
    }

    fn build(capacity_bytes: u64, on_evicted: Option<OnEvicted<ByteView>>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                capacity_bytes,
                lru: None,
                on_evicted,
                stats: CacheStats::new(),
            }),
        }
    }

    // == Put ==
    /// Inserts or replaces `key`, evicting least recently used entries as needed.
    pub fn put(&self, key: impl Into<String>, value: ByteView) {
        let key = key.into();
        let mut guard = self.inner.lock();
        let Inner {
            capacity_bytes,
            lru,
            on_evicted,
            ..
        } = &mut *guard;

        let lru = lru.get_or_insert_with(|| {
            info!(capacity_bytes = *capacity_bytes, "Initializing LRU store");
            LruStore::from_parts(*capacity_bytes, on_evicted.take())
        });

        trace!(key = %key, size = value.len(), "put");
        lru.add(key, value);
    }

    // == Get ==
    /// Returns the cached payload for `key` and marks it most recently used.
    ///
    /// The returned view aliases the cached bytes; copy them with
    /// [`ByteView::byte_slice`] after the call, outside the lock.
    pub fn get(&self, key: &str) -> Option<ByteView> {
        let mut guard = self.inner.lock();
        let Inner { lru, stats, .. } = &mut *guard;

        let value = lru.as_mut().and_then(|lru| lru.get(key).cloned());
        match value {
            Some(_) => stats.record_hit(),
            None => stats.record_miss(),
        }

        trace!(key = %key, hit = value.is_some(), "get");
        value
    }

    // == Accessors ==
    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.lock().lru.as_ref().map_or(0, LruStore::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn used_bytes(&self) -> u64 {
        self.inner.lock().lru.as_ref().map_or(0, LruStore::used_bytes)
    }

    pub fn capacity_bytes(&self) -> u64 {
        self.inner.lock().capacity_bytes
    }

    /// Whether the underlying store has been built yet.
    pub fn is_initialized(&self) -> bool {
        self.inner.lock().lru.is_some()
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let guard = self.inner.lock();
        let mut stats = guard.stats.clone();
        if let Some(lru) = guard.lru.as_ref() {
            stats.evictions = lru.evictions();
            stats.entries = lru.len();
            stats.used_bytes = lru.used_bytes();
        }
        stats
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guard = self.inner.lock();
        f.debug_struct("CacheStore")
            .field("capacity_bytes", &guard.capacity_bytes)
            .field("lru", &guard.lru)
            .finish()
    }
}
