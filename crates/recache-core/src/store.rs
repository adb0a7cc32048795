//! The TTL response store.

use crate::entry::CacheEntry;
use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Default freshness window: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_millis(300_000);

/// Process-wide TTL cache mapping string keys to immutable JSON payloads.
///
/// The store does no background sweeping and has no capacity bound: expired
/// entries are detected lazily on lookup and physically remain in the map
/// until overwritten or explicitly invalidated. Only their *reported*
/// presence is governed by expiry, so [`ResponseCache::stats`] still counts
/// them while [`ResponseCache::get`] treats them as misses.
///
/// Cloning is cheap and yields a handle to the same underlying map. The map
/// is guarded by a mutex; no operation blocks or suspends while holding it,
/// and every write is a single assignment of a fully constructed entry, so
/// two racing misses at worst duplicate the upstream computation
/// (last write wins).
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use recache_core::{ResponseCache, DEFAULT_TTL};
///
/// let cache = ResponseCache::new();
/// cache.insert("/api/hotels", Bytes::from_static(b"{\"hotels\":[]}"), DEFAULT_TTL);
///
/// assert!(cache.get("/api/hotels").is_some());
/// assert!(cache.get("/api/rooms").is_none());
/// ```
#[derive(Clone, Default)]
pub struct ResponseCache {
    inner: Arc<Mutex<HashMap<String, CacheEntry>>>,
}

/// Snapshot of what is physically in the store, stale entries included.
/// A debugging and observability aid, not a freshness guarantee.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// Number of entries currently in the map.
    pub size: usize,
    /// All keys currently in the map, sorted for stable output.
    pub keys: Vec<String>,
}

impl ResponseCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a live entry. Returns the stored payload on a fresh hit and
    /// `None` otherwise; a stale entry is left in place and reported as a
    /// miss.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.get_at(key, now_epoch_ms())
    }

    /// Stores `payload` under `key` with freshness window `ttl`, replacing
    /// any previous entry for the key.
    pub fn insert(&self, key: impl Into<String>, payload: Bytes, ttl: Duration) {
        self.insert_at(key, payload, ttl, now_epoch_ms());
    }

    /// Removes exactly one entry. Returns `true` if an entry (fresh or
    /// stale) was present.
    pub fn invalidate(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }

    /// Empties the store.
    pub fn invalidate_all(&self) {
        self.lock().clear();
    }

    /// Removes every entry whose key satisfies `predicate` and returns how
    /// many were removed.
    pub fn invalidate_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(&str) -> bool,
    {
        let mut map = self.lock();
        let before = map.len();
        map.retain(|key, _| !predicate(key));
        before - map.len()
    }

    /// Current size and key set, counting not-yet-pruned stale entries.
    pub fn stats(&self) -> CacheStats {
        let map = self.lock();
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        CacheStats {
            size: map.len(),
            keys,
        }
    }

    /// Number of entries physically in the map, stale ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the map holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn get_at(&self, key: &str, now_ms: u64) -> Option<Bytes> {
        self.lock()
            .get(key)
            .filter(|entry| entry.is_fresh(now_ms))
            .map(|entry| entry.payload().clone())
    }

    fn insert_at(&self, key: impl Into<String>, payload: Bytes, ttl: Duration, now_ms: u64) {
        let expires_at_ms = now_ms.saturating_add(ttl.as_millis() as u64);
        self.lock()
            .insert(key.into(), CacheEntry::new(payload, expires_at_ms));
    }

    // Entries are only ever written as whole values, so a panic while the
    // lock is held cannot leave a half-written entry behind. Recovering
    // from poisoning is therefore sound.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
