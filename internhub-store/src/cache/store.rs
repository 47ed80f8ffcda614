//! Main cache store implementation with TTL expiry and pattern invalidation

use crate::cache::{
    config::CacheConfig,
    entry::CacheEntry,
    types::{CacheKey, CacheStats, CacheValue},
};
use crate::error::{Result, StoreError};
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// TTL cache for response payloads
///
/// This implementation provides:
/// - Thread-safe async access via RwLock
/// - Per-entry TTL with lazy eviction on `get`
/// - Pattern-based and bulk invalidation
/// - Hit/miss metrics collection
///
/// There is no eviction beyond TTL: unbounded growth is an accepted
/// limitation of this cache.
pub struct TtlCache {
    /// Cache configuration
    pub(crate) config: CacheConfig,

    /// Internal storage
    store: Arc<RwLock<CacheStore>>,
}

/// Internal cache storage
struct CacheStore {
    /// Main storage: key -> entry
    entries: HashMap<CacheKey, CacheEntry>,

    /// Lifetime hit/miss/eviction counters
    hits: u64,
    misses: u64,
    evictions_ttl: u64,
    invalidations: u64,
}

impl TtlCache {
    /// Create a new cache with the given configuration
    pub fn new(config: CacheConfig) -> Self {
        info!("Initializing TTL cache with config: {:?}", config);

        let store = CacheStore {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
            evictions_ttl: 0,
            invalidations: 0,
        };

        Self {
            config,
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Store a value with an explicit TTL, overwriting any existing entry
    pub async fn set(&self, key: CacheKey, value: CacheValue, ttl: Duration) {
        let entry = CacheEntry::new(key.clone(), value, ttl);
        let mut store = self.store.write().await;

        if store.entries.insert(key.clone(), entry).is_some() {
            debug!("Updated existing cache entry: {}", key);
        } else {
            debug!("Inserted new cache entry: {}", key);
        }
    }

    /// Store a value with the configured default TTL
    pub async fn insert(&self, key: CacheKey, value: CacheValue) {
        self.set(key, value, self.config.default_ttl).await
    }

    /// Get a value from the cache
    ///
    /// Expired entries are evicted as a side effect and reported as a miss.
    pub async fn get(&self, key: &str) -> Option<CacheValue> {
        let mut store = self.store.write().await;

        match store.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                debug!("Cache entry expired: {}", key);
                store.entries.remove(key);
                store.misses += 1;
                store.evictions_ttl += 1;
                None
            }
            Some(entry) => {
                debug!("Cache hit: {}", key);
                let value = entry.value.clone();
                store.hits += 1;
                Some(value)
            }
            None => {
                debug!("Cache miss: {}", key);
                store.misses += 1;
                None
            }
        }
    }

    /// Check if a key exists in the cache (expired entries included)
    pub async fn contains_key(&self, key: &str) -> bool {
        let store = self.store.read().await;
        store.entries.contains_key(key)
    }

    /// Remove a specific entry unconditionally
    pub async fn remove(&self, key: &str) -> Option<CacheValue> {
        let mut store = self.store.write().await;

        if let Some(entry) = store.entries.remove(key) {
            store.invalidations += 1;
            debug!("Removed cache entry: {}", key);
            Some(entry.value)
        } else {
            None
        }
    }

    /// Clear all entries from the cache
    pub async fn clear(&self) {
        let mut store = self.store.write().await;

        let count = store.entries.len();
        store.entries.clear();
        store.invalidations += count as u64;

        info!("Cleared {} entries from cache", count);
    }

    /// Remove all entries whose key matches the given regex pattern
    ///
    /// Returns the number of entries removed. Used for coarse invalidation
    /// (e.g. everything cached for one identity) since per-key ownership is
    /// not tracked.
    pub async fn clear_by_pattern(&self, pattern: &str) -> Result<usize> {
        let regex = Regex::new(pattern)
            .map_err(|e| StoreError::InvalidPattern(format!("{}: {}", pattern, e)))?;

        let mut store = self.store.write().await;

        let keys_to_delete: Vec<CacheKey> = store
            .entries
            .keys()
            .filter(|key| regex.is_match(key))
            .cloned()
            .collect();

        for key in &keys_to_delete {
            store.entries.remove(key);
        }

        store.invalidations += keys_to_delete.len() as u64;
        info!(
            "Invalidated {} entries matching pattern: {}",
            keys_to_delete.len(),
            pattern
        );

        Ok(keys_to_delete.len())
    }

    /// Sweep and remove all entries past expiry, returning the count removed
    pub async fn clear_expired(&self) -> usize {
        let mut store = self.store.write().await;

        let expired_keys: Vec<CacheKey> = store
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            store.entries.remove(key);
        }

        store.evictions_ttl += expired_keys.len() as u64;

        if !expired_keys.is_empty() {
            debug!("Swept {} expired entries", expired_keys.len());
        }

        expired_keys.len()
    }

    /// Get cache statistics without mutating any entries
    pub async fn stats(&self) -> CacheStats {
        let store = self.store.read().await;

        let mut active = 0;
        let mut expired = 0;
        for entry in store.entries.values() {
            if entry.is_expired() {
                expired += 1;
            } else {
                active += 1;
            }
        }

        CacheStats {
            total: store.entries.len(),
            active,
            expired,
            hits: store.hits,
            misses: store.misses,
            evictions_ttl: store.evictions_ttl,
            invalidations: store.invalidations,
        }
    }

    /// Get number of entries in cache
    pub async fn len(&self) -> usize {
        let store = self.store.read().await;
        store.entries.len()
    }

    /// Check if cache is empty
    pub async fn is_empty(&self) -> bool {
        let store = self.store.read().await;
        store.entries.is_empty()
    }
}

/// Background task for automatic cache cleanup
pub async fn start_auto_cleanup(cache: Arc<TtlCache>) {
    let interval = cache.config.cleanup_interval;

    info!("Starting automatic cache cleanup task (interval: {:?})", interval);

    loop {
        tokio::time::sleep(interval).await;

        let removed = cache.clear_expired().await;
        if removed > 0 {
            debug!("Auto cleanup: removed {} entries", removed);
        }
    }
}
