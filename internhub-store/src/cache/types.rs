//! Core type definitions for the cache system

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cache key type - string-based, namespaced via `CacheKeyBuilder`
pub type CacheKey = String;

/// Cache value type - stores serialized response payloads
pub type CacheValue = String;

/// Statistics and metrics for cache performance monitoring
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheStats {
    /// Total number of entries currently held (active + expired-but-unswept)
    pub total: usize,

    /// Entries that are still within their TTL
    pub active: usize,

    /// Entries past expiry that have not been swept yet
    pub expired: usize,

    /// Total number of cache hits
    pub hits: u64,

    /// Total number of cache misses
    pub misses: u64,

    /// Number of evictions due to TTL expiration
    pub evictions_ttl: u64,

    /// Number of manual invalidations (remove, clear, pattern clear)
    pub invalidations: u64,
}

impl CacheStats {
    /// Calculate cache hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }

    /// Calculate miss rate as a percentage
    pub fn miss_rate(&self) -> f64 {
        100.0 - self.hit_rate()
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CacheStats {{ total: {}, active: {}, expired: {}, hits: {}, misses: {}, hit_rate: {:.2}% }}",
            self.total,
            self.active,
            self.expired,
            self.hits,
            self.misses,
            self.hit_rate()
        )
    }
}
