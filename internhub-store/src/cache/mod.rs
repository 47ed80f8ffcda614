//! # TTL Response Cache
//!
//! In-memory key/value cache with per-entry expiry, used to short-circuit
//! recommendation computation and repeated listing queries.
//!
//! ## Features
//!
//! - **TTL-Based Expiration**: per-entry expiry with lazy eviction on read
//! - **Pattern Invalidation**: regex-based bulk removal for coarse
//!   invalidation (e.g. one identity's entries after a profile change)
//! - **Typed Wrappers**: `RecommendationCache` serializes payloads and picks
//!   the TTL that matches the confidence of what it stores
//!
//! There is no eviction policy beyond TTL and no persistence; the cache
//! lives and dies with the process.
//!
//! ## Example
//!
//! ```rust
//! use internhub_store::cache::{CacheConfig, TtlCache};
//! use std::time::Duration;
//!
//! # async fn example() {
//! let cache = TtlCache::new(CacheConfig::default());
//!
//! cache.set(
//!     "internship:123".to_string(),
//!     "{\"title\":\"Backend Intern\"}".to_string(),
//!     Duration::from_secs(900),
//! ).await;
//!
//! if let Some(value) = cache.get("internship:123").await {
//!     println!("Cache hit: {}", value);
//! }
//! # }
//! ```

pub mod config;
pub mod entry;
pub mod integration;
pub mod keys;
pub mod store;
pub mod types;

pub use config::{CacheConfig, CacheConfigBuilder};
pub use entry::CacheEntry;
pub use integration::RecommendationCache;
pub use keys::{content_hash, CacheKeyBuilder, CacheNamespace};
pub use store::{start_auto_cleanup, TtlCache};
pub use types::{CacheKey, CacheStats, CacheValue};
