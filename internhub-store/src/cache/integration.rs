//! High-level cache wrapper for API response payloads
//!
//! Wraps the raw TTL cache with typed get/put helpers, per-path TTL
//! selection, and the per-identity invalidation hook used when a profile
//! changes.

use crate::cache::{
    config::CacheConfig,
    keys::{content_hash, CacheKeyBuilder, CacheNamespace},
    store::TtlCache,
    types::{CacheKey, CacheStats},
};
use crate::error::{Result, StoreError};
use crate::schema::RecommendationResult;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Recommendation-aware cache facade
///
/// Explicitly constructed and injected into request handlers; there is no
/// process-global cache instance.
#[derive(Clone)]
pub struct RecommendationCache {
    cache: Arc<TtlCache>,
}

impl RecommendationCache {
    /// Create a new cache facade with the given configuration
    pub fn new(config: CacheConfig) -> Self {
        Self {
            cache: Arc::new(TtlCache::new(config)),
        }
    }

    /// Create from an existing cache instance
    pub fn from_cache(cache: Arc<TtlCache>) -> Self {
        Self { cache }
    }

    /// Get the underlying cache instance
    pub fn inner(&self) -> Arc<TtlCache> {
        self.cache.clone()
    }

    fn config(&self) -> &CacheConfig {
        &self.cache.config
    }

    /// Build the cache key for one identity's recommendation request
    ///
    /// The identity comes first so all of a user's entries share a prefix;
    /// the payload digest makes the key a pure function of the request.
    pub fn recommendation_key<P: Serialize>(
        &self,
        identity: &str,
        payload: &P,
    ) -> Result<CacheKey> {
        let digest = content_hash(payload)?;
        Ok(CacheKeyBuilder::new(CacheNamespace::Recommendations)
            .segment(identity)
            .segment(digest)
            .build())
    }

    /// Fetch a cached recommendation result
    pub async fn get_recommendation(&self, key: &str) -> Result<Option<RecommendationResult>> {
        self.get_typed(key).await
    }

    /// Cache a recommendation result
    ///
    /// Fallback results get the shorter TTL: they carry lower confidence and
    /// the real service may recover soon.
    pub async fn put_recommendation(
        &self,
        key: CacheKey,
        result: &RecommendationResult,
    ) -> Result<()> {
        let ttl = if result.is_fallback() {
            self.config().fallback_ttl
        } else {
            self.config().recommendation_ttl
        };
        self.put_typed(key, result, ttl).await
    }

    /// Invalidate everything cached for one identity
    ///
    /// Exact per-user keys are not tracked, so this matches on the identity
    /// prefix instead of a full clear; unrelated entries survive.
    pub async fn invalidate_user(&self, identity: &str) -> Result<usize> {
        let pattern = format!(
            "^{}:{}:",
            CacheNamespace::Recommendations,
            regex::escape(identity)
        );
        let cleared = self.cache.clear_by_pattern(&pattern).await?;
        info!("Invalidated {} cached entries for identity {}", cleared, identity);
        Ok(cleared)
    }

    /// Key for one page of the internship listing
    pub fn page_key(&self, page: u64) -> CacheKey {
        CacheKeyBuilder::new(CacheNamespace::InternshipPage)
            .segment(page.to_string())
            .build()
    }

    /// Key for a single internship
    pub fn detail_key(&self, id: &str) -> CacheKey {
        CacheKeyBuilder::new(CacheNamespace::Internship)
            .segment(id)
            .build()
    }

    /// Key for the unpersonalized recommended listing
    pub fn recommended_key(&self) -> CacheKey {
        CacheKeyBuilder::new(CacheNamespace::RecommendedList).build()
    }

    /// Key for one search parameter set
    pub fn search_key<P: Serialize>(&self, params: &P) -> Result<CacheKey> {
        let digest = content_hash(params)?;
        Ok(CacheKeyBuilder::new(CacheNamespace::Search)
            .segment(digest)
            .build())
    }

    /// Cache a page payload with the page TTL
    pub async fn put_page<T: Serialize>(&self, key: CacheKey, value: &T) -> Result<()> {
        self.put_typed(key, value, self.config().page_ttl).await
    }

    /// Cache a detail payload with the detail TTL
    pub async fn put_detail<T: Serialize>(&self, key: CacheKey, value: &T) -> Result<()> {
        self.put_typed(key, value, self.config().detail_ttl).await
    }

    /// Cache the recommended listing with its TTL
    pub async fn put_recommended<T: Serialize>(&self, key: CacheKey, value: &T) -> Result<()> {
        self.put_typed(key, value, self.config().recommended_ttl).await
    }

    /// Cache a search payload with the search TTL
    pub async fn put_search<T: Serialize>(&self, key: CacheKey, value: &T) -> Result<()> {
        self.put_typed(key, value, self.config().search_ttl).await
    }

    /// Fetch and deserialize a cached payload
    pub async fn get_typed<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.cache.get(key).await {
            Some(value) => {
                let parsed = serde_json::from_str(&value)
                    .map_err(|e| StoreError::SerializationError(e.to_string()))?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Serialize and store a payload with an explicit TTL
    pub async fn put_typed<T: Serialize>(
        &self,
        key: CacheKey,
        value: &T,
        ttl: Duration,
    ) -> Result<()> {
        let serialized = serde_json::to_string(value)
            .map_err(|e| StoreError::SerializationError(e.to_string()))?;
        self.cache.set(key, serialized, ttl).await;
        Ok(())
    }

    /// Clear all entries matching a caller-supplied pattern
    pub async fn clear_by_pattern(&self, pattern: &str) -> Result<usize> {
        self.cache.clear_by_pattern(pattern).await
    }

    /// Sweep expired entries
    pub async fn clear_expired(&self) -> usize {
        self.cache.clear_expired().await
    }

    /// Clear the entire cache
    pub async fn clear(&self) {
        self.cache.clear().await
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}
