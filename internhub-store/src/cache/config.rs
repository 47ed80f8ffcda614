//! Configuration for the cache system

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the TTL cache
///
/// TTLs mirror the confidence of what they guard: fallback results expire
/// quickly (the real scoring service may recover soon), while slow-moving
/// listings keep their entries longer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Default time-to-live when no path-specific TTL applies
    pub default_ttl: Duration,

    /// TTL for primary (external-service) recommendation results
    pub recommendation_ttl: Duration,

    /// TTL for fallback recommendation results
    pub fallback_ttl: Duration,

    /// TTL for paginated internship listings
    pub page_ttl: Duration,

    /// TTL for single internship lookups
    pub detail_ttl: Duration,

    /// TTL for the unpersonalized recommended listing
    pub recommended_ttl: Duration,

    /// TTL for search results
    pub search_ttl: Duration,

    /// Enable the background sweep of expired entries
    pub enable_auto_cleanup: bool,

    /// Interval for the background sweep
    pub cleanup_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: Duration::from_secs(5 * 60),
            recommendation_ttl: Duration::from_secs(5 * 60),
            fallback_ttl: Duration::from_secs(2 * 60),
            page_ttl: Duration::from_secs(10 * 60),
            detail_ttl: Duration::from_secs(15 * 60),
            recommended_ttl: Duration::from_secs(30 * 60),
            search_ttl: Duration::from_secs(5 * 60),
            enable_auto_cleanup: false,
            cleanup_interval: Duration::from_secs(5 * 60),
        }
    }
}

impl CacheConfig {
    /// Create a new builder for cache configuration
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_ttl.is_zero() {
            return Err("default_ttl must be greater than zero".to_string());
        }

        if self.fallback_ttl > self.recommendation_ttl {
            return Err(
                "fallback_ttl must not exceed recommendation_ttl".to_string()
            );
        }

        if self.enable_auto_cleanup && self.cleanup_interval.is_zero() {
            return Err("cleanup_interval must be greater than zero".to_string());
        }

        Ok(())
    }
}

/// Builder for cache configuration
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    default_ttl: Option<Duration>,
    recommendation_ttl: Option<Duration>,
    fallback_ttl: Option<Duration>,
    page_ttl: Option<Duration>,
    detail_ttl: Option<Duration>,
    recommended_ttl: Option<Duration>,
    search_ttl: Option<Duration>,
    enable_auto_cleanup: Option<bool>,
    cleanup_interval: Option<Duration>,
}

impl CacheConfigBuilder {
    /// Set the default TTL for cache entries
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Set the TTL for primary recommendation results
    pub fn recommendation_ttl(mut self, ttl: Duration) -> Self {
        self.recommendation_ttl = Some(ttl);
        self
    }

    /// Set the TTL for fallback recommendation results
    pub fn fallback_ttl(mut self, ttl: Duration) -> Self {
        self.fallback_ttl = Some(ttl);
        self
    }

    /// Set the TTL for paginated listings
    pub fn page_ttl(mut self, ttl: Duration) -> Self {
        self.page_ttl = Some(ttl);
        self
    }

    /// Set the TTL for single internship lookups
    pub fn detail_ttl(mut self, ttl: Duration) -> Self {
        self.detail_ttl = Some(ttl);
        self
    }

    /// Set the TTL for the recommended listing
    pub fn recommended_ttl(mut self, ttl: Duration) -> Self {
        self.recommended_ttl = Some(ttl);
        self
    }

    /// Set the TTL for search results
    pub fn search_ttl(mut self, ttl: Duration) -> Self {
        self.search_ttl = Some(ttl);
        self
    }

    /// Enable or disable the background sweep
    pub fn enable_auto_cleanup(mut self, enable: bool) -> Self {
        self.enable_auto_cleanup = Some(enable);
        self
    }

    /// Set the background sweep interval
    pub fn cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = Some(interval);
        self
    }

    /// Build the cache configuration
    pub fn build(self) -> CacheConfig {
        let defaults = CacheConfig::default();

        CacheConfig {
            default_ttl: self.default_ttl.unwrap_or(defaults.default_ttl),
            recommendation_ttl: self
                .recommendation_ttl
                .unwrap_or(defaults.recommendation_ttl),
            fallback_ttl: self.fallback_ttl.unwrap_or(defaults.fallback_ttl),
            page_ttl: self.page_ttl.unwrap_or(defaults.page_ttl),
            detail_ttl: self.detail_ttl.unwrap_or(defaults.detail_ttl),
            recommended_ttl: self.recommended_ttl.unwrap_or(defaults.recommended_ttl),
            search_ttl: self.search_ttl.unwrap_or(defaults.search_ttl),
            enable_auto_cleanup: self
                .enable_auto_cleanup
                .unwrap_or(defaults.enable_auto_cleanup),
            cleanup_interval: self.cleanup_interval.unwrap_or(defaults.cleanup_interval),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.recommendation_ttl, Duration::from_secs(300));
        assert_eq!(config.fallback_ttl, Duration::from_secs(120));
        assert!(!config.enable_auto_cleanup);
    }

    #[test]
    fn test_config_validation() {
        let valid_config = CacheConfig::default();
        assert!(valid_config.validate().is_ok());

        let mut invalid_config = CacheConfig::default();
        invalid_config.default_ttl = Duration::ZERO;
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = CacheConfig::default();
        invalid_config.fallback_ttl = Duration::from_secs(600);
        assert!(invalid_config.validate().is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = CacheConfig::builder()
            .default_ttl(Duration::from_secs(600))
            .fallback_ttl(Duration::from_secs(30))
            .enable_auto_cleanup(true)
            .build();

        assert_eq!(config.default_ttl, Duration::from_secs(600));
        assert_eq!(config.fallback_ttl, Duration::from_secs(30));
        assert!(config.enable_auto_cleanup);
        // Unset fields fall back to defaults
        assert_eq!(config.page_ttl, Duration::from_secs(600));
    }
}
