//! # Internhub Store (internhub-store)
//!
//! Data layer for the internship recommendation backend: the TTL response
//! cache, the document schema for users and internships, and the store
//! traits the application talks through.
//!
//! ## Caching
//!
//! ```no_run
//! use internhub_store::cache::{CacheConfig, RecommendationCache};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cache = RecommendationCache::new(CacheConfig::default());
//!
//!     let stats = cache.stats().await;
//!     println!("{} active entries", stats.active);
//!     Ok(())
//! }
//! ```
//!
//! ## Stores
//!
//! The users and internships collections are consumed through the
//! [`store::UserStore`] and [`store::InternshipStore`] traits;
//! [`store::memory`] provides the in-process implementation used as the
//! default backend and in tests.
//!
//! ```no_run
//! use internhub_store::schema::{InternshipFilter, InternshipRecord};
//! use internhub_store::store::memory::MemoryInternshipStore;
//! use internhub_store::store::InternshipStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = MemoryInternshipStore::with_records(vec![
//!         InternshipRecord::new("Backend Intern", "Acme", "Technology", "Pune"),
//!     ]);
//!
//!     let filter = InternshipFilter::sectors(&["tech".to_string()]);
//!     let matches = store.find(&filter, 10, 0).await?;
//!     println!("{} matches", matches.len());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod error;
pub mod schema;
pub mod store;

// Re-export main types for convenience
pub use cache::{
    start_auto_cleanup, CacheConfig, CacheConfigBuilder, CacheEntry, CacheKey, CacheKeyBuilder,
    CacheNamespace, CacheStats, CacheValue, RecommendationCache, TtlCache,
};
pub use error::{Result, StoreError};
pub use schema::{
    Education, EducationLevel, EducationLevels, InternshipFilter, InternshipRecord, ProfileEcho,
    ProfileUpdate, RecommendationBuckets, RecommendationResult, UserRecord,
};
pub use store::{
    memory::{MemoryInternshipStore, MemoryUserStore},
    InternshipStore, UserStore,
};
