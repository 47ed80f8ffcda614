//! Cache key construction

use crate::cache::types::CacheKey;
use crate::error::{Result, StoreError};
use serde::Serialize;
use std::fmt;

/// Namespace for categorizing cache entries
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    /// Per-identity recommendation results
    Recommendations,

    /// Single internship lookups
    Internship,

    /// Paginated internship listings
    InternshipPage,

    /// The unpersonalized recommended listing
    RecommendedList,

    /// Search results
    Search,

    /// Custom namespace
    Custom(String),
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheNamespace::Recommendations => write!(f, "recommendations"),
            CacheNamespace::Internship => write!(f, "internship"),
            CacheNamespace::InternshipPage => write!(f, "internships:page"),
            CacheNamespace::RecommendedList => write!(f, "recommended:internships"),
            CacheNamespace::Search => write!(f, "search"),
            CacheNamespace::Custom(s) => write!(f, "custom:{}", s),
        }
    }
}

/// Builder assembling namespaced cache keys from ordered segments
///
/// Keys are `namespace[:segment]*`. Segment order is fixed by construction
/// order, so a key built from the same parts is always identical.
pub struct CacheKeyBuilder {
    namespace: CacheNamespace,
    segments: Vec<String>,
}

impl CacheKeyBuilder {
    /// Create a new cache key builder
    pub fn new(namespace: CacheNamespace) -> Self {
        Self {
            namespace,
            segments: Vec::new(),
        }
    }

    /// Append a segment
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Build the cache key
    pub fn build(self) -> CacheKey {
        let mut key = self.namespace.to_string();
        for segment in &self.segments {
            key.push(':');
            key.push_str(segment);
        }
        key
    }
}

/// Deterministic content hash of a serializable value
///
/// Struct serialization order is fixed by field declaration, so
/// structurally identical values always hash to the same digest within a
/// process — which matches the cache's process lifetime.
pub fn content_hash<T: Serialize>(value: &T) -> Result<String> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let canonical = serde_json::to_string(value)
        .map_err(|e| StoreError::SerializationError(e.to_string()))?;

    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    Ok(format!("{:x}", hasher.finish()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Payload {
        skills: String,
        city: String,
        max_distance_km: u32,
    }

    #[test]
    fn test_namespace_display() {
        assert_eq!(
            format!("{}", CacheNamespace::Recommendations),
            "recommendations"
        );
        assert_eq!(
            format!("{}", CacheNamespace::InternshipPage),
            "internships:page"
        );
        assert_eq!(
            format!("{}", CacheNamespace::Custom("test".to_string())),
            "custom:test"
        );
    }

    #[test]
    fn test_key_builder() {
        let key = CacheKeyBuilder::new(CacheNamespace::Internship)
            .segment("abc123")
            .build();
        assert_eq!(key, "internship:abc123");

        let key = CacheKeyBuilder::new(CacheNamespace::Recommendations)
            .segment("user-1")
            .segment("deadbeef")
            .build();
        assert_eq!(key, "recommendations:user-1:deadbeef");

        let key = CacheKeyBuilder::new(CacheNamespace::RecommendedList).build();
        assert_eq!(key, "recommended:internships");
    }

    #[test]
    fn test_content_hash_is_pure() {
        let a = Payload {
            skills: "rust sql".to_string(),
            city: "Pune".to_string(),
            max_distance_km: 150,
        };
        let b = Payload {
            skills: "rust sql".to_string(),
            city: "Pune".to_string(),
            max_distance_km: 150,
        };

        assert_eq!(content_hash(&a).unwrap(), content_hash(&b).unwrap());
    }

    #[test]
    fn test_content_hash_differs_on_content() {
        let a = Payload {
            skills: "rust".to_string(),
            city: "Pune".to_string(),
            max_distance_km: 150,
        };
        let b = Payload {
            skills: "rust".to_string(),
            city: "Pune".to_string(),
            max_distance_km: 200,
        };

        assert_ne!(content_hash(&a).unwrap(), content_hash(&b).unwrap());
    }
}
