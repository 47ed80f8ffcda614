//! Recommendation engine: orchestrator, fallback ranker, and the scoring
//! service client

pub mod client;
pub mod engine;
pub mod fallback;

pub use client::{
    HttpScoringService, ScoringError, ScoringPayload, ScoringRecommendations, ScoringResponse,
    ScoringService, DEFAULT_MAX_DISTANCE_KM,
};
pub use engine::{RecommendParams, RecommendationEngine};
pub use fallback::{FallbackRanker, FALLBACK_QUERY_LIMIT, NEARBY_BACKFILL_TARGET};
