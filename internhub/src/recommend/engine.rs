//! Recommendation orchestration
//!
//! Ties the pieces together for one request: resolve the profile, build the
//! scoring payload and cache key, short-circuit on a cache hit, otherwise
//! call the scoring service and hydrate its answer — or synthesize a
//! fallback when the service is unreachable.

use crate::error::ApiError;
use crate::recommend::client::{ScoringError, ScoringPayload, ScoringResponse, ScoringService};
use crate::recommend::fallback::FallbackRanker;
use internhub_store::{
    InternshipRecord, InternshipStore, ProfileEcho, RecommendationBuckets, RecommendationCache,
    RecommendationResult, UserStore,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Request parameters for a recommendation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendParams {
    /// Optional override of the scoring radius
    pub max_distance_km: Option<u32>,
}

/// Orchestrator for recommendation requests
#[derive(Clone)]
pub struct RecommendationEngine {
    users: Arc<dyn UserStore>,
    internships: Arc<dyn InternshipStore>,
    cache: RecommendationCache,
    scoring: Arc<dyn ScoringService>,
    fallback: FallbackRanker,
}

impl RecommendationEngine {
    pub fn new(
        users: Arc<dyn UserStore>,
        internships: Arc<dyn InternshipStore>,
        cache: RecommendationCache,
        scoring: Arc<dyn ScoringService>,
    ) -> Self {
        let fallback = FallbackRanker::new(internships.clone());
        Self {
            users,
            internships,
            cache,
            scoring,
            fallback,
        }
    }

    /// Compute (or serve cached) recommendations for an identity
    pub async fn get_recommendations(
        &self,
        identity: &str,
        params: &RecommendParams,
    ) -> Result<RecommendationResult, ApiError> {
        let user = self
            .users
            .find_by_id(identity)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let payload = ScoringPayload::from_profile(&user, params.max_distance_km);
        let key = self.cache.recommendation_key(identity, &payload)?;

        if let Some(cached) = self.cache.get_recommendation(&key).await? {
            debug!("Serving cached recommendations for {}", identity);
            return Ok(cached);
        }

        match self.scoring.score(&payload).await {
            Ok(response) => {
                let buckets = self.hydrate(response).await?;
                let result =
                    RecommendationResult::primary(buckets, ProfileEcho::from_user(&user));
                self.cache.put_recommendation(key, &result).await?;
                Ok(result)
            }
            Err(ScoringError::BadResponse(msg)) => {
                // A reachable but broken upstream is reported, not masked
                Err(ApiError::BadUpstream(msg))
            }
            Err(ScoringError::Unavailable(msg)) => {
                warn!("Scoring service unavailable, using fallback: {}", msg);
                let result = self.fallback.rank(&user).await?;
                self.cache.put_recommendation(key, &result).await?;
                Ok(result)
            }
        }
    }

    /// Hydrate both id buckets, each with a single batched lookup
    async fn hydrate(&self, response: ScoringResponse) -> Result<RecommendationBuckets, ApiError> {
        let nearby_ids = response.recommendations.nearby_ids;
        let remote_ids = response.recommendations.remote_ids;

        let (nearby, remote) = tokio::join!(
            self.hydrate_bucket(&nearby_ids),
            self.hydrate_bucket(&remote_ids),
        );

        Ok(RecommendationBuckets::from_records(nearby?, remote?))
    }

    /// Resolve ids to records, preserving upstream order
    ///
    /// Ids with no matching record are silently dropped; the hydrated list
    /// may be shorter than the id list.
    async fn hydrate_bucket(&self, ids: &[String]) -> Result<Vec<InternshipRecord>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let records = self.internships.find_by_ids(ids).await?;
        let by_id: HashMap<&str, &InternshipRecord> =
            records.iter().map(|r| (r.id.as_str(), r)).collect();

        Ok(ids
            .iter()
            .filter_map(|id| by_id.get(id.as_str()).map(|r| (*r).clone()))
            .collect())
    }
}
