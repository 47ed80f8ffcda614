//! Database-driven fallback ranking
//!
//! When the scoring service is unreachable, a usable internship list is
//! synthesized from stored records: a cascade of increasingly relaxed
//! queries picks the most specific non-empty match set, which is then split
//! into nearby/remote buckets.

use internhub_store::{
    InternshipFilter, InternshipRecord, InternshipStore, ProfileEcho, RecommendationBuckets,
    RecommendationResult, StoreError, UserRecord,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Records fetched per relaxation query
pub const FALLBACK_QUERY_LIMIT: usize = 10;

/// Minimum nearby entries the backfill aims for
pub const NEARBY_BACKFILL_TARGET: usize = 5;

const FALLBACK_MESSAGE: &str =
    "Using fallback recommendations due to external service unavailability";

/// Rule-based ranker over the internship store
#[derive(Clone)]
pub struct FallbackRanker {
    internships: Arc<dyn InternshipStore>,
}

impl FallbackRanker {
    pub fn new(internships: Arc<dyn InternshipStore>) -> Self {
        Self { internships }
    }

    /// Ordered relaxation queries for a profile, most specific first
    ///
    /// The order is load-bearing: classification depends on which query won,
    /// so this must stay sector+city, sector, city, skills, unfiltered.
    fn relaxation_queries(user: &UserRecord) -> Vec<(&'static str, InternshipFilter)> {
        let mut queries = Vec::new();

        if !user.sectors.is_empty() && !user.location.is_empty() {
            queries.push((
                "sector+city",
                InternshipFilter::sectors(&user.sectors).with_city(&user.location),
            ));
        }

        if !user.sectors.is_empty() {
            queries.push(("sector", InternshipFilter::sectors(&user.sectors)));
        }

        if !user.location.is_empty() {
            queries.push(("city", InternshipFilter::city(&user.location)));
        }

        if !user.skills.is_empty() {
            queries.push(("skills", InternshipFilter::skills(&user.skills)));
        }

        queries.push(("any", InternshipFilter::any()));

        queries
    }

    /// Produce a fallback recommendation for the given profile
    ///
    /// An empty store yields an empty result, never an error.
    pub async fn rank(&self, user: &UserRecord) -> Result<RecommendationResult, StoreError> {
        let mut chosen: Vec<InternshipRecord> = Vec::new();

        for (label, filter) in Self::relaxation_queries(user) {
            let results = self
                .internships
                .find(&filter, FALLBACK_QUERY_LIMIT, 0)
                .await?;

            if !results.is_empty() {
                debug!(
                    "Fallback query '{}' matched {} internships",
                    label,
                    results.len()
                );
                chosen = results;
                break;
            }
        }

        let (nearby, remote) = Self::classify(&user.location, chosen);

        info!(
            "Fallback result: {} nearby, {} remote internships",
            nearby.len(),
            remote.len()
        );

        Ok(RecommendationResult::fallback(
            RecommendationBuckets::from_records(nearby, remote),
            ProfileEcho::from_user(user),
            FALLBACK_MESSAGE,
        ))
    }

    /// Split records into nearby/remote buckets and backfill nearby
    ///
    /// Bucket membership is computed independently: a record can land in
    /// both. Records in neither bucket backfill nearby (original order
    /// preserved) until it holds `NEARBY_BACKFILL_TARGET` entries.
    fn classify(
        location: &str,
        records: Vec<InternshipRecord>,
    ) -> (Vec<InternshipRecord>, Vec<InternshipRecord>) {
        let location_lower = location.to_lowercase();

        let mut nearby = Vec::new();
        let mut remote = Vec::new();
        let mut leftovers = Vec::new();

        for record in records {
            let is_nearby = !location.is_empty()
                && record
                    .location_city
                    .to_lowercase()
                    .contains(&location_lower);
            let is_remote =
                record.mode.to_lowercase().contains("remote") || record.remote_work_allowed;

            if is_nearby {
                nearby.push(record.clone());
            }
            if is_remote {
                remote.push(record.clone());
            }
            if !is_nearby && !is_remote {
                leftovers.push(record);
            }
        }

        let mut leftovers = leftovers.into_iter();
        while nearby.len() < NEARBY_BACKFILL_TARGET {
            match leftovers.next() {
                Some(record) => nearby.push(record),
                None => break,
            }
        }

        (nearby, remote)
    }
}
