//! Engine-level tests for the recommendation flow
//!
//! Exercises the orchestrator against in-memory stores and scripted scoring
//! services: cache short-circuiting, hydration, the fallback path, and the
//! upstream error taxonomy.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use internhub::error::ApiError;
use internhub::recommend::{
    RecommendParams, RecommendationEngine, ScoringError, ScoringPayload, ScoringRecommendations,
    ScoringResponse, ScoringService,
};
use internhub_store::{
    CacheConfig, Education, EducationLevel, InternshipRecord, MemoryInternshipStore,
    MemoryUserStore, RecommendationCache, UserRecord, UserStore,
};

/// Scoring service returning a fixed id set, counting invocations
struct ScriptedScoring {
    nearby_ids: Vec<String>,
    remote_ids: Vec<String>,
    calls: AtomicUsize,
}

impl ScriptedScoring {
    fn new(nearby_ids: Vec<String>, remote_ids: Vec<String>) -> Self {
        Self {
            nearby_ids,
            remote_ids,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ScoringService for ScriptedScoring {
    async fn score(&self, _payload: &ScoringPayload) -> Result<ScoringResponse, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ScoringResponse {
            recommendations: ScoringRecommendations {
                nearby_ids: self.nearby_ids.clone(),
                remote_ids: self.remote_ids.clone(),
            },
        })
    }
}

/// Scoring service that is never reachable
struct UnavailableScoring;

#[async_trait]
impl ScoringService for UnavailableScoring {
    async fn score(&self, _payload: &ScoringPayload) -> Result<ScoringResponse, ScoringError> {
        Err(ScoringError::Unavailable("connection refused".to_string()))
    }
}

/// Scoring service that answers with a malformed body
struct MalformedScoring;

#[async_trait]
impl ScoringService for MalformedScoring {
    async fn score(&self, _payload: &ScoringPayload) -> Result<ScoringResponse, ScoringError> {
        Err(ScoringError::BadResponse(
            "unparseable scoring response: missing field `recommendations`".to_string(),
        ))
    }
}

struct TestHarness {
    users: Arc<MemoryUserStore>,
    cache: RecommendationCache,
    engine: RecommendationEngine,
    user_id: String,
}

async fn harness(
    records: Vec<InternshipRecord>,
    scoring: Arc<dyn ScoringService>,
    cache_config: CacheConfig,
) -> TestHarness {
    let users = Arc::new(MemoryUserStore::new());
    let internships = Arc::new(MemoryInternshipStore::with_records(records));
    let cache = RecommendationCache::new(cache_config);

    let mut user = UserRecord::new("asha", "asha@example.com", "hash");
    user.skills = vec!["rust".to_string(), "sql".to_string()];
    user.sectors = vec!["technology".to_string(), "finance".to_string()];
    user.education = Education::Level(EducationLevel::Graduate);
    user.location = "Pune".to_string();
    let user_id = user.id.clone();
    users.insert(user).await.unwrap();

    let engine = RecommendationEngine::new(
        users.clone(),
        internships,
        cache.clone(),
        scoring,
    );

    TestHarness {
        users,
        cache,
        engine,
        user_id,
    }
}

#[tokio::test]
async fn test_unknown_identity_is_not_found() {
    let h = harness(Vec::new(), Arc::new(UnavailableScoring), CacheConfig::default()).await;

    let err = h
        .engine
        .get_recommendations("no-such-user", &RecommendParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn test_primary_path_hydrates_and_caches() {
    let a = InternshipRecord::new("A", "Co", "tech", "Pune");
    let b = InternshipRecord::new("B", "Co", "tech", "Remote").with_mode("remote");
    let a_id = a.id.clone();
    let b_id = b.id.clone();

    let scoring = Arc::new(ScriptedScoring::new(vec![a_id.clone()], vec![b_id.clone()]));
    let h = harness(vec![a, b], scoring.clone(), CacheConfig::default()).await;

    let result = h
        .engine
        .get_recommendations(&h.user_id, &RecommendParams::default())
        .await
        .unwrap();

    assert!(!result.is_fallback());
    assert_eq!(result.recommendations.nearby_ids, vec![a_id]);
    assert_eq!(result.recommendations.remote_ids, vec![b_id]);
    assert_eq!(result.recommendations.nearby_internships.len(), 1);
    assert_eq!(result.recommendations.remote_internships.len(), 1);
    assert_eq!(result.user_profile.location, "Pune");

    // Second identical request is served from cache: no new upstream call
    let again = h
        .engine
        .get_recommendations(&h.user_id, &RecommendParams::default())
        .await
        .unwrap();
    assert_eq!(again.recommendations.nearby_ids.len(), 1);
    assert_eq!(scoring.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_distance_override_changes_cache_key() {
    let scoring = Arc::new(ScriptedScoring::new(Vec::new(), Vec::new()));
    let h = harness(Vec::new(), scoring.clone(), CacheConfig::default()).await;

    h.engine
        .get_recommendations(&h.user_id, &RecommendParams::default())
        .await
        .unwrap();
    h.engine
        .get_recommendations(
            &h.user_id,
            &RecommendParams {
                max_distance_km: Some(50),
            },
        )
        .await
        .unwrap();

    // Different payloads miss each other's cache entries
    assert_eq!(scoring.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_hydration_drops_unknown_ids() {
    let a = InternshipRecord::new("A", "Co", "tech", "Pune");
    let a_id = a.id.clone();

    let scoring = Arc::new(ScriptedScoring::new(
        vec![a_id.clone(), "missing".to_string()],
        vec!["also-missing".to_string()],
    ));
    let h = harness(vec![a], scoring, CacheConfig::default()).await;

    let result = h
        .engine
        .get_recommendations(&h.user_id, &RecommendParams::default())
        .await
        .unwrap();

    // "missing" dropped from both the records and the id echo
    assert_eq!(result.recommendations.nearby_internships.len(), 1);
    assert_eq!(result.recommendations.nearby_ids, vec![a_id]);
    assert!(result.recommendations.remote_internships.is_empty());
    assert!(result.recommendations.remote_ids.is_empty());
}

#[tokio::test]
async fn test_unavailable_upstream_falls_back() {
    let records = vec![
        InternshipRecord::new("Near", "Co", "technology", "Pune"),
        InternshipRecord::new("Remote", "Co", "technology", "Delhi").with_mode("remote"),
    ];
    let h = harness(records, Arc::new(UnavailableScoring), CacheConfig::default()).await;

    let result = h
        .engine
        .get_recommendations(&h.user_id, &RecommendParams::default())
        .await
        .unwrap();

    assert!(result.is_fallback());
    assert!(result.message.is_some());
    assert_eq!(result.recommendations.nearby_internships.len(), 1);
    assert_eq!(result.recommendations.remote_internships.len(), 1);
}

#[tokio::test]
async fn test_fallback_result_cached_with_short_ttl() {
    // Tight TTLs so the test can watch the fallback entry expire first
    let config = CacheConfig::builder()
        .recommendation_ttl(Duration::from_secs(60))
        .fallback_ttl(Duration::from_millis(60))
        .build();
    let records = vec![InternshipRecord::new("Near", "Co", "technology", "Pune")];
    let h = harness(records, Arc::new(UnavailableScoring), config).await;

    let user = h.users.find_by_id(&h.user_id).await.unwrap().unwrap();
    let payload = ScoringPayload::from_profile(&user, None);
    let key = h.cache.recommendation_key(&h.user_id, &payload).unwrap();

    h.engine
        .get_recommendations(&h.user_id, &RecommendParams::default())
        .await
        .unwrap();

    // Entry exists right after the call...
    assert!(h.cache.get_recommendation(&key).await.unwrap().is_some());

    // ...and is gone after the fallback TTL, well before the primary TTL
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(h.cache.get_recommendation(&key).await.unwrap().is_none());
}

#[tokio::test]
async fn test_malformed_upstream_is_reported_not_masked() {
    let records = vec![InternshipRecord::new("Near", "Co", "technology", "Pune")];
    let h = harness(records, Arc::new(MalformedScoring), CacheConfig::default()).await;

    let err = h
        .engine
        .get_recommendations(&h.user_id, &RecommendParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::BadUpstream(_)));

    // Nothing was cached for the failed request
    let user = h.users.find_by_id(&h.user_id).await.unwrap().unwrap();
    let payload = ScoringPayload::from_profile(&user, None);
    let key = h.cache.recommendation_key(&h.user_id, &payload).unwrap();
    assert!(h.cache.get_recommendation(&key).await.unwrap().is_none());
}

#[tokio::test]
async fn test_empty_store_fallback_is_empty_result() {
    let h = harness(Vec::new(), Arc::new(UnavailableScoring), CacheConfig::default()).await;

    let result = h
        .engine
        .get_recommendations(&h.user_id, &RecommendParams::default())
        .await
        .unwrap();

    assert!(result.is_fallback());
    assert!(result.recommendations.is_empty());
}

#[tokio::test]
async fn test_profile_update_invalidates_cached_recommendation() {
    let scoring = Arc::new(ScriptedScoring::new(Vec::new(), Vec::new()));
    let h = harness(Vec::new(), scoring.clone(), CacheConfig::default()).await;

    h.engine
        .get_recommendations(&h.user_id, &RecommendParams::default())
        .await
        .unwrap();
    assert_eq!(scoring.calls.load(Ordering::SeqCst), 1);

    // Profile mutation invalidates the cached entry; the engine recomputes
    let update = internhub_store::ProfileUpdate {
        location: Some("Delhi".to_string()),
        ..Default::default()
    };
    h.users.update_profile(&h.user_id, &update).await.unwrap();
    h.cache.invalidate_user(&h.user_id).await.unwrap();

    h.engine
        .get_recommendations(&h.user_id, &RecommendParams::default())
        .await
        .unwrap();
    assert_eq!(scoring.calls.load(Ordering::SeqCst), 2);
}
