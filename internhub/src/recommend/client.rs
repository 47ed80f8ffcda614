//! External scoring service client
//!
//! The recommendation model is consumed as a request/response capability
//! behind the `ScoringService` trait. The two failure modes are kept
//! distinct: an unreachable service triggers the local fallback, a reachable
//! but malformed one is reported to the caller.

use async_trait::async_trait;
use internhub_store::UserRecord;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default scoring radius when the request does not override it, in km
pub const DEFAULT_MAX_DISTANCE_KM: u32 = 150;

/// Payload sent to the scoring service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringPayload {
    /// Skills joined into one space-separated string
    pub skills: String,
    /// Only the first declared sector is sent
    pub sectors: String,
    pub education_level: String,
    pub city_name: String,
    pub max_distance_km: u32,
}

impl ScoringPayload {
    /// Build the payload from a user profile and an optional distance
    /// override
    pub fn from_profile(user: &UserRecord, max_distance_km: Option<u32>) -> Self {
        Self {
            skills: user.skills.join(" "),
            sectors: user.sectors.first().cloned().unwrap_or_default(),
            education_level: user.education.coarse_level().to_string(),
            city_name: user.location.clone(),
            max_distance_km: max_distance_km.unwrap_or(DEFAULT_MAX_DISTANCE_KM),
        }
    }
}

/// Id buckets returned by the scoring service; either list may be absent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringRecommendations {
    #[serde(default)]
    pub nearby_ids: Vec<String>,
    #[serde(default)]
    pub remote_ids: Vec<String>,
}

/// Well-formed scoring response
///
/// `recommendations` is required: a body without it is malformed.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringResponse {
    pub recommendations: ScoringRecommendations,
}

/// Scoring call failure modes
#[derive(Error, Debug)]
pub enum ScoringError {
    /// Network failure, timeout, or non-success status
    #[error("scoring service unavailable: {0}")]
    Unavailable(String),

    /// Reachable service, malformed body
    #[error("{0}")]
    BadResponse(String),
}

/// The external recommendation model as a capability
#[async_trait]
pub trait ScoringService: Send + Sync {
    async fn score(&self, payload: &ScoringPayload) -> Result<ScoringResponse, ScoringError>;
}

/// HTTP client for the scoring service
pub struct HttpScoringService {
    client: reqwest::Client,
    url: String,
}

impl HttpScoringService {
    /// Create a client with the given endpoint and request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ScoringService for HttpScoringService {
    async fn score(&self, payload: &ScoringPayload) -> Result<ScoringResponse, ScoringError> {
        debug!("Calling scoring service at {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| ScoringError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoringError::Unavailable(format!(
                "scoring service returned {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScoringError::Unavailable(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| {
            ScoringError::BadResponse(format!("unparseable scoring response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use internhub_store::Education;

    fn profile() -> UserRecord {
        let mut user = UserRecord::new("asha", "asha@example.com", "hash");
        user.skills = vec!["rust".to_string(), "sql".to_string()];
        user.sectors = vec!["technology".to_string(), "finance".to_string()];
        user.education = Education::Level(internhub_store::EducationLevel::Twelfth);
        user.location = "Pune".to_string();
        user
    }

    #[test]
    fn test_payload_from_profile() {
        let payload = ScoringPayload::from_profile(&profile(), None);

        assert_eq!(payload.skills, "rust sql");
        // Only the first sector is sent
        assert_eq!(payload.sectors, "technology");
        assert_eq!(payload.education_level, "12th");
        assert_eq!(payload.city_name, "Pune");
        assert_eq!(payload.max_distance_km, DEFAULT_MAX_DISTANCE_KM);
    }

    #[test]
    fn test_payload_distance_override() {
        let payload = ScoringPayload::from_profile(&profile(), Some(50));
        assert_eq!(payload.max_distance_km, 50);
    }

    #[test]
    fn test_payload_empty_profile() {
        let user = UserRecord::new("bare", "bare@example.com", "hash");
        let payload = ScoringPayload::from_profile(&user, None);

        assert_eq!(payload.skills, "");
        assert_eq!(payload.sectors, "");
        assert_eq!(payload.education_level, "graduate");
        assert_eq!(payload.city_name, "");
    }

    #[tokio::test]
    async fn test_http_scoring_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/recommend");
            then.status(200).json_body(serde_json::json!({
                "recommendations": {
                    "nearby_ids": ["a", "b"],
                    "remote_ids": ["c"]
                }
            }));
        });

        let service =
            HttpScoringService::new(server.url("/recommend"), Duration::from_secs(2)).unwrap();
        let response = service
            .score(&ScoringPayload::from_profile(&profile(), None))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(response.recommendations.nearby_ids, vec!["a", "b"]);
        assert_eq!(response.recommendations.remote_ids, vec!["c"]);
    }

    #[tokio::test]
    async fn test_http_scoring_missing_id_lists_default_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/recommend");
            then.status(200)
                .json_body(serde_json::json!({ "recommendations": {} }));
        });

        let service =
            HttpScoringService::new(server.url("/recommend"), Duration::from_secs(2)).unwrap();
        let response = service
            .score(&ScoringPayload::from_profile(&profile(), None))
            .await
            .unwrap();

        assert!(response.recommendations.nearby_ids.is_empty());
        assert!(response.recommendations.remote_ids.is_empty());
    }

    #[tokio::test]
    async fn test_http_scoring_non_success_is_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/recommend");
            then.status(503);
        });

        let service =
            HttpScoringService::new(server.url("/recommend"), Duration::from_secs(2)).unwrap();
        let err = service
            .score(&ScoringPayload::from_profile(&profile(), None))
            .await
            .unwrap_err();

        assert!(matches!(err, ScoringError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_http_scoring_malformed_body_is_bad_response() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/recommend");
            then.status(200).json_body(serde_json::json!({ "foo": "bar" }));
        });

        let service =
            HttpScoringService::new(server.url("/recommend"), Duration::from_secs(2)).unwrap();
        let err = service
            .score(&ScoringPayload::from_profile(&profile(), None))
            .await
            .unwrap_err();

        assert!(matches!(err, ScoringError::BadResponse(_)));
    }

    #[tokio::test]
    async fn test_http_scoring_connection_refused_is_unavailable() {
        // Nothing is listening on this port
        let service =
            HttpScoringService::new("http://127.0.0.1:1/recommend", Duration::from_secs(1))
                .unwrap();
        let err = service
            .score(&ScoringPayload::from_profile(&profile(), None))
            .await
            .unwrap_err();

        assert!(matches!(err, ScoringError::Unavailable(_)));
    }
}
