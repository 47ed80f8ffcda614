//! Recommendation result types

use crate::schema::internship::InternshipRecord;
use crate::schema::user::UserRecord;
use serde::{Deserialize, Serialize};

/// The two recommendation buckets with ids and hydrated records
///
/// Invariant: `nearby_ids` and `nearby_internships` agree in length and
/// order, same for the remote pair. Ids that fail to hydrate are dropped
/// from both sides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationBuckets {
    pub nearby_ids: Vec<String>,
    pub remote_ids: Vec<String>,
    pub nearby_internships: Vec<InternshipRecord>,
    pub remote_internships: Vec<InternshipRecord>,
}

impl RecommendationBuckets {
    /// Build buckets from hydrated records, deriving the id lists
    pub fn from_records(
        nearby: Vec<InternshipRecord>,
        remote: Vec<InternshipRecord>,
    ) -> Self {
        Self {
            nearby_ids: nearby.iter().map(|r| r.id.clone()).collect(),
            remote_ids: remote.iter().map(|r| r.id.clone()).collect(),
            nearby_internships: nearby,
            remote_internships: remote,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nearby_internships.is_empty() && self.remote_internships.is_empty()
    }
}

/// Echo of the profile a recommendation was computed from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileEcho {
    pub skills: Vec<String>,
    pub sectors: Vec<String>,
    pub education_level: String,
    pub location: String,
}

impl ProfileEcho {
    pub fn from_user(user: &UserRecord) -> Self {
        Self {
            skills: user.skills.clone(),
            sectors: user.sectors.clone(),
            education_level: user.education.coarse_level().to_string(),
            location: user.location.clone(),
        }
    }
}

/// A complete recommendation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub recommendations: RecommendationBuckets,
    pub user_profile: ProfileEcho,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RecommendationResult {
    /// A result produced by the external scoring service
    pub fn primary(recommendations: RecommendationBuckets, user_profile: ProfileEcho) -> Self {
        Self {
            recommendations,
            user_profile,
            fallback_mode: None,
            message: None,
        }
    }

    /// A result synthesized locally because the scoring service was
    /// unreachable
    pub fn fallback(
        recommendations: RecommendationBuckets,
        user_profile: ProfileEcho,
        message: impl Into<String>,
    ) -> Self {
        Self {
            recommendations,
            user_profile,
            fallback_mode: Some(true),
            message: Some(message.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback_mode.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets_from_records_align_ids() {
        let a = InternshipRecord::new("A", "Co", "tech", "Pune");
        let b = InternshipRecord::new("B", "Co", "tech", "Delhi");
        let a_id = a.id.clone();
        let b_id = b.id.clone();

        let buckets = RecommendationBuckets::from_records(vec![a], vec![b]);

        assert_eq!(buckets.nearby_ids, vec![a_id]);
        assert_eq!(buckets.remote_ids, vec![b_id]);
        assert_eq!(buckets.nearby_ids.len(), buckets.nearby_internships.len());
        assert_eq!(buckets.remote_ids.len(), buckets.remote_internships.len());
    }

    #[test]
    fn test_fallback_flag_serialization() {
        let primary = RecommendationResult::primary(
            RecommendationBuckets::default(),
            ProfileEcho::default(),
        );
        let json = serde_json::to_value(&primary).unwrap();
        assert!(json.get("fallback_mode").is_none());

        let fallback = RecommendationResult::fallback(
            RecommendationBuckets::default(),
            ProfileEcho::default(),
            "service unavailable",
        );
        let json = serde_json::to_value(&fallback).unwrap();
        assert_eq!(json["fallback_mode"], true);
        assert!(fallback.is_fallback());
    }
}
