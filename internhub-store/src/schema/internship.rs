//! Internship record and filter types

use crate::schema::user::EducationLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored internship posting
///
/// Read-only from this crate's perspective; postings are owned by an
/// upstream ingestion pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternshipRecord {
    pub id: String,
    pub title: String,
    pub company_name: String,
    pub description: String,
    pub sector: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub min_education: EducationLevel,
    pub location_city: String,
    pub location_state: String,
    pub duration_weeks: u32,
    pub stipend: i64,
    /// Free text, e.g. "onsite", "hybrid", "remote"
    pub mode: String,
    pub application_link: String,
    pub posted_date: DateTime<Utc>,
    pub application_deadline: DateTime<Utc>,
    pub slots_available: u32,
    pub company_size: String,
    pub remote_work_allowed: bool,
    pub certificate_provided: bool,
}

impl InternshipRecord {
    /// Create a record with the given identity fields and sensible defaults,
    /// for seeding and tests
    pub fn new(
        title: impl Into<String>,
        company_name: impl Into<String>,
        sector: impl Into<String>,
        location_city: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            company_name: company_name.into(),
            description: String::new(),
            sector: sector.into(),
            skills: Vec::new(),
            min_education: EducationLevel::Graduate,
            location_city: location_city.into(),
            location_state: String::new(),
            duration_weeks: 8,
            stipend: 0,
            mode: "onsite".to_string(),
            application_link: String::new(),
            posted_date: now,
            application_deadline: now + chrono::Duration::days(30),
            slots_available: 1,
            company_size: String::new(),
            remote_work_allowed: false,
            certificate_provided: false,
        }
    }

    pub fn with_skills(mut self, skills: Vec<String>) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    pub fn with_stipend(mut self, stipend: i64) -> Self {
        self.stipend = stipend;
        self
    }

    pub fn with_remote_allowed(mut self, allowed: bool) -> Self {
        self.remote_work_allowed = allowed;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Case-insensitive substring test
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Declarative filter over internship records
///
/// Covers the predicate set the store interface supports: membership with
/// case-insensitive substring semantics, substring matches, free text over
/// several fields, and a stipend range. An empty filter matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InternshipFilter {
    /// Sector matches any of these (case-insensitive substring)
    pub sectors_any: Option<Vec<String>>,

    /// City contains this (case-insensitive)
    pub city_contains: Option<String>,

    /// Any record skill matches any of these (case-insensitive substring)
    pub skills_any: Option<Vec<String>>,

    /// Mode contains this (case-insensitive)
    pub mode_contains: Option<String>,

    /// Free text over title, company name, description, and skills
    pub text: Option<String>,

    /// Minimum stipend (inclusive)
    pub stipend_min: Option<i64>,

    /// Maximum stipend (inclusive)
    pub stipend_max: Option<i64>,
}

impl InternshipFilter {
    /// Filter matching everything
    pub fn any() -> Self {
        Self::default()
    }

    pub fn sectors(sectors: &[String]) -> Self {
        Self {
            sectors_any: Some(sectors.to_vec()),
            ..Default::default()
        }
    }

    pub fn city(city: impl Into<String>) -> Self {
        Self {
            city_contains: Some(city.into()),
            ..Default::default()
        }
    }

    pub fn skills(skills: &[String]) -> Self {
        Self {
            skills_any: Some(skills.to_vec()),
            ..Default::default()
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city_contains = Some(city.into());
        self
    }

    /// Evaluate the filter against a record
    pub fn matches(&self, record: &InternshipRecord) -> bool {
        if let Some(sectors) = &self.sectors_any {
            if !sectors.iter().any(|s| contains_ci(&record.sector, s)) {
                return false;
            }
        }

        if let Some(city) = &self.city_contains {
            if !contains_ci(&record.location_city, city) {
                return false;
            }
        }

        if let Some(skills) = &self.skills_any {
            let matched = record
                .skills
                .iter()
                .any(|rs| skills.iter().any(|us| contains_ci(rs, us)));
            if !matched {
                return false;
            }
        }

        if let Some(mode) = &self.mode_contains {
            if !contains_ci(&record.mode, mode) {
                return false;
            }
        }

        if let Some(text) = &self.text {
            let matched = contains_ci(&record.title, text)
                || contains_ci(&record.company_name, text)
                || contains_ci(&record.description, text)
                || record.skills.iter().any(|s| contains_ci(s, text));
            if !matched {
                return false;
            }
        }

        if let Some(min) = self.stipend_min {
            if record.stipend < min {
                return false;
            }
        }

        if let Some(max) = self.stipend_max {
            if record.stipend > max {
                return false;
            }
        }

        true
    }
}
