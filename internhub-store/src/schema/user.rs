//! User record and profile types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Coarse education level used across profiles and internship requirements
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "10th")]
    Tenth,
    #[serde(rename = "12th")]
    Twelfth,
    #[serde(rename = "diploma")]
    Diploma,
    #[serde(rename = "graduate")]
    Graduate,
}

impl EducationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::Tenth => "10th",
            EducationLevel::Twelfth => "12th",
            EducationLevel::Diploma => "diploma",
            EducationLevel::Graduate => "graduate",
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EducationLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "10th" | "tenth" => Ok(EducationLevel::Tenth),
            "12th" | "twelfth" => Ok(EducationLevel::Twelfth),
            "diploma" => Ok(EducationLevel::Diploma),
            "graduate" => Ok(EducationLevel::Graduate),
            _ => Err(()),
        }
    }
}

/// Structured education record with per-level flags
///
/// Profiles written by older clients carry this shape instead of a plain
/// level string; the highest flagged level wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationLevels {
    #[serde(default)]
    pub tenth: bool,
    #[serde(default)]
    pub twelfth: bool,
    #[serde(default)]
    pub diploma: bool,
    #[serde(default)]
    pub graduate: bool,
}

impl EducationLevels {
    /// Highest flagged level, if any
    pub fn highest(&self) -> Option<EducationLevel> {
        if self.graduate {
            Some(EducationLevel::Graduate)
        } else if self.diploma {
            Some(EducationLevel::Diploma)
        } else if self.twelfth {
            Some(EducationLevel::Twelfth)
        } else if self.tenth {
            Some(EducationLevel::Tenth)
        } else {
            None
        }
    }
}

/// Education as stored on a user profile
///
/// Two representations exist in the wild: a plain level string and a
/// structured record with per-level flags. Both are accepted on the wire;
/// `coarse_level` is the single accessor the rest of the system uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Education {
    /// Plain coarse level: "10th" | "12th" | "diploma" | "graduate"
    Level(EducationLevel),
    /// Structured per-level flags
    Levels(EducationLevels),
    /// Unrecognized or empty free text
    Raw(String),
}

impl Default for Education {
    fn default() -> Self {
        Education::Raw(String::new())
    }
}

impl Education {
    /// Map to a coarse level; unset or unrecognized education defaults to
    /// graduate, matching what the scoring payload expects.
    pub fn coarse_level(&self) -> EducationLevel {
        match self {
            Education::Level(level) => *level,
            Education::Levels(levels) => levels.highest().unwrap_or(EducationLevel::Graduate),
            Education::Raw(s) => s.parse().unwrap_or(EducationLevel::Graduate),
        }
    }
}

/// A stored user record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub sectors: Vec<String>,
    #[serde(default)]
    pub education: Education,
    #[serde(default)]
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Create a new user with an empty profile
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            skills: Vec::new(),
            sectors: Vec::new(),
            education: Education::default(),
            location: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial profile update; at least one field must be present
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sectors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Education>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ProfileUpdate {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.skills.is_none()
            && self.sectors.is_none()
            && self.education.is_none()
            && self.location.is_none()
    }

    /// Names of the fields this update touches
    pub fn updated_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.skills.is_some() {
            fields.push("skills");
        }
        if self.sectors.is_some() {
            fields.push("sectors");
        }
        if self.education.is_some() {
            fields.push("education");
        }
        if self.location.is_some() {
            fields.push("location");
        }
        fields
    }

    /// Apply the update in place
    pub fn apply(&self, user: &mut UserRecord) {
        if let Some(skills) = &self.skills {
            user.skills = skills.clone();
        }
        if let Some(sectors) = &self.sectors {
            user.sectors = sectors.clone();
        }
        if let Some(education) = &self.education {
            user.education = education.clone();
        }
        if let Some(location) = &self.location {
            user.location = location.clone();
        }
        user.updated_at = Utc::now();
    }
}
