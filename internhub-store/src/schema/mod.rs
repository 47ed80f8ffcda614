//! Document schema for the user and internship collections

pub mod internship;
pub mod recommendation;
pub mod user;

pub use internship::{InternshipFilter, InternshipRecord};
pub use recommendation::{ProfileEcho, RecommendationBuckets, RecommendationResult};
pub use user::{Education, EducationLevel, EducationLevels, ProfileUpdate, UserRecord};
