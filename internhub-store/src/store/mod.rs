//! Store traits over the user and internship collections
//!
//! The document store itself is an external collaborator; these traits are
//! the seam the rest of the system talks through. `memory` provides the
//! in-process implementation used as the default backend and in tests.

pub mod memory;

use crate::error::Result;
use crate::schema::{InternshipFilter, InternshipRecord, ProfileUpdate, UserRecord};
use async_trait::async_trait;

/// Query/update interface over the users collection
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by id
    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>>;

    /// Look up a user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    /// Look up a user by username or email (duplicate check on registration)
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<UserRecord>>;

    /// Insert a new user record
    async fn insert(&self, user: UserRecord) -> Result<()>;

    /// Apply a partial profile update; returns false when no record matched
    async fn update_profile(&self, id: &str, update: &ProfileUpdate) -> Result<bool>;
}

/// Query interface over the internships collection
#[async_trait]
pub trait InternshipStore: Send + Sync {
    /// Find records matching the filter, in natural order
    async fn find(
        &self,
        filter: &InternshipFilter,
        limit: usize,
        skip: usize,
    ) -> Result<Vec<InternshipRecord>>;

    /// Batched lookup by id; unknown ids are silently absent from the result
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<InternshipRecord>>;

    /// Look up a single record by id
    async fn find_one(&self, id: &str) -> Result<Option<InternshipRecord>>;

    /// Count records matching the filter
    async fn count(&self, filter: &InternshipFilter) -> Result<u64>;
}
