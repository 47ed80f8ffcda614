//! In-memory store implementations
//!
//! Records live in insertion order, which stands in for the collection's
//! natural order. Useful as the default backend for development and as the
//! store implementation in tests.

use crate::error::{Result, StoreError};
use crate::schema::{InternshipFilter, InternshipRecord, ProfileUpdate, UserRecord};
use crate::store::{InternshipStore, UserStore};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-memory users collection
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.username == username || u.email == email)
            .cloned())
    }

    async fn insert(&self, user: UserRecord) -> Result<()> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.id == user.id) {
            return Err(StoreError::QueryError(format!(
                "duplicate user id: {}",
                user.id
            )));
        }
        users.push(user);
        Ok(())
    }

    async fn update_profile(&self, id: &str, update: &ProfileUpdate) -> Result<bool> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                update.apply(user);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// In-memory internships collection
#[derive(Default)]
pub struct MemoryInternshipStore {
    internships: RwLock<Vec<InternshipRecord>>,
}

impl MemoryInternshipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given records
    pub fn with_records(records: Vec<InternshipRecord>) -> Self {
        Self {
            internships: RwLock::new(records),
        }
    }

    /// Add a record
    pub async fn add(&self, record: InternshipRecord) {
        self.internships.write().await.push(record);
    }

    pub async fn len(&self) -> usize {
        self.internships.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.internships.read().await.is_empty()
    }
}

#[async_trait]
impl InternshipStore for MemoryInternshipStore {
    async fn find(
        &self,
        filter: &InternshipFilter,
        limit: usize,
        skip: usize,
    ) -> Result<Vec<InternshipRecord>> {
        let internships = self.internships.read().await;
        Ok(internships
            .iter()
            .filter(|r| filter.matches(r))
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<InternshipRecord>> {
        let internships = self.internships.read().await;
        Ok(internships
            .iter()
            .filter(|r| ids.iter().any(|id| *id == r.id))
            .cloned()
            .collect())
    }

    async fn find_one(&self, id: &str) -> Result<Option<InternshipRecord>> {
        let internships = self.internships.read().await;
        Ok(internships.iter().find(|r| r.id == id).cloned())
    }

    async fn count(&self, filter: &InternshipFilter) -> Result<u64> {
        let internships = self.internships.read().await;
        Ok(internships.iter().filter(|r| filter.matches(r)).count() as u64)
    }
}
