//! Storage adapters for the document store
//!
//! The service depends on these traits only; the MongoDB implementations in
//! [`mongo`] and the in-memory doubles used by the tests satisfy the same
//! contracts.

use async_trait::async_trait;
use common::error::StoreResult;

use crate::models::{Sale, User, UserProfile};

/// Create/lookup of user records by credential
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Store a new user, returning the assigned id
    async fn create(&self, user: &User) -> StoreResult<String>;

    /// Exact (username, digest) match; errors when nothing matches
    async fn find_by_credentials(
        &self,
        username: &str,
        password_digest: &str,
    ) -> StoreResult<UserProfile>;
}

/// CRUD over sale records
#[async_trait]
pub trait SaleStore: Send + Sync {
    async fn create(&self, sale: &Sale) -> StoreResult<String>;
    async fn get_one(&self, id: &str) -> StoreResult<Sale>;
    async fn get_all(&self) -> StoreResult<Vec<Sale>>;
    /// Replace the record identified by `sale.id`; `Missing` if absent
    async fn update(&self, sale: &Sale) -> StoreResult<()>;
    /// Remove the record; `Missing` if absent
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

pub mod mongo;
