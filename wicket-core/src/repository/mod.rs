//! Profile persistence port and implementations.

mod memory;
mod postgres;

pub use memory::InMemoryProfileRepository;
pub use postgres::PostgresProfileRepository;

use async_trait::async_trait;

use crate::account::UserProfile;
use crate::error::Result;

/// Persistence port for account profiles.
///
/// Mutations report the number of rows they affected so the service can
/// enforce its exactly-one-row invariant. Lookups return `None` rather than
/// erroring for missing rows; credential checks go through the
/// `(identifier, digest)` pair lookup.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn insert(&self, profile: &UserProfile) -> Result<u64>;
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<UserProfile>>;
    async fn find_by_identifier_and_digest(
        &self,
        identifier: &str,
        digest: &str,
    ) -> Result<Option<UserProfile>>;
    async fn update_password(&self, identifier: &str, digest: &str) -> Result<u64>;
    async fn delete(&self, identifier: &str) -> Result<u64>;
    async fn exists(&self, identifier: &str) -> Result<bool>;
}
