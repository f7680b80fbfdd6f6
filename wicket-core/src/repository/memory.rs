use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::account::UserProfile;
use crate::error::{AccountError, Result};
use crate::repository::ProfileRepository;

/// In-memory implementation of the `ProfileRepository` port.
///
/// Backs the integration-test application and any embedded use where a
/// database is unwanted. Matches the Postgres implementation's semantics,
/// including the unique-identifier rejection on insert.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<HashMap<String, UserProfile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn insert(&self, profile: &UserProfile) -> Result<u64> {
        let mut profiles = self.profiles.lock().await;
        if profiles.contains_key(&profile.identifier) {
            return Err(AccountError::DuplicateIdentifier);
        }
        profiles.insert(profile.identifier.clone(), profile.clone());
        Ok(1)
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<UserProfile>> {
        let profiles = self.profiles.lock().await;
        Ok(profiles.get(identifier).cloned())
    }

    async fn find_by_identifier_and_digest(
        &self,
        identifier: &str,
        digest: &str,
    ) -> Result<Option<UserProfile>> {
        let profiles = self.profiles.lock().await;
        Ok(profiles
            .get(identifier)
            .filter(|profile| profile.password_digest == digest)
            .cloned())
    }

    async fn update_password(&self, identifier: &str, digest: &str) -> Result<u64> {
        let mut profiles = self.profiles.lock().await;
        match profiles.get_mut(identifier) {
            Some(profile) => {
                profile.password_digest = digest.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, identifier: &str) -> Result<u64> {
        let mut profiles = self.profiles.lock().await;
        Ok(u64::from(profiles.remove(identifier).is_some()))
    }

    async fn exists(&self, identifier: &str) -> Result<bool> {
        let profiles = self.profiles.lock().await;
        Ok(profiles.contains_key(identifier))
    }
}
