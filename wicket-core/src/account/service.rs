//! Account service
//!
//! Orchestrates registration, authentication, password change, and deletion
//! over the profile repository and the password digest, and enforces the
//! domain invariants in one place: identifiers are unique, guarded mutations
//! re-verify the current password first, and every successful mutation
//! touches exactly one stored row.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::account::{SignUpRequest, UserProfile};
use crate::crypto::PasswordHasher;
use crate::error::{AccountError, Result};
use crate::repository::ProfileRepository;

/// Service for all account operations.
pub struct AccountService {
    repository: Arc<dyn ProfileRepository>,
    hasher: PasswordHasher,
}

impl AccountService {
    pub fn new(repository: Arc<dyn ProfileRepository>, hasher: PasswordHasher) -> Self {
        Self { repository, hasher }
    }

    /// Register a new account.
    ///
    /// Fails with `DuplicateIdentifier` when the identifier is taken. The
    /// pre-check gives the common case a clean error; the storage layer's
    /// unique constraint covers the race between check and insert. On
    /// success the creation time is stamped and the plaintext password is
    /// replaced by its digest before anything is persisted.
    pub async fn register(&self, request: SignUpRequest) -> Result<UserProfile> {
        if self.repository.exists(&request.identifier).await? {
            return Err(AccountError::DuplicateIdentifier);
        }

        let digest = self.hasher.digest(request.password.expose());
        let profile = UserProfile {
            identifier: request.identifier,
            password_digest: digest,
            display_name: request.display_name,
            phone: request.phone,
            address: request.address,
            role: request.role,
            created_at: Utc::now(),
        };

        let rows = self.repository.insert(&profile).await?;
        if rows != 1 {
            error!(
                identifier = %profile.identifier,
                rows,
                "profile insert affected an unexpected row count"
            );
            return Err(AccountError::Persistence(format!(
                "insert affected {rows} rows"
            )));
        }

        info!("registered account {}", profile.identifier);
        Ok(profile)
    }

    /// Verify credentials.
    ///
    /// Returns the matched profile, or `None` when no profile matches the
    /// `(identifier, digest)` pair. Invalid credentials are a result, not an
    /// error; callers decide how to surface the miss.
    pub async fn authenticate(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<Option<UserProfile>> {
        let digest = self.hasher.digest(password);
        self.repository
            .find_by_identifier_and_digest(identifier, &digest)
            .await
    }

    /// Replace the stored password digest after re-verifying the current
    /// password.
    ///
    /// A mismatch fails with `Authorization` whether the identifier is
    /// missing or the password is wrong; the two cases are indistinguishable
    /// to the caller.
    pub async fn change_password(
        &self,
        identifier: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        if self.authenticate(identifier, current_password).await?.is_none() {
            return Err(AccountError::Authorization);
        }

        let digest = self.hasher.digest(new_password);
        let rows = self.repository.update_password(identifier, &digest).await?;
        if rows != 1 {
            error!(
                identifier,
                rows, "password update affected an unexpected row count"
            );
            return Err(AccountError::Persistence(format!(
                "password update affected {rows} rows"
            )));
        }

        info!("password changed for account {identifier}");
        Ok(())
    }

    /// Remove the account after re-verifying the password.
    pub async fn delete_account(&self, identifier: &str, password: &str) -> Result<()> {
        if self.authenticate(identifier, password).await?.is_none() {
            return Err(AccountError::Authorization);
        }

        let rows = self.repository.delete(identifier).await?;
        if rows != 1 {
            error!(
                identifier,
                rows, "profile delete affected an unexpected row count"
            );
            return Err(AccountError::Persistence(format!(
                "delete affected {rows} rows"
            )));
        }

        info!("deleted account {identifier}");
        Ok(())
    }

    /// Look up a stored profile. `None` for a missing identifier.
    pub async fn get_profile(&self, identifier: &str) -> Result<Option<UserProfile>> {
        self.repository.find_by_identifier(identifier).await
    }
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService").finish_non_exhaustive()
    }
}
