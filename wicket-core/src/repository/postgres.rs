use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::account::{Role, UserProfile};
use crate::error::{AccountError, Result};
use crate::repository::ProfileRepository;

/// PostgreSQL-backed implementation of the `ProfileRepository` port.
///
/// Uniqueness of the identifier is enforced by the primary key; a unique
/// violation on insert is surfaced as `DuplicateIdentifier`, which makes
/// concurrent registrations for the same identifier race-safe without
/// application-level locks.
#[derive(Clone, Debug)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    identifier: String,
    password_digest: String,
    display_name: String,
    phone: Option<String>,
    address: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for UserProfile {
    type Error = AccountError;

    fn try_from(row: ProfileRow) -> Result<Self> {
        let role = match row.role.as_str() {
            "member" => Role::Member,
            "admin" => Role::Admin,
            other => {
                return Err(AccountError::Persistence(format!(
                    "unknown role '{other}' stored for profile {}",
                    row.identifier
                )));
            }
        };

        Ok(Self {
            identifier: row.identifier,
            password_digest: row.password_digest,
            display_name: row.display_name,
            phone: row.phone,
            address: row.address,
            role,
            created_at: row.created_at,
        })
    }
}

const PROFILE_COLUMNS: &str =
    "identifier, password_digest, display_name, phone, address, role, created_at";

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn insert(&self, profile: &UserProfile) -> Result<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_profiles (
                identifier, password_digest, display_name,
                phone, address, role, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&profile.identifier)
        .bind(&profile.password_digest)
        .bind(&profile.display_name)
        .bind(&profile.phone)
        .bind(&profile.address)
        .bind(profile.role.as_str())
        .bind(profile.created_at)
        .execute(self.pool())
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation())
            {
                AccountError::DuplicateIdentifier
            } else {
                AccountError::Storage(e)
            }
        })?;

        Ok(result.rows_affected())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<UserProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE identifier = $1"
        ))
        .bind(identifier)
        .fetch_optional(self.pool())
        .await?;

        row.map(UserProfile::try_from).transpose()
    }

    async fn find_by_identifier_and_digest(
        &self,
        identifier: &str,
        digest: &str,
    ) -> Result<Option<UserProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM user_profiles \
             WHERE identifier = $1 AND password_digest = $2"
        ))
        .bind(identifier)
        .bind(digest)
        .fetch_optional(self.pool())
        .await?;

        row.map(UserProfile::try_from).transpose()
    }

    async fn update_password(&self, identifier: &str, digest: &str) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE user_profiles SET password_digest = $2 WHERE identifier = $1",
        )
        .bind(identifier)
        .bind(digest)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, identifier: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM user_profiles WHERE identifier = $1")
            .bind(identifier)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected())
    }

    async fn exists(&self, identifier: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM user_profiles WHERE identifier = $1)",
        )
        .bind(identifier)
        .fetch_one(self.pool())
        .await?;

        Ok(exists)
    }
}
