use thiserror::Error;

use crate::account::ValidationError;

/// Error taxonomy for account operations.
///
/// Domain failures (`DuplicateIdentifier`, `Authorization`, `NotFound`,
/// `Validation`) are expected control flow and map to specific client-facing
/// statuses at the API boundary. `Persistence` and `Storage` are not: they
/// signal a broken storage invariant or a failing backend and are logged with
/// full context before being surfaced generically.
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("identifier is already registered")]
    DuplicateIdentifier,

    #[error("credential mismatch")]
    Authorization,

    #[error("profile not found")]
    NotFound,

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("storage invariant violated: {0}")]
    Persistence(String),

    #[error("database error: {0}")]
    Storage(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, AccountError>;
