//! # Wicket Core
//!
//! Core library for the wicket account service, providing the account domain
//! types, the deterministic password digest, the profile persistence port,
//! and the account service that ties them together.
//!
//! ## Overview
//!
//! `wicket-core` is the foundation of the wicket backend, offering:
//!
//! - **Account Domain**: Profile types, role classes, and request payloads
//! - **Password Digests**: Peppered one-way digests for credential storage
//! - **Persistence Port**: Trait-based repository with PostgreSQL and
//!   in-memory implementations
//! - **Account Service**: Registration, authentication, password change,
//!   and deletion with the domain invariants enforced in one place
//!
//! ## Architecture
//!
//! The crate is organized into a few key modules:
//!
//! - [`account`]: Profile types and the account service
//! - [`crypto`]: Password digest construction
//! - [`repository`]: The `ProfileRepository` port and its implementations
//! - [`error`]: Error taxonomy shared across the workspace
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use wicket_core::{
//!     account::{AccountService, SignUpRequest},
//!     crypto::PasswordHasher,
//!     repository::InMemoryProfileRepository,
//! };
//!
//! async fn register_alice() -> wicket_core::Result<()> {
//!     let service = AccountService::new(
//!         Arc::new(InMemoryProfileRepository::new()),
//!         PasswordHasher::new("pepper"),
//!     );
//!     let request = SignUpRequest::new("alice", "secure_password", "Alice");
//!     service.register(request).await?;
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

/// Account domain types and the account service
pub mod account;

/// Password digest construction
pub mod crypto;

/// Error types and error handling utilities
pub mod error;

/// Profile persistence port and implementations
pub mod repository;

/// Embedded database migrations
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use account::{AccountService, Role, UserProfile};
pub use crypto::PasswordHasher;
pub use error::{AccountError, Result};
pub use repository::ProfileRepository;
