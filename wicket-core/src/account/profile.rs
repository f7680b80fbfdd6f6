//! Account profiles and request payloads
//!
//! This module provides the core types for account management in wicket:
//! the stored profile, the member/admin role classes, and the request
//! payloads accepted at the API boundary.
//!
//! ## Account Flow
//!
//! 1. **Registration**: An account is created with a unique identifier and
//!    a password that is digested before it is persisted
//! 2. **Sign-in**: Credentials are verified by digest lookup, and the session
//!    layer binds the identity under its role-class slot
//! 3. **Guarded mutations**: Password change and deletion re-verify the
//!    current password before touching the stored record
//!
//! ## Security
//!
//! - Plaintext passwords live in [`Password`] values that are zeroized on
//!   drop and redacted from `Debug` output
//! - The stored digest is never serialized back out; responses carry
//!   [`ProfileResponse`], which has no credential field
//!
//! ## Example
//!
//! ```
//! use wicket_core::account::SignUpRequest;
//!
//! let request = SignUpRequest::new("alice", "secure_password", "Alice");
//! assert!(request.validate().is_ok());
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The two supported identity categories.
///
/// A profile carries exactly one role, and the session store keys its
/// identity slots by the same two classes: a handle can hold at most one
/// member identity and one admin identity at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plaintext password with a deliberately short life.
///
/// The inner string is zeroized when the value is dropped and never appears
/// in `Debug` output. Handlers digest it once and let it go out of scope.
#[derive(Clone, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the plaintext for digesting or validation.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// A stored account profile.
///
/// The identifier is unique and immutable once created. `password_digest`
/// is the only field mutated after registration (by password change); the
/// row is removed entirely by deletion. `created_at` is stamped server-side
/// at registration and never touched again.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    /// Unique account identifier
    pub identifier: String,
    /// Deterministic one-way digest of the password
    pub password_digest: String,
    /// Display name shown to other users
    pub display_name: String,
    /// Optional contact phone number
    pub phone: Option<String>,
    /// Optional contact address
    pub address: Option<String>,
    /// Role class the profile signs in under
    pub role: Role,
    /// Timestamp of registration
    pub created_at: DateTime<Utc>,
}

/// Validation errors for account input, rejected before the service layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid identifier: must be 3-30 characters, alphanumeric or underscore")]
    InvalidIdentifier,

    #[error("password too short: minimum 8 characters required")]
    PasswordTooShort,

    #[error("invalid display name: must be 1-100 characters")]
    InvalidDisplayName,
}

/// Sign-up request payload
///
/// Used to create a new account. The identifier must be unique and is
/// validated for shape before the service is invoked.
///
/// # Example
///
/// ```json
/// {
///   "identifier": "alice",
///   "password": "secure_password",
///   "display_name": "Alice Smith",
///   "phone": "010-1234-5678"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    /// Desired account identifier (3-30 chars, alphanumeric + underscore)
    pub identifier: String,
    /// Plaintext password, digested before persistence
    pub password: Password,
    /// Display name for the account
    pub display_name: String,
    /// Optional contact phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Optional contact address
    #[serde(default)]
    pub address: Option<String>,
    /// Role class, defaults to member
    #[serde(default)]
    pub role: Role,
}

impl SignUpRequest {
    pub fn new(
        identifier: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            password: Password::new(password),
            display_name: display_name.into(),
            phone: None,
            address: None,
            role: Role::Member,
        }
    }

    /// Validate the request shape.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.identifier.len() < 3 || self.identifier.len() > 30 {
            return Err(ValidationError::InvalidIdentifier);
        }

        if !self
            .identifier
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_')
        {
            return Err(ValidationError::InvalidIdentifier);
        }

        if self.password.len() < 8 {
            return Err(ValidationError::PasswordTooShort);
        }

        if self.display_name.is_empty() || self.display_name.len() > 100 {
            return Err(ValidationError::InvalidDisplayName);
        }

        Ok(())
    }
}

/// Sign-in request payload
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    /// Account identifier
    pub identifier: String,
    /// Plaintext password, verified by digest lookup
    pub password: Password,
}

/// Password-change request payload.
///
/// The current password is re-verified before the stored digest is replaced.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: Password,
    pub new_password: Password,
}

impl ChangePasswordRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.new_password.len() < 8 {
            return Err(ValidationError::PasswordTooShort);
        }
        Ok(())
    }
}

/// Account-deletion request payload.
#[derive(Debug, Deserialize)]
pub struct DeleteAccountRequest {
    pub password: Password,
}

/// Profile payload returned to clients. Carries no credential material.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub identifier: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            identifier: profile.identifier,
            display_name: profile.display_name,
            phone: profile.phone,
            address: profile.address,
            role: profile.role,
            created_at: profile.created_at,
        }
    }
}

/// Successful sign-in response: the opaque session handle plus the profile.
#[derive(Debug, Clone, Serialize)]
pub struct SignInResponse {
    /// Opaque handle identifying the session; presented as a bearer token
    pub session_handle: String,
    pub profile: ProfileResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SignUpRequest {
        SignUpRequest::new("alice", "secure_password", "Alice")
    }

    #[test]
    fn sign_up_validation_accepts_well_formed_input() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn sign_up_validation_rejects_bad_identifiers() {
        let mut short = request();
        short.identifier = "ab".into();
        assert!(matches!(
            short.validate(),
            Err(ValidationError::InvalidIdentifier)
        ));

        let mut long = request();
        long.identifier = "a".repeat(31);
        assert!(matches!(
            long.validate(),
            Err(ValidationError::InvalidIdentifier)
        ));

        let mut symbols = request();
        symbols.identifier = "alice@home".into();
        assert!(matches!(
            symbols.validate(),
            Err(ValidationError::InvalidIdentifier)
        ));
    }

    #[test]
    fn sign_up_validation_rejects_short_passwords() {
        let mut weak = request();
        weak.password = Password::new("short");
        assert!(matches!(
            weak.validate(),
            Err(ValidationError::PasswordTooShort)
        ));
    }

    #[test]
    fn sign_up_validation_rejects_bad_display_names() {
        let mut empty = request();
        empty.display_name = String::new();
        assert!(matches!(
            empty.validate(),
            Err(ValidationError::InvalidDisplayName)
        ));
    }

    #[test]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter22");
        assert_eq!(format!("{password:?}"), "Password(<redacted>)");
    }

    #[test]
    fn role_deserializes_lowercase() {
        let role: Role = serde_json::from_str("\"admin\"").expect("role parses");
        assert_eq!(role, Role::Admin);
        assert_eq!(Role::default(), Role::Member);
    }
}
