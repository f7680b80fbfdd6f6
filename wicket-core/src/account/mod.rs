//! Account domain: profiles, request payloads, and the account service.

pub mod profile;
pub mod service;

pub use profile::{
    ChangePasswordRequest, DeleteAccountRequest, Password, ProfileResponse, Role, SignInRequest,
    SignInResponse, SignUpRequest, UserProfile, ValidationError,
};
pub use service::AccountService;
