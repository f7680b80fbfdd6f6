//! Account API: handlers and the session-handle middleware.

pub mod handlers;
pub mod middleware;

pub use middleware::SessionIdentity;
