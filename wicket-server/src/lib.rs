//! HTTP boundary for the wicket account service.
//!
//! Exposes the account service over a small session-based web API: handlers,
//! the in-memory session store, the bearer-handle middleware, and the route
//! table, assembled around a shared [`infra::app_state::AppState`].

pub mod accounts;
pub mod infra;
pub mod routes;
pub mod sessions;

pub use infra::app_state::AppState;
pub use routes::create_api_router;
