use std::sync::Arc;

use anyhow::Result;
use axum_test::TestServer;
use chrono::Duration;

use wicket_core::{
    account::AccountService, crypto::PasswordHasher, repository::InMemoryProfileRepository,
};
use wicket_server::{
    infra::{app_state::AppState, config::Config},
    routes::create_api_router,
    sessions::SessionStore,
};

/// Build a test server over the in-memory repository. No database needed.
pub fn build_test_server() -> Result<TestServer> {
    let config = Config {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: "postgres://unused".into(),
        password_pepper: "test-pepper".into(),
        session_ttl: Duration::hours(1),
        cors_allowed_origins: vec![],
    };

    let accounts = Arc::new(AccountService::new(
        Arc::new(InMemoryProfileRepository::new()),
        PasswordHasher::new(&config.password_pepper),
    ));
    let sessions = Arc::new(SessionStore::new(config.session_ttl));

    let state = AppState {
        accounts,
        sessions,
        config: Arc::new(config),
    };

    TestServer::new(create_api_router(state)).map_err(|err| anyhow::anyhow!(err.to_string()))
}

pub fn bearer(handle: &str) -> String {
    format!("Bearer {handle}")
}
