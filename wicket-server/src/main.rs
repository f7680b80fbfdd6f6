//! # Wicket Server
//!
//! Session-based user-account backend.
//!
//! ## Overview
//!
//! Wicket exposes a small account API over HTTP:
//!
//! - **Sign-up / sign-in / sign-out** with opaque bearer session handles
//! - **Profile lookup** for the signed-in identity
//! - **Password change and account deletion**, both re-verifying the
//!   current password first
//!
//! ## Architecture
//!
//! The server is built on Axum and uses:
//! - PostgreSQL for profile storage
//! - An in-memory session store with member/admin role-class slots
//! - Peppered SHA-256 digests for credential storage

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wicket_core::{
    account::AccountService, crypto::PasswordHasher, repository::PostgresProfileRepository,
};

use wicket_server::{
    infra::{
        app_state::AppState,
        config::{Config, ServeArgs},
    },
    routes::create_api_router,
    sessions::SessionStore,
};

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file_loaded = dotenvy::dotenv().is_ok();
    let config = Config::from(ServeArgs::parse());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if env_file_loaded {
        info!("loaded .env file");
    }

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    wicket_core::MIGRATOR
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    let accounts = Arc::new(AccountService::new(
        Arc::new(PostgresProfileRepository::new(pool)),
        PasswordHasher::new(&config.password_pepper),
    ));
    let sessions = Arc::new(SessionStore::new(config.session_ttl));

    // Periodic sweep so abandoned handles do not accumulate.
    let sweep_sessions = Arc::clone(&sessions);
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(SESSION_SWEEP_INTERVAL).await;
            sweep_sessions.purge_expired().await;
        }
    });

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("invalid server host/port")?;

    let state = AppState {
        accounts,
        sessions,
        config: Arc::new(config),
    };
    let app = create_api_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
