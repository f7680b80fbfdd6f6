use axum::{
    Router,
    http::{HeaderValue, StatusCode},
    middleware,
    routing::{delete, get, patch, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::accounts::{handlers, middleware::session_middleware};
use crate::infra::{app_state::AppState, config::Config};

/// Assemble the full API router.
pub fn create_api_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/users/my-info", get(handlers::my_info))
        .route("/users/password", patch(handlers::change_password))
        .route("/users", delete(handlers::delete_account))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        // Public account endpoints
        .route("/users/sign-up", post(handlers::sign_up))
        .route("/users/sign-in", post(handlers::sign_in))
        .route("/users/logout", put(handlers::logout))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}

async fn root_handler() -> &'static str {
    "wicket account service"
}

async fn health_handler() -> StatusCode {
    StatusCode::OK
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
