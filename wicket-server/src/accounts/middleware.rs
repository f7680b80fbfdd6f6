use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::Response,
};
use wicket_core::account::Role;

use crate::infra::app_state::AppState;

/// Identity resolved from the session handle, injected as an extension.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    pub handle: String,
    pub identifier: String,
    pub role: Role,
}

/// Require a session handle that resolves to a bound identity.
///
/// The member slot is consulted first, then the admin slot. Requests with
/// no handle, an unknown handle, or an expired one are rejected uniformly.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let handle =
        bearer_handle(request.headers()).ok_or(StatusCode::UNAUTHORIZED)?;
    let identity = resolve_identity(&state, &handle)
        .await
        .ok_or(StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Extract the opaque session handle from the `Authorization` header.
pub fn bearer_handle(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())?;

    auth_header
        .strip_prefix("Bearer ")
        .map(|handle| handle.to_string())
}

async fn resolve_identity(state: &AppState, handle: &str) -> Option<SessionIdentity> {
    for role in [Role::Member, Role::Admin] {
        if let Some(identifier) = state.sessions.lookup(handle, role).await {
            return Some(SessionIdentity {
                handle: handle.to_string(),
                identifier,
                role,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_handle_strips_the_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc-123"),
        );
        assert_eq!(bearer_handle(&headers).as_deref(), Some("abc-123"));
    }

    #[test]
    fn bearer_handle_rejects_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert!(bearer_handle(&headers).is_none());
        assert!(bearer_handle(&HeaderMap::new()).is_none());
    }
}
