use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use wicket_core::account::{
    ChangePasswordRequest, DeleteAccountRequest, ProfileResponse, SignInRequest, SignInResponse,
    SignUpRequest,
};

use crate::accounts::middleware::{SessionIdentity, bearer_handle};
use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// `POST /users/sign-up`
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> AppResult<StatusCode> {
    request.validate()?;
    state.accounts.register(request).await?;
    Ok(StatusCode::CREATED)
}

/// `POST /users/sign-in`
///
/// On a credential match the identity is bound to a freshly issued handle
/// under the role-class slot matching the profile's role. A miss is a
/// uniform 401 regardless of whether the identifier exists.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> AppResult<Json<SignInResponse>> {
    let profile = state
        .accounts
        .authenticate(&request.identifier, request.password.expose())
        .await?
        .ok_or_else(|| AppError::unauthorized("invalid credentials"))?;

    let handle = state.sessions.issue_handle();
    state
        .sessions
        .bind(&handle, &profile.identifier, profile.role)
        .await;

    Ok(Json(SignInResponse {
        session_handle: handle,
        profile: ProfileResponse::from(profile),
    }))
}

/// `GET /users/my-info`
pub async fn my_info(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
) -> AppResult<Json<ProfileResponse>> {
    let profile = state
        .accounts
        .get_profile(&identity.identifier)
        .await?
        .ok_or_else(|| AppError::not_found("profile not found"))?;

    Ok(Json(ProfileResponse::from(profile)))
}

/// `PUT /users/logout`
///
/// Clears every role-class binding for the presented handle. Callable
/// without a resolvable identity; clearing an unknown handle is a no-op.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> StatusCode {
    if let Some(handle) = bearer_handle(&headers) {
        state.sessions.clear(&handle).await;
    }
    StatusCode::NO_CONTENT
}

/// `PATCH /users/password`
pub async fn change_password(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Json(request): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    request.validate()?;
    state
        .accounts
        .change_password(
            &identity.identifier,
            request.current_password.expose(),
            request.new_password.expose(),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /users`
///
/// Removes the account after re-verifying the password, then drops the
/// session so the handle stops resolving immediately.
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Json(request): Json<DeleteAccountRequest>,
) -> AppResult<StatusCode> {
    state
        .accounts
        .delete_account(&identity.identifier, request.password.expose())
        .await?;

    state.sessions.clear(&identity.handle).await;
    Ok(StatusCode::NO_CONTENT)
}
