//! Authentication handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::handlers::AppState;
use crate::middleware::CurrentUser;
use crate::services::auth::{
    AuthSession, ChangePasswordRequest, ResetPasswordRequest, ResetRequest, SignInRequest,
    SignUpRequest,
};
use crate::utils::errors::Result;

/// POST /auth/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<Json<AuthSession>> {
    let session = state.services.auth_service.sign_up(request).await?;
    Ok(Json(session))
}

/// POST /auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<AuthSession>> {
    let session = state.services.auth_service.sign_in(request).await?;
    Ok(Json(session))
}

/// POST /auth/sign-out
pub async fn sign_out(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
) -> Result<StatusCode> {
    state.services.auth_service.sign_out(&context).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /auth/password/change
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<StatusCode> {
    state
        .services
        .auth_service
        .change_password(context.user_id, request)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /auth/password/reset-request
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(request): Json<ResetRequest>,
) -> Result<StatusCode> {
    state
        .services
        .auth_service
        .request_password_reset(request)
        .await?;
    Ok(StatusCode::ACCEPTED)
}

/// POST /auth/password/reset
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<StatusCode> {
    state.services.auth_service.reset_password(request).await?;
    Ok(StatusCode::NO_CONTENT)
}
