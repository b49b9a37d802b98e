//! Profile handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

use crate::handlers::AppState;
use crate::middleware::CurrentUser;
use crate::models::profile::{Profile, UpdateProfileRequest};
use crate::services::profile::ProfileView;
use crate::utils::errors::Result;

/// GET /profiles/:id — public profile with upcoming organized/attended events
pub async fn get_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<ProfileView>> {
    let view = state
        .services
        .profile_service
        .get_profile_view(profile_id, Utc::now())
        .await?;
    Ok(Json(view))
}

/// PATCH /profiles/me
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>> {
    let profile = state
        .services
        .profile_service
        .update_profile(context.user_id, request)
        .await?;
    Ok(Json(profile))
}

/// DELETE /profiles/me — delete the caller's account
pub async fn delete_account(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
) -> Result<StatusCode> {
    state
        .services
        .profile_service
        .delete_account(context.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
