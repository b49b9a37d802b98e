//! Notification handlers

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::handlers::AppState;
use crate::middleware::CurrentUser;
use crate::models::notification::NotificationView;
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
pub struct MarkReadBody {
    pub ids: Vec<Uuid>,
}

/// GET /notifications — the caller's recent notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
) -> Result<Json<Vec<NotificationView>>> {
    let feed = state
        .services
        .notification_service
        .list_feed(context.user_id)
        .await?;
    Ok(Json(feed))
}

/// GET /notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
) -> Result<Json<serde_json::Value>> {
    let count = state
        .services
        .notification_service
        .unread_count(context.user_id)
        .await?;
    Ok(Json(json!({ "unread": count })))
}

/// POST /notifications/read — mark specific notifications read
pub async fn mark_read(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
    Json(body): Json<MarkReadBody>,
) -> Result<Json<serde_json::Value>> {
    let updated = state
        .services
        .notification_service
        .mark_read(context.user_id, &body.ids)
        .await?;
    Ok(Json(json!({ "updated": updated })))
}

/// POST /notifications/read-all — mark all the caller's notifications read
pub async fn mark_all_read(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
) -> Result<Json<serde_json::Value>> {
    let updated = state
        .services
        .notification_service
        .mark_all_read(context.user_id)
        .await?;
    Ok(Json(json!({ "updated": updated })))
}
