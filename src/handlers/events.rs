//! Event, attendance and comment handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::handlers::AppState;
use crate::middleware::CurrentUser;
use crate::models::attendance::{Attendance, AttendanceStatus};
use crate::models::comment::{CommentView, EventComment};
use crate::models::event::{
    CreateEventRequest, Event, EventDetail, EventWithStats, UpdateEventRequest,
};
use crate::services::schedule::UserSchedule;
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SetAttendanceBody {
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Deserialize)]
pub struct AddCommentBody {
    pub content: String,
}

/// GET /events — discovery feed of events that have not ended yet
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Vec<EventWithStats>>> {
    let events = state
        .services
        .schedule_service
        .discovery_feed(Utc::now(), query.limit)
        .await?;
    Ok(Json(events))
}

/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>)> {
    let event = state
        .services
        .event_service
        .create_event(context.user_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /events/:id
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<EventDetail>> {
    let detail = state.services.event_service.get_event(event_id).await?;
    Ok(Json(detail))
}

/// PATCH /events/:id
pub async fn update_event(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
    Path(event_id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<Event>> {
    let event = state
        .services
        .event_service
        .update_event(context.user_id, event_id, request)
        .await?;
    Ok(Json(event))
}

/// DELETE /events/:id
pub async fn delete_event(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
    Path(event_id): Path<Uuid>,
) -> Result<StatusCode> {
    state
        .services
        .event_service
        .delete_event(context.user_id, event_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /events/:id/attendance — set or clear the caller's RSVP
pub async fn set_attendance(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
    Path(event_id): Path<Uuid>,
    Json(body): Json<SetAttendanceBody>,
) -> Result<Json<Option<Attendance>>> {
    let attendance = state
        .services
        .event_service
        .set_attendance(context.user_id, event_id, body.status)
        .await?;
    Ok(Json(attendance))
}

/// DELETE /events/:id/attendance
pub async fn clear_attendance(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
    Path(event_id): Path<Uuid>,
) -> Result<StatusCode> {
    state
        .services
        .event_service
        .set_attendance(context.user_id, event_id, None)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /events/:id/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Vec<CommentView>>> {
    let comments = state.services.event_service.list_comments(event_id).await?;
    Ok(Json(comments))
}

/// POST /events/:id/comments
pub async fn add_comment(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
    Path(event_id): Path<Uuid>,
    Json(body): Json<AddCommentBody>,
) -> Result<(StatusCode, Json<EventComment>)> {
    let comment = state
        .services
        .event_service
        .add_comment(context.user_id, event_id, &body.content)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /comments/:id
pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
    Path(comment_id): Path<Uuid>,
) -> Result<StatusCode> {
    state
        .services
        .event_service
        .delete_comment(context.user_id, comment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /calendar — the caller's four-section schedule
pub async fn user_schedule(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
) -> Result<Json<UserSchedule>> {
    let schedule = state
        .services
        .schedule_service
        .user_schedule(context.user_id, Utc::now())
        .await?;
    Ok(Json(schedule))
}
