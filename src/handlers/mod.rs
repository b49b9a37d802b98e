//! HTTP handlers
//!
//! This module assembles the axum router and holds the shared application
//! state handed to every handler.

pub mod auth;
pub mod events;
pub mod images;
pub mod notifications;
pub mod profiles;
pub mod search;

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{delete, get, patch, post, put};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::database::{self, DatabasePool};
use crate::middleware::track_requests;
use crate::services::ServiceFactory;

/// Shared state available to all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<ServiceFactory>,
    pub pool: DatabasePool,
}

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Auth flows
        .route("/auth/sign-up", post(auth::sign_up))
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/auth/sign-out", post(auth::sign_out))
        .route("/auth/password/change", post(auth::change_password))
        .route("/auth/password/reset-request", post(auth::request_password_reset))
        .route("/auth/password/reset", post(auth::reset_password))
        // Events, attendance and comments
        .route("/events", get(events::list_events).post(events::create_event))
        .route(
            "/events/:id",
            get(events::get_event)
                .patch(events::update_event)
                .delete(events::delete_event),
        )
        .route(
            "/events/:id/attendance",
            put(events::set_attendance).delete(events::clear_attendance),
        )
        .route(
            "/events/:id/comments",
            get(events::list_comments).post(events::add_comment),
        )
        .route("/comments/:id", delete(events::delete_comment))
        // Schedule and search
        .route("/calendar", get(events::user_schedule))
        .route("/search", get(search::search_events))
        // Profiles
        .route("/profiles/me", patch(profiles::update_profile).delete(profiles::delete_account))
        .route("/profiles/:id", get(profiles::get_profile))
        // Notifications
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/unread-count", get(notifications::unread_count))
        .route("/notifications/read", post(notifications::mark_read))
        .route("/notifications/read-all", post(notifications::mark_all_read))
        // Images
        .route("/images", post(images::upload_image).delete(images::delete_image))
        .layer(
            tower::ServiceBuilder::new()
                .layer(axum::middleware::from_fn(track_requests))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Liveness endpoint reporting database and Redis health
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database_healthy = database::health_check(&state.pool).await.is_ok();
    let services = state.services.health_check().await;

    Json(json!({
        "database": database_healthy,
        "redis": services.redis_healthy,
    }))
}
