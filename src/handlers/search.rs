//! Search handlers

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;

use crate::handlers::AppState;
use crate::models::event::EventWithStats;
use crate::services::search::SearchRequest;
use crate::utils::errors::Result;

/// GET /search?query=&category= — search future events
pub async fn search_events(
    State(state): State<AppState>,
    Query(request): Query<SearchRequest>,
) -> Result<Json<Vec<EventWithStats>>> {
    let results = state
        .services
        .search_service
        .search(request, Utc::now())
        .await?;
    Ok(Json(results))
}
