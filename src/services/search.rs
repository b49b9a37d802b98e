//! Event search service
//!
//! Free-text and category search over events that have not ended yet,
//! soonest first, capped at a fixed number of results.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::database::repositories::EventRepository;
use crate::models::event::{EventCategory, EventWithStats};
use crate::utils::errors::Result;

/// Maximum number of search results returned
pub const SEARCH_RESULT_LIMIT: i64 = 20;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub category: Option<EventCategory>,
}

/// Event search service
#[derive(Clone)]
pub struct SearchService {
    events: EventRepository,
}

impl SearchService {
    /// Create a new SearchService instance
    pub fn new(events: EventRepository) -> Self {
        Self { events }
    }

    /// Search future events.
    ///
    /// The free-text query matches title, description and location as a
    /// case-insensitive substring. The category filter matches "#<category>"
    /// inside the description text rather than the structured categories
    /// column — kept to match the shipped client behavior, where category
    /// browsing relied on organizers tagging their descriptions.
    pub async fn search(
        &self,
        request: SearchRequest,
        now: DateTime<Utc>,
    ) -> Result<Vec<EventWithStats>> {
        let text = text_pattern(request.query.as_deref());
        let category = category_pattern(request.category);

        debug!(text = ?text, category = ?category, "Searching events");

        self.events
            .search(now, text, category, SEARCH_RESULT_LIMIT)
            .await
    }
}

/// ILIKE pattern for the free-text query; empty queries match everything
fn text_pattern(query: Option<&str>) -> Option<String> {
    query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(|q| format!("%{}%", q))
}

/// ILIKE pattern for the category hashtag
fn category_pattern(category: Option<EventCategory>) -> Option<String> {
    category.map(|c| format!("%#{}%", c.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_pattern_wraps_query() {
        assert_eq!(text_pattern(Some("music")), Some("%music%".to_string()));
        assert_eq!(text_pattern(Some("  music  ")), Some("%music%".to_string()));
    }

    #[test]
    fn test_blank_query_matches_everything() {
        assert_eq!(text_pattern(None), None);
        assert_eq!(text_pattern(Some("")), None);
        assert_eq!(text_pattern(Some("   ")), None);
    }

    #[test]
    fn test_category_pattern_is_a_hashtag() {
        assert_eq!(
            category_pattern(Some(EventCategory::Music)),
            Some("%#music%".to_string())
        );
        assert_eq!(category_pattern(None), None);
    }
}
