//! Event repository implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::event::{CreateEventRequest, Event, EventWithStats, UpdateEventRequest};
use crate::utils::errors::GatherlyError;

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(
        &self,
        organizer_id: Uuid,
        request: CreateEventRequest,
    ) -> Result<Event, GatherlyError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, location, start_time, end_time, image_url, capacity, organizer_id, categories, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, title, description, location, start_time, end_time, image_url, capacity, organizer_id, categories, created_at, updated_at
            "#,
        )
        .bind(request.title)
        .bind(request.description)
        .bind(request.location)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(request.image_url)
        .bind(request.capacity)
        .bind(organizer_id)
        .bind(request.categories)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, GatherlyError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, location, start_time, end_time, image_url, capacity, organizer_id, categories, created_at, updated_at FROM events WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID together with its attending headcount
    pub async fn find_with_stats(&self, id: Uuid) -> Result<Option<EventWithStats>, GatherlyError> {
        let event = sqlx::query_as::<_, EventWithStats>(
            r#"
            SELECT e.id, e.title, e.description, e.location, e.start_time, e.end_time, e.image_url, e.capacity, e.organizer_id, e.categories, e.created_at, e.updated_at,
                   (SELECT COUNT(*) FROM event_attendees a WHERE a.event_id = e.id AND a.status = 'attending') AS attendees_count
            FROM events e
            WHERE e.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Update event
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateEventRequest,
    ) -> Result<Event, GatherlyError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                start_time = COALESCE($5, start_time),
                end_time = COALESCE($6, end_time),
                image_url = COALESCE($7, image_url),
                capacity = COALESCE($8, capacity),
                categories = COALESCE($9, categories),
                updated_at = $10
            WHERE id = $1
            RETURNING id, title, description, location, start_time, end_time, image_url, capacity, organizer_id, categories, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.location)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(request.image_url)
        .bind(request.capacity)
        .bind(request.categories)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Delete event
    pub async fn delete(&self, id: Uuid) -> Result<(), GatherlyError> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Events that have not ended yet, soonest first, with headcounts
    pub async fn list_upcoming(
        &self,
        now: DateTime<Utc>,
        limit: Option<i64>,
    ) -> Result<Vec<EventWithStats>, GatherlyError> {
        let events = sqlx::query_as::<_, EventWithStats>(
            r#"
            SELECT e.id, e.title, e.description, e.location, e.start_time, e.end_time, e.image_url, e.capacity, e.organizer_id, e.categories, e.created_at, e.updated_at,
                   (SELECT COUNT(*) FROM event_attendees a WHERE a.event_id = e.id AND a.status = 'attending') AS attendees_count
            FROM events e
            WHERE e.end_time >= $1
            ORDER BY e.start_time ASC
            LIMIT $2
            "#,
        )
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// All events owned by an organizer, with headcounts
    pub async fn list_by_organizer(
        &self,
        organizer_id: Uuid,
    ) -> Result<Vec<EventWithStats>, GatherlyError> {
        let events = sqlx::query_as::<_, EventWithStats>(
            r#"
            SELECT e.id, e.title, e.description, e.location, e.start_time, e.end_time, e.image_url, e.capacity, e.organizer_id, e.categories, e.created_at, e.updated_at,
                   (SELECT COUNT(*) FROM event_attendees a WHERE a.event_id = e.id AND a.status = 'attending') AS attendees_count
            FROM events e
            WHERE e.organizer_id = $1
            "#,
        )
        .bind(organizer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Events from the given set, excluding ones the user organizes.
    ///
    /// Used for the attending half of the schedule so an event never shows up
    /// in both lists.
    pub async fn list_by_ids_excluding_organizer(
        &self,
        ids: &[Uuid],
        organizer_id: Uuid,
    ) -> Result<Vec<EventWithStats>, GatherlyError> {
        let events = sqlx::query_as::<_, EventWithStats>(
            r#"
            SELECT e.id, e.title, e.description, e.location, e.start_time, e.end_time, e.image_url, e.capacity, e.organizer_id, e.categories, e.created_at, e.updated_at,
                   (SELECT COUNT(*) FROM event_attendees a WHERE a.event_id = e.id AND a.status = 'attending') AS attendees_count
            FROM events e
            WHERE e.id = ANY($1) AND e.organizer_id <> $2
            "#,
        )
        .bind(ids)
        .bind(organizer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Search future events by free text and/or a category pattern.
    ///
    /// The text pattern matches title, description and location
    /// case-insensitively; the category pattern is matched against the
    /// description only (see the search service for why).
    pub async fn search(
        &self,
        now: DateTime<Utc>,
        text_pattern: Option<String>,
        category_pattern: Option<String>,
        limit: i64,
    ) -> Result<Vec<EventWithStats>, GatherlyError> {
        let events = sqlx::query_as::<_, EventWithStats>(
            r#"
            SELECT e.id, e.title, e.description, e.location, e.start_time, e.end_time, e.image_url, e.capacity, e.organizer_id, e.categories, e.created_at, e.updated_at,
                   (SELECT COUNT(*) FROM event_attendees a WHERE a.event_id = e.id AND a.status = 'attending') AS attendees_count
            FROM events e
            WHERE e.end_time >= $1
              AND ($2::text IS NULL OR e.title ILIKE $2 OR e.description ILIKE $2 OR e.location ILIKE $2)
              AND ($3::text IS NULL OR e.description ILIKE $3)
            ORDER BY e.start_time ASC
            LIMIT $4
            "#,
        )
        .bind(now)
        .bind(text_pattern)
        .bind(category_pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Count total events
    pub async fn count(&self) -> Result<i64, GatherlyError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
