//! Event repository implementation
//!
//! Holds all event queries, including the filtered listing with its derived
//! seat/rating aggregates and the time-driven status transition used by the
//! background sweep.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::event::{
    CreateEventRequest, Event, EventQuery, EventStatus, EventWithStats, Tag, UpdateEventRequest,
};
use crate::utils::errors::EventlyError;
use crate::utils::helpers::escape_like;

const EVENT_COLUMNS: &str =
    "id, title, description, start_time, location, seats, status, organizer_id, created_at";

/// Shared SELECT head for queries returning `EventWithStats`. Free seats and
/// average rating are scalar subqueries so join multiplicity can never skew
/// the aggregates.
const STATS_SELECT: &str = "SELECT e.id, e.title, e.description, e.start_time, e.location, \
     e.seats, e.status, e.created_at, \
     u.id AS organizer_id, u.username AS organizer_username, \
     (e.seats - (SELECT COUNT(*) FROM bookings b WHERE b.event_id = e.id))::int8 AS free_seats, \
     COALESCE((SELECT AVG(r.score)::float8 FROM ratings r WHERE r.event_id = e.id), 0.0) AS avg_rating \
     FROM events e JOIN users u ON u.id = e.organizer_id";

/// Default ordering: upcoming events first ascending by start time, then
/// past/cancelled descending, ties broken by descending average rating.
const DEFAULT_ORDER: &str = " ORDER BY CASE WHEN e.status = 'upcoming' THEN 0 ELSE 1 END, \
     CASE WHEN e.status = 'upcoming' THEN e.start_time END ASC, \
     CASE WHEN e.status <> 'upcoming' THEN e.start_time END DESC, \
     avg_rating DESC";

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event owned by `organizer_id`, with its tag set.
    pub async fn create(
        &self,
        organizer_id: i64,
        request: CreateEventRequest,
    ) -> Result<Event, EventlyError> {
        let mut tx = self.pool.begin().await?;

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, start_time, location, seats, status, organizer_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, start_time, location, seats, status, organizer_id, created_at
            "#,
        )
        .bind(request.title)
        .bind(request.description)
        .bind(request.start_time)
        .bind(request.location)
        .bind(request.seats.unwrap_or(100))
        .bind(request.status.unwrap_or(EventStatus::Upcoming))
        .bind(organizer_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(tag_ids) = request.tags {
            Self::replace_tags(&mut tx, event.id, &tag_ids).await?;
        }

        tx.commit().await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, EventlyError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID with derived free-seat and rating aggregates
    pub async fn find_with_stats(&self, id: i64) -> Result<Option<EventWithStats>, EventlyError> {
        let event = sqlx::query_as::<_, EventWithStats>(&format!(
            "{STATS_SELECT} WHERE e.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Partially update an event
    pub async fn update(
        &self,
        id: i64,
        request: UpdateEventRequest,
    ) -> Result<Event, EventlyError> {
        let mut tx = self.pool.begin().await?;

        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                start_time = COALESCE($4, start_time),
                location = COALESCE($5, location),
                seats = COALESCE($6, seats),
                status = COALESCE($7, status)
            WHERE id = $1
            RETURNING id, title, description, start_time, location, seats, status, organizer_id, created_at
            "#,
        )
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.start_time)
        .bind(request.location)
        .bind(request.seats)
        .bind(request.status)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(EventlyError::EventNotFound { event_id: id })?;

        if let Some(tag_ids) = request.tags {
            sqlx::query("DELETE FROM event_tags WHERE event_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::replace_tags(&mut tx, id, &tag_ids).await?;
        }

        tx.commit().await?;

        Ok(event)
    }

    /// Delete an event; bookings and ratings cascade, notifications keep
    /// their rows with a null event reference.
    pub async fn delete(&self, id: i64) -> Result<(), EventlyError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(EventlyError::EventNotFound { event_id: id });
        }

        Ok(())
    }

    /// List events matching the given filters, in the default ordering.
    pub async fn list(&self, query: &EventQuery) -> Result<Vec<EventWithStats>, EventlyError> {
        let status = match query.status.as_deref() {
            Some(raw) => Some(
                raw.parse::<EventStatus>()
                    .map_err(EventlyError::InvalidInput)?,
            ),
            None => None,
        };

        let mut qb = QueryBuilder::<Postgres>::new(STATS_SELECT);
        qb.push(" WHERE TRUE");

        if let Some(location) = &query.location {
            qb.push(" AND lower(e.location) = lower(");
            qb.push_bind(location.clone());
            qb.push(")");
        }
        if let Some(status) = status {
            qb.push(" AND e.status = ");
            qb.push_bind(status);
        }
        if let Some(date) = query.start_time {
            qb.push(" AND e.start_time::date = ");
            qb.push_bind(date);
        }
        if let Some(tag) = &query.tag {
            qb.push(
                " AND EXISTS (SELECT 1 FROM event_tags et JOIN tags t ON t.id = et.tag_id \
                 WHERE et.event_id = e.id AND t.name ILIKE ",
            );
            qb.push_bind(format!("%{}%", escape_like(tag)));
            qb.push(")");
        }
        if query.free_seats == Some(true) {
            qb.push(" AND e.seats > (SELECT COUNT(*) FROM bookings b WHERE b.event_id = e.id)");
        }
        if let Some(min) = query.avg_rating_gte {
            qb.push(
                " AND COALESCE((SELECT AVG(r.score)::float8 FROM ratings r \
                 WHERE r.event_id = e.id), 0.0) >= ",
            );
            qb.push_bind(min);
        }
        if let Some(max) = query.avg_rating_lte {
            qb.push(
                " AND COALESCE((SELECT AVG(r.score)::float8 FROM ratings r \
                 WHERE r.event_id = e.id), 0.0) <= ",
            );
            qb.push_bind(max);
        }
        if let Some(term) = &query.search {
            let pattern = format!("%{}%", escape_like(term));
            qb.push(" AND (e.title ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR e.description ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(
                " OR EXISTS (SELECT 1 FROM event_tags et JOIN tags t ON t.id = et.tag_id \
                 WHERE et.event_id = e.id AND t.name ILIKE ",
            );
            qb.push_bind(pattern);
            qb.push("))");
        }

        qb.push(DEFAULT_ORDER);

        let events = qb
            .build_query_as::<EventWithStats>()
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    /// Upcoming events the user holds a booking for, not yet started.
    pub async fn upcoming_for_user(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<EventWithStats>, EventlyError> {
        let events = sqlx::query_as::<_, EventWithStats>(&format!(
            "{STATS_SELECT} \
             WHERE e.status = 'upcoming' AND e.start_time >= $2 \
               AND EXISTS (SELECT 1 FROM bookings b WHERE b.event_id = e.id AND b.user_id = $1) \
             ORDER BY e.start_time ASC"
        ))
        .bind(user_id)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Tags for a batch of events, keyed by event id.
    pub async fn tags_for_events(
        &self,
        event_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Tag>>, EventlyError> {
        if event_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, (i64, i64, String)>(
            r#"
            SELECT et.event_id, t.id, t.name
            FROM event_tags et
            JOIN tags t ON t.id = et.tag_id
            WHERE et.event_id = ANY($1)
            ORDER BY t.name ASC
            "#,
        )
        .bind(event_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_event: HashMap<i64, Vec<Tag>> = HashMap::new();
        for (event_id, id, name) in rows {
            by_event.entry(event_id).or_default().push(Tag { id, name });
        }

        Ok(by_event)
    }

    /// Flip stale upcoming events to finished. Idempotent: a second run over
    /// the same data matches no rows.
    pub async fn finish_stale(&self, threshold: DateTime<Utc>) -> Result<u64, EventlyError> {
        let result = sqlx::query(
            "UPDATE events SET status = 'finished' \
             WHERE status = 'upcoming' AND start_time <= $1",
        )
        .bind(threshold)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Upcoming events starting within the `(from, until]` window.
    pub async fn starting_between(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Event>, EventlyError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             WHERE status = 'upcoming' AND start_time > $1 AND start_time <= $2 \
             ORDER BY start_time ASC"
        ))
        .bind(from)
        .bind(until)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn replace_tags(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        event_id: i64,
        tag_ids: &[i64],
    ) -> Result<(), EventlyError> {
        for tag_id in tag_ids {
            sqlx::query(
                "INSERT INTO event_tags (event_id, tag_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(event_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}
