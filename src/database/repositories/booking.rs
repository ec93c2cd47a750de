//! Booking repository implementation
//!
//! `reserve` and `cancel` run their whole check-then-act sequence inside a
//! single transaction with the event row locked via `SELECT ... FOR UPDATE`,
//! so concurrent attempts against the same event serialize and observe a
//! consistent seat count. Two simultaneous reservations of the last seat
//! cannot both succeed.

use sqlx::PgPool;

use crate::models::booking::Booking;
use crate::models::event::{Event, EventStatus};
use crate::utils::errors::EventlyError;

#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reserve a seat on an event for a user.
    ///
    /// Fails when the event is missing, not upcoming, full, or already
    /// booked by this user. On success the booking row is committed before
    /// this returns, along with the event snapshot validated under the
    /// lock; notification submission is the caller's concern and never
    /// happens under the lock.
    pub async fn reserve(
        &self,
        user_id: i64,
        event_id: i64,
    ) -> Result<(Booking, Event), EventlyError> {
        let mut tx = self.pool.begin().await?;

        let event = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, start_time, location, seats, status, organizer_id, created_at \
             FROM events WHERE id = $1 FOR UPDATE",
        )
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(EventlyError::EventNotFound { event_id })?;

        if event.status != EventStatus::Upcoming {
            return Err(EventlyError::EventNotBookable {
                status: event.status,
            });
        }

        let (booked,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(&mut *tx)
                .await?;

        if event.free_seats(booked) <= 0 {
            return Err(EventlyError::SeatsExhausted { event_id });
        }

        let existing: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM bookings WHERE user_id = $1 AND event_id = $2")
                .bind(user_id)
                .bind(event_id)
                .fetch_optional(&mut *tx)
                .await?;

        if existing.is_some() {
            return Err(EventlyError::AlreadyBooked);
        }

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (user_id, event_id)
            VALUES ($1, $2)
            RETURNING id, user_id, event_id, booked_at
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(Self::map_unique_violation)?;

        tx.commit().await?;

        Ok((booking, event))
    }

    /// Cancel a user's booking on an event.
    ///
    /// Takes the same event row lock as `reserve` so seat-count reads stay
    /// consistent with concurrent reservations.
    pub async fn cancel(&self, user_id: i64, event_id: i64) -> Result<Event, EventlyError> {
        let mut tx = self.pool.begin().await?;

        let event = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, start_time, location, seats, status, organizer_id, created_at \
             FROM events WHERE id = $1 FOR UPDATE",
        )
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(EventlyError::EventNotFound { event_id })?;

        let result = sqlx::query("DELETE FROM bookings WHERE user_id = $1 AND event_id = $2")
            .bind(user_id)
            .bind(event_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(EventlyError::NotRegistered);
        }

        tx.commit().await?;

        Ok(event)
    }

    /// Check if a user holds a booking for an event
    pub async fn exists(&self, user_id: i64, event_id: i64) -> Result<bool, EventlyError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE user_id = $1 AND event_id = $2")
                .bind(user_id)
                .bind(event_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count > 0)
    }

    /// All active bookings on an event
    pub async fn for_event(&self, event_id: i64) -> Result<Vec<Booking>, EventlyError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT id, user_id, event_id, booked_at FROM bookings \
             WHERE event_id = $1 ORDER BY booked_at ASC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Active booking count for an event
    pub async fn count_for_event(&self, event_id: i64) -> Result<i64, EventlyError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    // The uniqueness constraint catches races that slip past the row lock.
    fn map_unique_violation(err: sqlx::Error) -> EventlyError {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => EventlyError::AlreadyBooked,
            _ => EventlyError::Database(err),
        }
    }
}
