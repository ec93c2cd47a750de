//! Test data factories

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

use evently::models::event::EventStatus;

pub async fn create_user(pool: &PgPool, id: i64, username: &str) -> i64 {
    sqlx::query("INSERT INTO users (id, username) VALUES ($1, $2)")
        .bind(id)
        .bind(username)
        .execute(pool)
        .await
        .expect("failed to create test user");
    id
}

pub async fn create_event(
    pool: &PgPool,
    organizer_id: i64,
    title: &str,
    start_time: DateTime<Utc>,
    seats: i32,
    status: EventStatus,
) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO events (title, description, start_time, location, seats, status, organizer_id)
        VALUES ($1, 'Test description', $2, 'Moscow', $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(title)
    .bind(start_time)
    .bind(seats)
    .bind(status)
    .bind(organizer_id)
    .fetch_one(pool)
    .await
    .expect("failed to create test event");
    id
}

/// Convenience: an upcoming event starting tomorrow.
pub async fn create_upcoming_event(
    pool: &PgPool,
    organizer_id: i64,
    title: &str,
    seats: i32,
) -> i64 {
    create_event(
        pool,
        organizer_id,
        title,
        Utc::now() + Duration::days(1),
        seats,
        EventStatus::Upcoming,
    )
    .await
}

/// Backdate an event's creation timestamp, for grace-window tests.
pub async fn set_event_created_at(pool: &PgPool, event_id: i64, created_at: DateTime<Utc>) {
    sqlx::query("UPDATE events SET created_at = $2 WHERE id = $1")
        .bind(event_id)
        .bind(created_at)
        .execute(pool)
        .await
        .expect("failed to backdate event");
}
