//! Rating repository implementation

use sqlx::PgPool;

use crate::models::rating::Rating;
use crate::utils::errors::EventlyError;

#[derive(Debug, Clone)]
pub struct RatingRepository {
    pool: PgPool,
}

impl RatingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or overwrite the user's score for an event. Repeat calls
    /// update the existing row; there is never more than one per
    /// (user, event).
    pub async fn upsert(
        &self,
        user_id: i64,
        event_id: i64,
        score: i16,
    ) -> Result<Rating, EventlyError> {
        let rating = sqlx::query_as::<_, Rating>(
            r#"
            INSERT INTO ratings (user_id, event_id, score)
            VALUES ($1, $2, $3)
            ON CONFLICT ON CONSTRAINT ratings_user_event_key
            DO UPDATE SET score = EXCLUDED.score, rated_at = now()
            RETURNING id, user_id, event_id, score, rated_at
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .bind(score)
        .fetch_one(&self.pool)
        .await?;

        Ok(rating)
    }

    /// Find a user's rating for an event
    pub async fn find_by_user_and_event(
        &self,
        user_id: i64,
        event_id: i64,
    ) -> Result<Option<Rating>, EventlyError> {
        let rating = sqlx::query_as::<_, Rating>(
            "SELECT id, user_id, event_id, score, rated_at FROM ratings \
             WHERE user_id = $1 AND event_id = $2",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rating)
    }
}
