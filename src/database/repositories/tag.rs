//! Tag repository implementation

use sqlx::PgPool;

use crate::models::event::Tag;
use crate::utils::errors::EventlyError;

#[derive(Debug, Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new tag
    pub async fn create(&self, name: &str) -> Result<Tag, EventlyError> {
        let tag = sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => EventlyError::DuplicateTag,
            _ => EventlyError::Database(err),
        })?;

        Ok(tag)
    }

    /// List all tags
    pub async fn list(&self) -> Result<Vec<Tag>, EventlyError> {
        let tags = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(tags)
    }
}
