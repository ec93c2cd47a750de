//! Notification repository implementation
//!
//! The notifications table is an append-only log; rows are only ever
//! inserted by the job worker and read back per user.

use sqlx::PgPool;

use crate::models::notification::{Notification, NotificationKind};
use crate::utils::errors::EventlyError;

#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist one notification record
    pub async fn create(
        &self,
        user_id: i64,
        event_id: Option<i64>,
        kind: NotificationKind,
        message: &str,
    ) -> Result<Notification, EventlyError> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, event_id, kind, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, event_id, kind, message, created_at
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .bind(kind)
        .bind(message)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    /// A user's notifications, newest first
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Notification>, EventlyError> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT id, user_id, event_id, kind, message, created_at FROM notifications \
             WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }
}
