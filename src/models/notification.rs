//! Notification model
//!
//! Notifications are system-generated side effects of bookings,
//! cancellations and reminders; an append-only log. The event reference is
//! nullable so records survive event deletion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "notification_kind", rename_all = "lowercase")]
pub enum NotificationKind {
    Booking,
    Cancel,
    Reminder,
}

impl NotificationKind {
    /// Human-readable label, computed at read time.
    pub fn display_name(&self) -> &'static str {
        match self {
            NotificationKind::Booking => "Booked",
            NotificationKind::Cancel => "Booking cancelled",
            NotificationKind::Reminder => "Reminder",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub event_id: Option<i64>,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
