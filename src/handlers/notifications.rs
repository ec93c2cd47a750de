//! Notification endpoints
//!
//! Read-only: notifications are system-generated and append-only, so the
//! API only exposes the acting user's own log.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::middleware::AuthUser;
use crate::models::notification::{Notification, NotificationKind};
use crate::utils::errors::Result;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: i64,
    pub user_id: i64,
    pub event_id: Option<i64>,
    pub kind: NotificationKind,
    pub kind_display: &'static str,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            user_id: n.user_id,
            event_id: n.event_id,
            kind: n.kind,
            kind_display: n.kind.display_name(),
            message: n.message,
            created_at: n.created_at,
        }
    }
}

pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<NotificationResponse>>> {
    let notifications = state.services.notifications.list_for_user(user.id).await?;

    Ok(Json(
        notifications.into_iter().map(NotificationResponse::from).collect(),
    ))
}
