//! Booking model
//!
//! A booking is one reserved seat; at most one per (user, event), enforced
//! by a database uniqueness constraint. Created on reservation, deleted on
//! cancellation, never updated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
    pub booked_at: DateTime<Utc>,
}
