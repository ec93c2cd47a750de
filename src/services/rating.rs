//! Rating service implementation
//!
//! Ratings open once the event's start time has passed and are limited to
//! users who held a booking. Scores are 1 to 5 inclusive; repeat calls
//! overwrite the previous score.

use chrono::Utc;
use tracing::info;

use crate::database::DatabaseService;
use crate::models::rating::{score_in_bounds, Rating};
use crate::utils::errors::{EventlyError, Result};

#[derive(Clone)]
pub struct RatingService {
    db: DatabaseService,
}

impl RatingService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    pub async fn rate(
        &self,
        user_id: i64,
        event_id: i64,
        score: Option<i16>,
    ) -> Result<Rating> {
        let event = self
            .db
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(EventlyError::EventNotFound { event_id })?;

        if !event.has_started(Utc::now()) {
            return Err(EventlyError::RatingNotOpen);
        }

        if !self.db.bookings.exists(user_id, event_id).await? {
            return Err(EventlyError::RatingWithoutBooking);
        }

        let score = score.filter(|s| score_in_bounds(*s)).ok_or(EventlyError::InvalidScore)?;

        let rating = self.db.ratings.upsert(user_id, event_id, score).await?;

        info!(user_id, event_id, score, "Event rated");
        Ok(rating)
    }
}
