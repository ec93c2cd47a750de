//! Rating model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user's score for an attended event; one per (user, event), overwritten
/// on repeat calls.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rating {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
    pub score: i16,
    pub rated_at: DateTime<Utc>,
}

/// Inclusive score bounds accepted from callers.
pub const MIN_SCORE: i16 = 1;
pub const MAX_SCORE: i16 = 5;

pub fn score_in_bounds(score: i16) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn score_bounds_are_one_to_five_inclusive(score in i16::MIN..i16::MAX) {
            prop_assert_eq!(score_in_bounds(score), (1..=5).contains(&score));
        }
    }
}
