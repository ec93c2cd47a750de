//! Event model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle state of an event.
///
/// `Upcoming` may move to `Finished` (time-driven) or `Cancelled`
/// (organizer-driven); both of those are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "event_status", rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Cancelled,
    Finished,
}

impl EventStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, EventStatus::Cancelled | EventStatus::Finished)
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Finished => "finished",
        };
        write!(f, "{s}")
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upcoming" => Ok(EventStatus::Upcoming),
            "cancelled" => Ok(EventStatus::Cancelled),
            "finished" => Ok(EventStatus::Finished),
            other => Err(format!("unknown event status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub location: String,
    pub seats: i32,
    pub status: EventStatus,
    pub organizer_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Seats still available given the current number of active bookings.
    pub fn free_seats(&self, active_bookings: i64) -> i64 {
        i64::from(self.seats) - active_bookings
    }

    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now
    }

    /// Organizers may delete an event only within one hour of creating it.
    pub fn within_delete_window(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at <= Duration::hours(1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// Event row joined with its organizer and the derived per-event
/// aggregates; computed at read time, never stored.
#[derive(Debug, Clone, FromRow)]
pub struct EventWithStats {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub location: String,
    pub seats: i32,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
    pub organizer_id: i64,
    pub organizer_username: String,
    pub free_seats: i64,
    pub avg_rating: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub location: String,
    pub seats: Option<i32>,
    pub status: Option<EventStatus>,
    pub tags: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub seats: Option<i32>,
    pub status: Option<EventStatus>,
    pub tags: Option<Vec<i64>>,
}

/// Filters accepted by the event listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventQuery {
    pub location: Option<String>,
    pub status: Option<String>,
    pub start_time: Option<chrono::NaiveDate>,
    pub tag: Option<String>,
    pub free_seats: Option<bool>,
    pub avg_rating_gte: Option<f64>,
    pub avg_rating_lte: Option<f64>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(created_at: DateTime<Utc>, start_time: DateTime<Utc>) -> Event {
        Event {
            id: 1,
            title: "Test event".to_string(),
            description: "Test description".to_string(),
            start_time,
            location: "Moscow".to_string(),
            seats: 2,
            status: EventStatus::Upcoming,
            organizer_id: 1,
            created_at,
        }
    }

    #[test]
    fn test_free_seats_derivation() {
        let now = Utc::now();
        let e = event(now, now + Duration::days(1));
        assert_eq!(e.free_seats(0), 2);
        assert_eq!(e.free_seats(2), 0);
        assert_eq!(e.free_seats(3), -1);
    }

    #[test]
    fn test_delete_window_boundary() {
        let created = Utc::now();
        let e = event(created, created + Duration::days(1));
        assert!(e.within_delete_window(created + Duration::minutes(5)));
        assert!(!e.within_delete_window(created + Duration::hours(2)));
        // a day-old event is outside the window no matter the time of day
        assert!(!e.within_delete_window(created + Duration::days(1) + Duration::minutes(5)));
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            EventStatus::Upcoming,
            EventStatus::Cancelled,
            EventStatus::Finished,
        ] {
            assert_eq!(status.to_string().parse::<EventStatus>(), Ok(status));
        }
        assert!("someday".parse::<EventStatus>().is_err());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!EventStatus::Upcoming.is_terminal());
        assert!(EventStatus::Cancelled.is_terminal());
        assert!(EventStatus::Finished.is_terminal());
    }
}
