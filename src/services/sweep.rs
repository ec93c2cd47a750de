//! Periodic sweep logic
//!
//! Two time-driven jobs: flipping stale upcoming events to finished, and
//! fanning out reminder notifications for events starting within the next
//! hour. Both are invoked from the job queue, never from request handlers.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::database::DatabaseService;
use crate::models::notification::NotificationKind;
use crate::services::notification::NotificationService;
use crate::services::queue::JobQueue;
use crate::utils::errors::Result;

/// Upcoming events whose start time is more than this far in the past are
/// considered finished.
fn finish_threshold(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::hours(2)
}

/// Window `(now, now + 1h]`: events starting inside it get reminders.
fn reminder_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (now, now + Duration::hours(1))
}

#[derive(Clone)]
pub struct SweepService {
    db: DatabaseService,
    queue: JobQueue,
}

impl SweepService {
    pub fn new(db: DatabaseService, queue: JobQueue) -> Self {
        Self { db, queue }
    }

    /// Transition stale upcoming events to finished. Safe to run repeatedly
    /// and concurrently; an already-finished event is untouched.
    pub async fn update_event_statuses(&self) -> Result<()> {
        let updated = self.db.events.finish_stale(finish_threshold(Utc::now())).await?;
        if updated > 0 {
            info!(updated, "Marked stale events as finished");
        }
        Ok(())
    }

    /// Fan out one reminder per active booking on every upcoming event
    /// starting within the next hour.
    ///
    /// Runs do not deduplicate against earlier runs: an event that stays in
    /// the window across two sweeps produces reminders twice.
    pub async fn send_reminder_notifications(&self) -> Result<()> {
        let (from, until) = reminder_window(Utc::now());
        let events = self.db.events.starting_between(from, until).await?;

        for event in &events {
            let bookings = self.db.bookings.for_event(event.id).await?;
            info!(event_id = event.id, bookings = bookings.len(), "Queueing reminders");
            for booking in bookings {
                self.queue.notify(
                    booking.user_id,
                    Some(event.id),
                    NotificationKind::Reminder,
                    NotificationService::reminder_message(event),
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_threshold_is_two_hours_back() {
        let now = Utc::now();
        assert_eq!(now - finish_threshold(now), Duration::hours(2));
    }

    #[test]
    fn test_reminder_window_excludes_now_includes_hour_mark() {
        let now = Utc::now();
        let (from, until) = reminder_window(now);

        // starting_between uses (from, until]: an event starting exactly now
        // is already underway, one starting exactly in an hour still counts
        assert_eq!(from, now);
        assert_eq!(until, now + Duration::hours(1));
    }
}
