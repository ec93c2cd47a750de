//! Booking service implementation
//!
//! Seat reservation and cancellation. The repository runs the whole
//! check-then-act sequence under the event row lock; this layer submits the
//! resulting notification job only after the transaction has committed, so
//! the lock is never held across dispatch and a notification failure can
//! never fail a booking.

use tracing::info;

use crate::database::DatabaseService;
use crate::models::booking::Booking;
use crate::models::event::Event;
use crate::models::notification::NotificationKind;
use crate::services::notification::NotificationService;
use crate::services::queue::JobQueue;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct BookingService {
    db: DatabaseService,
    queue: JobQueue,
}

impl BookingService {
    pub fn new(db: DatabaseService, queue: JobQueue) -> Self {
        Self { db, queue }
    }

    /// Reserve a seat for the user; emits exactly one booking notification
    /// on success.
    pub async fn reserve(&self, user_id: i64, event_id: i64) -> Result<(Booking, Event)> {
        let (booking, event) = self.db.bookings.reserve(user_id, event_id).await?;

        self.queue.notify(
            user_id,
            Some(event.id),
            NotificationKind::Booking,
            format!("You have successfully booked \"{}\"", event.title),
        );

        info!(user_id, event_id, booking_id = booking.id, "Seat reserved");
        Ok((booking, event))
    }

    /// Cancel the user's booking; emits exactly one cancellation
    /// notification on success.
    pub async fn cancel(&self, user_id: i64, event_id: i64) -> Result<Event> {
        let event = self.db.bookings.cancel(user_id, event_id).await?;

        self.queue.notify(
            user_id,
            Some(event.id),
            NotificationKind::Cancel,
            NotificationService::cancel_message(&event),
        );

        info!(user_id, event_id, "Booking cancelled");
        Ok(event)
    }
}
