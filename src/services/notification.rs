//! Notification service implementation
//!
//! Formats the user-facing messages recorded by the notification log and
//! serves per-user reads. Records themselves are written by the job worker;
//! end users never create them directly.

use crate::database::DatabaseService;
use crate::models::event::Event;
use crate::models::notification::Notification;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct NotificationService {
    db: DatabaseService,
}

impl NotificationService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// A user's notifications, newest first
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Notification>> {
        self.db.notifications.list_for_user(user_id).await
    }

    /// Booking confirmation text, also returned in the booking response.
    pub fn booking_message(event: &Event) -> String {
        format!(
            "You have successfully booked a seat for \"{}\". Location: {}, starts at {}.",
            event.title,
            event.location,
            event.start_time.format("%d.%m.%Y %H:%M")
        )
    }

    pub fn cancel_message(event: &Event) -> String {
        format!("You have cancelled your booking for \"{}\".", event.title)
    }

    pub fn reminder_message(event: &Event) -> String {
        format!(
            "Reminder: \"{}\" starts in an hour, at {}.",
            event.title,
            event.start_time.format("%H:%M")
        )
    }
}
