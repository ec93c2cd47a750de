//! Services module
//!
//! This module contains business logic services

pub mod booking;
pub mod event;
pub mod notification;
pub mod queue;
pub mod rating;
pub mod scheduler;
pub mod sweep;

pub use booking::BookingService;
pub use event::EventService;
pub use notification::NotificationService;
pub use queue::{Job, JobQueue, JobReceivers, JobWorker, QueueLane};
pub use rating::RatingService;
pub use scheduler::Scheduler;
pub use sweep::SweepService;

use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub events: EventService,
    pub bookings: BookingService,
    pub ratings: RatingService,
    pub notifications: NotificationService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(db: DatabaseService, queue: JobQueue) -> Self {
        Self {
            events: EventService::new(db.clone()),
            bookings: BookingService::new(db.clone(), queue),
            ratings: RatingService::new(db.clone()),
            notifications: NotificationService::new(db),
        }
    }
}
