//! Database service layer
//!
//! Bundles all repositories behind a single cloneable handle.

use crate::database::connection::DatabasePool;
use crate::database::repositories::{
    BookingRepository, EventRepository, NotificationRepository, RatingRepository, TagRepository,
    UserRepository,
};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub events: EventRepository,
    pub tags: TagRepository,
    pub bookings: BookingRepository,
    pub ratings: RatingRepository,
    pub notifications: NotificationRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            tags: TagRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool.clone()),
            ratings: RatingRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool),
        }
    }
}
