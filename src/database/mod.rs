//! Database module
//!
//! This module handles database connections and operations

pub mod connection;
pub mod repositories;
pub mod service;

pub use connection::{create_pool, health_check, run_migrations, DatabasePool, PoolConfig};
pub use repositories::{
    BookingRepository, EventRepository, NotificationRepository, RatingRepository, TagRepository,
    UserRepository,
};
pub use service::DatabaseService;
