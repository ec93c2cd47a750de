//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod booking;
pub mod event;
pub mod notification;
pub mod rating;
pub mod tag;
pub mod user;

pub use booking::BookingRepository;
pub use event::EventRepository;
pub use notification::NotificationRepository;
pub use rating::RatingRepository;
pub use tag::TagRepository;
pub use user::UserRepository;
