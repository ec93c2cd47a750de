//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod booking;
pub mod event;
pub mod notification;
pub mod rating;
pub mod user;

pub use booking::Booking;
pub use event::{
    CreateEventRequest, Event, EventQuery, EventStatus, EventWithStats, Tag, UpdateEventRequest,
};
pub use notification::{Notification, NotificationKind};
pub use rating::Rating;
pub use user::User;
