//! Evently — event booking platform backend
//!
//! Organizers publish events with limited seating; users reserve and cancel
//! seats, rate attended events, and receive asynchronous notifications.
//! Seat-count correctness under concurrent reservations is guaranteed by
//! running every booking's check-then-act sequence under an exclusive
//! event-row lock; side effects flow through an in-process job queue with
//! named priority lanes.

pub mod config;
pub mod database;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use database::DatabaseService;
pub use services::ServiceFactory;
pub use utils::errors::{EventlyError, Result};

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub pool: database::DatabasePool,
    pub db: DatabaseService,
    pub services: ServiceFactory,
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
