//! Request middleware
//!
//! Authentication lives here; request logging is handled by tower-http's
//! `TraceLayer` installed on the router.

pub mod auth;

pub use auth::AuthUser;
