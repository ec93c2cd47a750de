//! HTTP handlers module
//!
//! Route definitions and request handlers for the public API.

pub mod events;
pub mod health;
pub mod notifications;
pub mod tags;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the application router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/events/",
            get(events::list_events).post(events::create_event),
        )
        .route(
            "/events/my_upcoming_events/",
            get(events::my_upcoming_events),
        )
        .route(
            "/events/:id/",
            get(events::get_event)
                .patch(events::update_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/events/:id/book/", post(events::book_event))
        .route("/events/:id/cancel_booking/", post(events::cancel_booking))
        .route("/events/:id/rate/", post(events::rate_event))
        .route("/tags/", get(tags::list_tags).post(tags::create_tag))
        .route("/notifications/", get(notifications::list_notifications));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
