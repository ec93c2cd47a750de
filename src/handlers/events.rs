//! Event endpoints
//!
//! Listing and detail are public; everything that mutates requires a
//! bearer token. Booking, cancellation and rating are thin wrappers over
//! the service layer, which owns the locking and notification rules.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::AuthUser;
use crate::models::event::{
    CreateEventRequest, EventQuery, EventStatus, EventWithStats, Tag, UpdateEventRequest,
};
use crate::services::NotificationService;
use crate::utils::errors::Result;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct OrganizerResponse {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub id: i64,
    pub title: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub status: EventStatus,
    pub organizer: OrganizerResponse,
    pub tags: Vec<Tag>,
    pub free_seats: i64,
    pub avg_rating: f64,
}

#[derive(Debug, Serialize)]
pub struct EventDetailResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub location: String,
    pub seats: i32,
    pub status: EventStatus,
    pub organizer: OrganizerResponse,
    pub tags: Vec<Tag>,
    pub free_seats: i64,
    pub avg_rating: f64,
    pub created_at: DateTime<Utc>,
}

impl EventListResponse {
    fn from_stats(event: EventWithStats, tags: Vec<Tag>) -> Self {
        Self {
            id: event.id,
            title: event.title,
            location: event.location,
            start_time: event.start_time,
            status: event.status,
            organizer: OrganizerResponse {
                id: event.organizer_id,
                username: event.organizer_username,
            },
            tags,
            free_seats: event.free_seats,
            avg_rating: event.avg_rating,
        }
    }
}

impl EventDetailResponse {
    fn from_stats(event: EventWithStats, tags: Vec<Tag>) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            start_time: event.start_time,
            location: event.location,
            seats: event.seats,
            status: event.status,
            organizer: OrganizerResponse {
                id: event.organizer_id,
                username: event.organizer_username,
            },
            tags,
            free_seats: event.free_seats,
            avg_rating: event.avg_rating,
            created_at: event.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub booking_id: i64,
    pub booked_at: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub score: Option<i16>,
}

#[derive(Debug, Serialize)]
pub struct RatingResponse {
    pub id: i64,
    pub event_id: i64,
    pub score: i16,
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventQuery>,
) -> Result<Json<Vec<EventListResponse>>> {
    let events = state.services.events.list(&query).await?;

    Ok(Json(
        events
            .into_iter()
            .map(|(event, tags)| EventListResponse::from_stats(event, tags))
            .collect(),
    ))
}

pub async fn create_event(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventDetailResponse>)> {
    let event = state.services.events.create(user.id, request).await?;
    let (event, tags) = state.services.events.detail(event.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(EventDetailResponse::from_stats(event, tags)),
    ))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<EventDetailResponse>> {
    let (event, tags) = state.services.events.detail(event_id).await?;
    Ok(Json(EventDetailResponse::from_stats(event, tags)))
}

pub async fn update_event(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<i64>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<EventDetailResponse>> {
    state.services.events.update(user.id, event_id, request).await?;
    let (event, tags) = state.services.events.detail(event_id).await?;
    Ok(Json(EventDetailResponse::from_stats(event, tags)))
}

pub async fn delete_event(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<i64>,
) -> Result<StatusCode> {
    state.services.events.delete(user.id, event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn book_event(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<i64>,
) -> Result<(StatusCode, Json<BookingResponse>)> {
    let (booking, event) = state.services.bookings.reserve(user.id, event_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            booking_id: booking.id,
            booked_at: booking.booked_at,
            message: NotificationService::booking_message(&event),
        }),
    ))
}

pub async fn cancel_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    state.services.bookings.cancel(user.id, event_id).await?;
    Ok(Json(serde_json::json!({ "status": "cancelled" })))
}

pub async fn rate_event(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<i64>,
    Json(request): Json<RateRequest>,
) -> Result<Json<RatingResponse>> {
    let rating = state
        .services
        .ratings
        .rate(user.id, event_id, request.score)
        .await?;

    Ok(Json(RatingResponse {
        id: rating.id,
        event_id: rating.event_id,
        score: rating.score,
    }))
}

pub async fn my_upcoming_events(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<EventListResponse>>> {
    let events = state.services.events.upcoming_for_user(user.id).await?;

    Ok(Json(
        events
            .into_iter()
            .map(|(event, tags)| EventListResponse::from_stats(event, tags))
            .collect(),
    ))
}
