//! Event service implementation
//!
//! Event CRUD with organizer ownership rules, the 1-hour deletion grace
//! window, and the filtered/ordered listings. Derived seat and rating
//! figures come from the repository, computed at read time.

use chrono::Utc;
use tracing::info;

use crate::database::DatabaseService;
use crate::models::event::{
    CreateEventRequest, Event, EventQuery, EventWithStats, Tag, UpdateEventRequest,
};
use crate::utils::errors::{EventlyError, Result};

#[derive(Clone)]
pub struct EventService {
    db: DatabaseService,
}

impl EventService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    pub async fn create(&self, organizer_id: i64, request: CreateEventRequest) -> Result<Event> {
        let event = self.db.events.create(organizer_id, request).await?;
        info!(event_id = event.id, organizer_id, "Event created");
        Ok(event)
    }

    /// Partially update an event; only its organizer may do so.
    pub async fn update(
        &self,
        user_id: i64,
        event_id: i64,
        request: UpdateEventRequest,
    ) -> Result<Event> {
        self.find_owned(user_id, event_id).await?;
        self.db.events.update(event_id, request).await
    }

    /// Delete an event; only its organizer, and only within one hour of
    /// creation.
    pub async fn delete(&self, user_id: i64, event_id: i64) -> Result<()> {
        let event = self.find_owned(user_id, event_id).await?;

        if !event.within_delete_window(Utc::now()) {
            return Err(EventlyError::DeleteWindowExpired);
        }

        self.db.events.delete(event_id).await?;
        info!(event_id, user_id, "Event deleted");
        Ok(())
    }

    pub async fn detail(&self, event_id: i64) -> Result<(EventWithStats, Vec<Tag>)> {
        let event = self
            .db
            .events
            .find_with_stats(event_id)
            .await?
            .ok_or(EventlyError::EventNotFound { event_id })?;

        let mut tags = self.db.events.tags_for_events(&[event_id]).await?;
        Ok((event, tags.remove(&event_id).unwrap_or_default()))
    }

    pub async fn list(&self, query: &EventQuery) -> Result<Vec<(EventWithStats, Vec<Tag>)>> {
        let events = self.db.events.list(query).await?;
        self.attach_tags(events).await
    }

    /// Upcoming events the user has booked, soonest first.
    pub async fn upcoming_for_user(&self, user_id: i64) -> Result<Vec<(EventWithStats, Vec<Tag>)>> {
        let events = self.db.events.upcoming_for_user(user_id, Utc::now()).await?;
        self.attach_tags(events).await
    }

    async fn find_owned(&self, user_id: i64, event_id: i64) -> Result<Event> {
        let event = self
            .db
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(EventlyError::EventNotFound { event_id })?;

        if event.organizer_id != user_id {
            return Err(EventlyError::PermissionDenied);
        }

        Ok(event)
    }

    async fn attach_tags(
        &self,
        events: Vec<EventWithStats>,
    ) -> Result<Vec<(EventWithStats, Vec<Tag>)>> {
        let ids: Vec<i64> = events.iter().map(|e| e.id).collect();
        let mut tags = self.db.events.tags_for_events(&ids).await?;

        Ok(events
            .into_iter()
            .map(|e| {
                let event_tags = tags.remove(&e.id).unwrap_or_default();
                (e, event_tags)
            })
            .collect())
    }
}
