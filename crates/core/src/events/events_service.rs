use log::debug;
use std::sync::Arc;

use super::events_model::{Event, EventFilter, EventUpdate, NewEvent};
use super::events_traits::{EventRepositoryTrait, EventServiceTrait};
use crate::errors::Result;
use crate::paging::Page;

/// Service for managing a school's events.
pub struct EventService {
    repository: Arc<dyn EventRepositoryTrait>,
}

impl EventService {
    pub fn new(repository: Arc<dyn EventRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl EventServiceTrait for EventService {
    async fn create_event(&self, school_id: &str, new_event: NewEvent) -> Result<Event> {
        debug!(
            "Creating event '{}' in school {}",
            new_event.title, school_id
        );
        new_event.validate()?;
        self.repository.create(school_id, new_event).await
    }

    async fn update_event(
        &self,
        school_id: &str,
        event_id: &str,
        update: EventUpdate,
    ) -> Result<Event> {
        update.validate()?;
        self.repository.update(school_id, event_id, update).await
    }

    async fn delete_event(&self, school_id: &str, event_id: &str) -> Result<usize> {
        self.repository.delete(school_id, event_id).await
    }

    fn get_event(&self, school_id: &str, event_id: &str) -> Result<Event> {
        self.repository.get_by_id(school_id, event_id)
    }

    fn list_events(&self, school_id: &str, filter: EventFilter, page: Page) -> Result<Vec<Event>> {
        self.repository.list(school_id, filter, page.normalized())
    }
}
