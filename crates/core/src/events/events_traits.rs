//! Event repository and service traits.

use async_trait::async_trait;

use super::events_model::{Event, EventFilter, EventUpdate, NewEvent};
use crate::errors::Result;
use crate::paging::Page;

/// Trait defining the contract for Event repository operations.
#[async_trait]
pub trait EventRepositoryTrait: Send + Sync {
    async fn create(&self, school_id: &str, new_event: NewEvent) -> Result<Event>;

    async fn update(&self, school_id: &str, event_id: &str, update: EventUpdate) -> Result<Event>;

    async fn delete(&self, school_id: &str, event_id: &str) -> Result<usize>;

    fn get_by_id(&self, school_id: &str, event_id: &str) -> Result<Event>;

    fn list(&self, school_id: &str, filter: EventFilter, page: Page) -> Result<Vec<Event>>;
}

/// Trait defining the contract for Event service operations.
#[async_trait]
pub trait EventServiceTrait: Send + Sync {
    async fn create_event(&self, school_id: &str, new_event: NewEvent) -> Result<Event>;

    async fn update_event(
        &self,
        school_id: &str,
        event_id: &str,
        update: EventUpdate,
    ) -> Result<Event>;

    async fn delete_event(&self, school_id: &str, event_id: &str) -> Result<usize>;

    fn get_event(&self, school_id: &str, event_id: &str) -> Result<Event>;

    fn list_events(&self, school_id: &str, filter: EventFilter, page: Page) -> Result<Vec<Event>>;
}
