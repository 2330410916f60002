use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use scholaris_core::errors::{Error, Result, ValidationError};
use scholaris_core::events::{Event, EventFilter, EventRepositoryTrait, EventUpdate, NewEvent};
use scholaris_core::paging::Page;

use super::model::{EventChangeset, EventDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::events;
use crate::tenancy::require_school;

/// Repository for managing event data in the database.
pub struct EventRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl EventRepository {
    /// Creates a new EventRepository instance.
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl EventRepositoryTrait for EventRepository {
    async fn create(&self, school_id: &str, new_event: NewEvent) -> Result<Event> {
        let mut event_db = EventDB::from_new(school_id, new_event);
        event_db.id = Uuid::new_v4().to_string();

        self.writer
            .exec(move |conn| {
                require_school(conn, &event_db.school_id)?;

                diesel::insert_into(events::table)
                    .values(&event_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(event_db.into())
            })
            .await
    }

    async fn update(&self, school_id: &str, event_id: &str, update: EventUpdate) -> Result<Event> {
        let school_id = school_id.to_string();
        let event_id = event_id.to_string();

        self.writer
            .exec(move |conn| {
                let existing = events::table
                    .find(&event_id)
                    .filter(events::school_id.eq(&school_id))
                    .select(EventDB::as_select())
                    .first::<EventDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        Error::NotFound(format!("Event with id {} not found", event_id))
                    })?;

                // The effective range after the merge must stay valid even
                // when only one end was touched.
                let effective_start = update.start_date.unwrap_or(existing.start_date);
                let effective_end = update.end_date.unwrap_or(existing.end_date);
                if effective_end < effective_start {
                    return Err(Error::Validation(ValidationError::InvalidInput(
                        "Event end date cannot be before its start date".to_string(),
                    )));
                }

                let changeset = EventChangeset::from(update);
                diesel::update(events::table.find(&event_id))
                    .set(&changeset)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let reloaded = events::table
                    .find(&event_id)
                    .select(EventDB::as_select())
                    .first::<EventDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(reloaded.into())
            })
            .await
    }

    async fn delete(&self, school_id: &str, event_id: &str) -> Result<usize> {
        let school_id = school_id.to_string();
        let event_id = event_id.to_string();

        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(
                    events::table
                        .find(&event_id)
                        .filter(events::school_id.eq(&school_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;

                if affected == 0 {
                    return Err(Error::NotFound(format!(
                        "Event with id {} not found",
                        event_id
                    )));
                }
                Ok(affected)
            })
            .await
    }

    fn get_by_id(&self, school_id: &str, event_id: &str) -> Result<Event> {
        let mut conn = get_connection(&self.pool)?;

        let event = events::table
            .find(event_id)
            .filter(events::school_id.eq(school_id))
            .select(EventDB::as_select())
            .first::<EventDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::NotFound(format!("Event with id {} not found", event_id)))?;

        Ok(event.into())
    }

    fn list(&self, school_id: &str, filter: EventFilter, page: Page) -> Result<Vec<Event>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = events::table
            .filter(events::school_id.eq(school_id))
            .into_boxed();
        if let Some(starts_after) = filter.starts_after {
            query = query.filter(events::start_date.ge(starts_after));
        }
        if let Some(starts_before) = filter.starts_before {
            query = query.filter(events::start_date.lt(starts_before));
        }

        let results = query
            .select(EventDB::as_select())
            .order((events::created_at.asc(), events::id.asc()))
            .limit(page.limit)
            .offset(page.offset)
            .load::<EventDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Event::from).collect())
    }
}
