//! Database model for events.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use scholaris_core::events::{Event, EventUpdate, NewEvent};

/// Database model for events.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EventDB {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub location: Option<String>,
    pub school_id: String,
}

impl From<EventDB> for Event {
    fn from(db: EventDB) -> Self {
        Self {
            id: db.id,
            created_at: db.created_at,
            updated_at: db.updated_at,
            title: db.title,
            description: db.description,
            start_date: db.start_date,
            end_date: db.end_date,
            location: db.location,
            school_id: db.school_id,
        }
    }
}

impl EventDB {
    pub fn from_new(school_id: &str, domain: NewEvent) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(), // assigned by the repository
            created_at: now,
            updated_at: now,
            title: domain.title,
            description: domain.description,
            start_date: domain.start_date,
            end_date: domain.end_date,
            location: domain.location,
            school_id: school_id.to_string(),
        }
    }
}

/// Partial changeset for events; `None` fields are left untouched.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::events)]
pub struct EventChangeset {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub location: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<EventUpdate> for EventChangeset {
    fn from(domain: EventUpdate) -> Self {
        Self {
            title: domain.title,
            description: domain.description,
            start_date: domain.start_date,
            end_date: domain.end_date,
            location: domain.location,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
