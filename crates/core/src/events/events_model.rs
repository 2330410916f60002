//! School event domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::utils::require_text;

/// Domain model representing a school event with a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
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

/// Input model for creating a new event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub location: Option<String>,
}

impl NewEvent {
    pub fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        validate_range(self.start_date, self.end_date)
    }
}

/// Partial update for an event.
///
/// When either end of the range is touched, the effective range (touched
/// values merged over the stored ones) is re-validated by the repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub location: Option<String>,
}

impl EventUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref title) = self.title {
            require_text("title", title)?;
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            validate_range(start, end)?;
        }
        Ok(())
    }
}

/// Filter for listing a school's events by start date window.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilter {
    pub starts_after: Option<NaiveDateTime>,
    pub starts_before: Option<NaiveDateTime>,
}

pub(crate) fn validate_range(start: NaiveDateTime, end: NaiveDateTime) -> Result<()> {
    if end < start {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Event end date cannot be before its start date".to_string(),
        )));
    }
    Ok(())
}
