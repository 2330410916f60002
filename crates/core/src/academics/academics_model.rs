//! Academic record domain models.
//!
//! Academic records belong to a student only; tenant membership is derived
//! through the student, same as attendance.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::utils::require_text;

/// Domain model representing a per-subject score for a term.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicRecord {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub subject: String,
    pub score: f64,
    pub term: String,
    pub year: i32,
    pub student_id: String,
}

/// Input model for creating a new academic record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAcademicRecord {
    pub subject: String,
    pub score: f64,
    pub term: String,
    pub year: i32,
    pub student_id: String,
}

impl NewAcademicRecord {
    pub fn validate(&self) -> Result<()> {
        require_text("subject", &self.subject)?;
        require_text("term", &self.term)?;
        require_text("studentId", &self.student_id)?;
        validate_score(self.score)?;
        Ok(())
    }
}

/// Partial update for an academic record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicRecordUpdate {
    pub subject: Option<String>,
    pub score: Option<f64>,
    pub term: Option<String>,
    pub year: Option<i32>,
}

impl AcademicRecordUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref subject) = self.subject {
            require_text("subject", subject)?;
        }
        if let Some(ref term) = self.term {
            require_text("term", term)?;
        }
        if let Some(score) = self.score {
            validate_score(score)?;
        }
        Ok(())
    }
}

/// Filter for listing a school's academic records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicRecordFilter {
    pub student_id: Option<String>,
    pub year: Option<i32>,
    pub term: Option<String>,
}

fn validate_score(score: f64) -> Result<()> {
    if !score.is_finite() || score < 0.0 {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Score must be a non-negative number".to_string(),
        )));
    }
    Ok(())
}
