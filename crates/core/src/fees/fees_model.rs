//! Fee domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::utils::require_text;

/// Domain model representing a fee charged to a student.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub amount: f64,
    pub due_date: NaiveDateTime,
    pub is_paid: bool,
    pub description: Option<String>,
    pub student_id: String,
    pub school_id: String,
}

/// Input model for creating a new fee.
///
/// The student link is fixed at creation; a fee is never re-parented.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFee {
    pub amount: f64,
    pub due_date: NaiveDateTime,
    #[serde(default)]
    pub is_paid: bool,
    pub description: Option<String>,
    pub student_id: String,
}

impl NewFee {
    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)?;
        require_text("studentId", &self.student_id)?;
        Ok(())
    }
}

/// Partial update for a fee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeUpdate {
    pub amount: Option<f64>,
    pub due_date: Option<NaiveDateTime>,
    pub is_paid: Option<bool>,
    pub description: Option<String>,
}

impl FeeUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        Ok(())
    }
}

/// Filter for listing a school's fees.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeFilter {
    pub student_id: Option<String>,
    pub is_paid: Option<bool>,
    /// Only fees due strictly before this instant.
    pub due_before: Option<NaiveDateTime>,
}

fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Fee amount must be a non-negative number".to_string(),
        )));
    }
    Ok(())
}
