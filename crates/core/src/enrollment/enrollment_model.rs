//! Grade and student domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::utils::{require_text, validate_email};

/// Domain model representing a grade (class) within a school.
///
/// Every grade has exactly one homeroom teacher, who must belong to the
/// same school.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub name: String,
    pub level: i32,
    pub teacher_id: String,
    pub school_id: String,
}

/// Input model for creating a new grade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGrade {
    pub name: String,
    pub level: i32,
    pub teacher_id: String,
}

impl NewGrade {
    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_text("teacherId", &self.teacher_id)?;
        if self.level < 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Grade level cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}

/// Partial update for a grade. Reassigning `teacherId` re-validates that
/// the new teacher belongs to the same school.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeUpdate {
    pub name: Option<String>,
    pub level: Option<i32>,
    pub teacher_id: Option<String>,
}

impl GradeUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref name) = self.name {
            require_text("name", name)?;
        }
        if matches!(self.level, Some(level) if level < 0) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Grade level cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}

/// Filter for listing a school's grades.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeFilter {
    pub teacher_id: Option<String>,
    pub level: Option<i32>,
}

/// Domain model representing an enrolled student.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDateTime,
    pub gender: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    /// Globally unique when present.
    pub email: Option<String>,
    pub enrollment_date: NaiveDateTime,
    pub grade_id: String,
    pub school_id: String,
}

/// Input model for enrolling a new student.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDateTime,
    pub gender: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub enrollment_date: NaiveDateTime,
    pub grade_id: String,
}

impl NewStudent {
    pub fn validate(&self) -> Result<()> {
        require_text("firstName", &self.first_name)?;
        require_text("lastName", &self.last_name)?;
        require_text("gender", &self.gender)?;
        require_text("gradeId", &self.grade_id)?;
        if let Some(ref email) = self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

/// Partial update for a student. Moving a student to another grade
/// re-validates that the grade belongs to the same school.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDateTime>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub enrollment_date: Option<NaiveDateTime>,
    pub grade_id: Option<String>,
}

impl StudentUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref email) = self.email {
            validate_email(email)?;
        }
        if let Some(ref grade_id) = self.grade_id {
            require_text("gradeId", grade_id)?;
        }
        Ok(())
    }
}

/// Filter for listing a school's students.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFilter {
    pub grade_id: Option<String>,
}
