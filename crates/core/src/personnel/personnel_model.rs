//! Teacher and staff domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::utils::{require_text, validate_email};

/// Domain model representing a teacher.
///
/// Teachers are referenced by grades (as homeroom teacher) and by
/// attendance records (as recorder).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub first_name: String,
    pub last_name: String,
    /// Globally unique.
    pub email: String,
    pub phone_number: Option<String>,
    pub subject: Option<String>,
    pub school_id: String,
}

/// Input model for creating a new teacher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeacher {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub subject: Option<String>,
}

impl NewTeacher {
    pub fn validate(&self) -> Result<()> {
        require_text("firstName", &self.first_name)?;
        require_text("lastName", &self.last_name)?;
        validate_email(&self.email)?;
        Ok(())
    }
}

/// Partial update for a teacher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub subject: Option<String>,
}

impl TeacherUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref email) = self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

/// Filter for listing a school's teachers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherFilter {
    pub subject: Option<String>,
}

/// Domain model representing a non-teaching staff member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub first_name: String,
    pub last_name: String,
    /// Globally unique.
    pub email: String,
    pub phone_number: Option<String>,
    pub position: String,
    pub school_id: String,
}

/// Input model for creating a new staff member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStaff {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub position: String,
}

impl NewStaff {
    pub fn validate(&self) -> Result<()> {
        require_text("firstName", &self.first_name)?;
        require_text("lastName", &self.last_name)?;
        validate_email(&self.email)?;
        require_text("position", &self.position)?;
        Ok(())
    }
}

/// Partial update for a staff member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub position: Option<String>,
}

impl StaffUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref email) = self.email {
            validate_email(email)?;
        }
        if let Some(ref position) = self.position {
            require_text("position", position)?;
        }
        Ok(())
    }
}

/// Filter for listing a school's staff.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffFilter {
    pub position: Option<String>,
}
