//! School domain models.
//!
//! A school is the tenant root: every other entity in the store belongs to
//! exactly one school, directly or through a student.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::SCHOOL_CODE_LEN;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::validate_email;

/// Kind of institution a school is registered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchoolType {
    BasicSchool,
    HighSchool,
    VocationalCollege,
    TradeSchool,
    Government,
    Private,
}

impl SchoolType {
    /// String form stored in the database.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            SchoolType::BasicSchool => "BASIC_SCHOOL",
            SchoolType::HighSchool => "HIGH_SCHOOL",
            SchoolType::VocationalCollege => "VOCATIONAL_COLLEGE",
            SchoolType::TradeSchool => "TRADE_SCHOOL",
            SchoolType::Government => "GOVERNMENT",
            SchoolType::Private => "PRIVATE",
        }
    }

    pub fn from_db_str(value: &str) -> Result<Self> {
        match value {
            "BASIC_SCHOOL" => Ok(SchoolType::BasicSchool),
            "HIGH_SCHOOL" => Ok(SchoolType::HighSchool),
            "VOCATIONAL_COLLEGE" => Ok(SchoolType::VocationalCollege),
            "TRADE_SCHOOL" => Ok(SchoolType::TradeSchool),
            "GOVERNMENT" => Ok(SchoolType::Government),
            "PRIVATE" => Ok(SchoolType::Private),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown school type '{}'",
                other
            )))),
        }
    }
}

/// Domain model representing a school (tenant root).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub name: String,
    pub contact_person: String,
    /// Registration code, exactly four characters, globally unique.
    pub code: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub image: Option<String>,
    /// Globally unique contact email.
    pub email: String,
    pub website_url: Option<String>,
    pub school_type: SchoolType,
}

/// Input model for creating a new school.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSchool {
    pub name: String,
    pub contact_person: String,
    pub code: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub image: Option<String>,
    pub email: String,
    pub website_url: Option<String>,
    pub school_type: SchoolType,
}

impl NewSchool {
    /// Validates the new school data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if self.contact_person.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "contactPerson".to_string(),
            )));
        }
        validate_school_code(&self.code)?;
        validate_email(&self.email)?;
        Ok(())
    }
}

/// Partial update for a school. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolUpdate {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub code: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub image: Option<String>,
    pub email: Option<String>,
    pub website_url: Option<String>,
    pub school_type: Option<SchoolType>,
}

impl SchoolUpdate {
    /// Validates the touched fields.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref name) = self.name {
            if name.trim().is_empty() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "School name cannot be empty".to_string(),
                )));
            }
        }
        if let Some(ref code) = self.code {
            validate_school_code(code)?;
        }
        if let Some(ref email) = self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

/// Filter for listing schools.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolFilter {
    pub school_type: Option<SchoolType>,
}

/// Aggregate counters for a school, one row per school.
///
/// The snapshot is maintained by recomputation, not by direct user
/// mutation: `recompute` derives the counters from the current student,
/// teacher, staff, fee, and attendance rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolStats {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub total_students: i32,
    pub total_teachers: i32,
    pub total_staff: i32,
    pub total_fees_paid: f64,
    pub total_fees_outstanding: f64,
    /// Share of attendance records marked present, in percent (0..=100).
    pub average_attendance: f64,
    pub school_id: String,
}

/// Snapshot overwrite for a school's stats row.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolStatsUpdate {
    pub total_students: Option<i32>,
    pub total_teachers: Option<i32>,
    pub total_staff: Option<i32>,
    pub total_fees_paid: Option<f64>,
    pub total_fees_outstanding: Option<f64>,
    pub average_attendance: Option<f64>,
}

impl SchoolStatsUpdate {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("totalStudents", self.total_students.map(i64::from)),
            ("totalTeachers", self.total_teachers.map(i64::from)),
            ("totalStaff", self.total_staff.map(i64::from)),
        ] {
            if matches!(value, Some(v) if v < 0) {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "{} cannot be negative",
                    field
                ))));
            }
        }
        for (field, value) in [
            ("totalFeesPaid", self.total_fees_paid),
            ("totalFeesOutstanding", self.total_fees_outstanding),
            ("averageAttendance", self.average_attendance),
        ] {
            if matches!(value, Some(v) if !v.is_finite() || v < 0.0) {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "{} must be a non-negative number",
                    field
                ))));
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_school_code(code: &str) -> Result<()> {
    if code.chars().count() != SCHOOL_CODE_LEN {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "School code must be exactly {} characters",
            SCHOOL_CODE_LEN
        ))));
    }
    Ok(())
}
