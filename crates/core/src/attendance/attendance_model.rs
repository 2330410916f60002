//! Attendance record domain models.
//!
//! An attendance record links a student and the teacher who recorded it on
//! a given day. The row carries no school id of its own; tenant membership
//! is derived through the student.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::utils::require_text;

/// Domain model representing one student's attendance on one day.
///
/// At most one record may exist per (date, student) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub date: NaiveDate,
    pub is_present: bool,
    pub student_id: String,
    pub teacher_id: String,
}

/// Input model for recording attendance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendanceRecord {
    pub date: NaiveDate,
    pub is_present: bool,
    pub student_id: String,
    pub teacher_id: String,
}

impl NewAttendanceRecord {
    pub fn validate(&self) -> Result<()> {
        require_text("studentId", &self.student_id)?;
        require_text("teacherId", &self.teacher_id)?;
        Ok(())
    }
}

/// Partial update for an attendance record.
///
/// Only the presence flag is mutable; date, student, and teacher identify
/// the record and are fixed at creation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceUpdate {
    pub is_present: Option<bool>,
}

/// Filter for listing a school's attendance records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceFilter {
    pub student_id: Option<String>,
    pub teacher_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub is_present: Option<bool>,
}
