//! Database model for attendance records.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use scholaris_core::attendance::{AttendanceRecord, NewAttendanceRecord};

/// Database model for attendance records.
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
#[diesel(table_name = crate::schema::attendance_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AttendanceRecordDB {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub date: NaiveDate,
    pub is_present: bool,
    pub student_id: String,
    pub teacher_id: String,
}

impl From<AttendanceRecordDB> for AttendanceRecord {
    fn from(db: AttendanceRecordDB) -> Self {
        Self {
            id: db.id,
            created_at: db.created_at,
            updated_at: db.updated_at,
            date: db.date,
            is_present: db.is_present,
            student_id: db.student_id,
            teacher_id: db.teacher_id,
        }
    }
}

impl From<NewAttendanceRecord> for AttendanceRecordDB {
    fn from(domain: NewAttendanceRecord) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(), // assigned by the repository
            created_at: now,
            updated_at: now,
            date: domain.date,
            is_present: domain.is_present,
            student_id: domain.student_id,
            teacher_id: domain.teacher_id,
        }
    }
}
