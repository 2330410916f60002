//! Database model for academic records.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use scholaris_core::academics::{AcademicRecord, AcademicRecordUpdate, NewAcademicRecord};

/// Database model for academic records.
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
#[diesel(table_name = crate::schema::academic_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AcademicRecordDB {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub subject: String,
    pub score: f64,
    pub term: String,
    pub year: i32,
    pub student_id: String,
}

impl From<AcademicRecordDB> for AcademicRecord {
    fn from(db: AcademicRecordDB) -> Self {
        Self {
            id: db.id,
            created_at: db.created_at,
            updated_at: db.updated_at,
            subject: db.subject,
            score: db.score,
            term: db.term,
            year: db.year,
            student_id: db.student_id,
        }
    }
}

impl From<NewAcademicRecord> for AcademicRecordDB {
    fn from(domain: NewAcademicRecord) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(), // assigned by the repository
            created_at: now,
            updated_at: now,
            subject: domain.subject,
            score: domain.score,
            term: domain.term,
            year: domain.year,
            student_id: domain.student_id,
        }
    }
}

/// Partial changeset for academic records; `None` fields are left
/// untouched.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::academic_records)]
pub struct AcademicRecordChangeset {
    pub subject: Option<String>,
    pub score: Option<f64>,
    pub term: Option<String>,
    pub year: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl From<AcademicRecordUpdate> for AcademicRecordChangeset {
    fn from(domain: AcademicRecordUpdate) -> Self {
        Self {
            subject: domain.subject,
            score: domain.score,
            term: domain.term,
            year: domain.year,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
