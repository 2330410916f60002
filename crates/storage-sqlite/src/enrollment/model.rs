//! Database models for grades and students.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use scholaris_core::enrollment::{
    Grade, GradeUpdate, NewGrade, NewStudent, Student, StudentUpdate,
};

/// Database model for grades.
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
#[diesel(table_name = crate::schema::grades)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GradeDB {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub name: String,
    pub level: i32,
    pub teacher_id: String,
    pub school_id: String,
}

impl From<GradeDB> for Grade {
    fn from(db: GradeDB) -> Self {
        Self {
            id: db.id,
            created_at: db.created_at,
            updated_at: db.updated_at,
            name: db.name,
            level: db.level,
            teacher_id: db.teacher_id,
            school_id: db.school_id,
        }
    }
}

impl GradeDB {
    pub fn from_new(school_id: &str, domain: NewGrade) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(), // assigned by the repository
            created_at: now,
            updated_at: now,
            name: domain.name,
            level: domain.level,
            teacher_id: domain.teacher_id,
            school_id: school_id.to_string(),
        }
    }
}

/// Partial changeset for grades; `None` fields are left untouched.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::grades)]
pub struct GradeChangeset {
    pub name: Option<String>,
    pub level: Option<i32>,
    pub teacher_id: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<GradeUpdate> for GradeChangeset {
    fn from(domain: GradeUpdate) -> Self {
        Self {
            name: domain.name,
            level: domain.level,
            teacher_id: domain.teacher_id,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Database model for students.
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
#[diesel(table_name = crate::schema::students)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StudentDB {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDateTime,
    pub gender: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub enrollment_date: NaiveDateTime,
    pub grade_id: String,
    pub school_id: String,
}

impl From<StudentDB> for Student {
    fn from(db: StudentDB) -> Self {
        Self {
            id: db.id,
            created_at: db.created_at,
            updated_at: db.updated_at,
            first_name: db.first_name,
            last_name: db.last_name,
            date_of_birth: db.date_of_birth,
            gender: db.gender,
            address: db.address,
            phone_number: db.phone_number,
            email: db.email,
            enrollment_date: db.enrollment_date,
            grade_id: db.grade_id,
            school_id: db.school_id,
        }
    }
}

impl StudentDB {
    pub fn from_new(school_id: &str, domain: NewStudent) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(), // assigned by the repository
            created_at: now,
            updated_at: now,
            first_name: domain.first_name,
            last_name: domain.last_name,
            date_of_birth: domain.date_of_birth,
            gender: domain.gender,
            address: domain.address,
            phone_number: domain.phone_number,
            email: domain.email,
            enrollment_date: domain.enrollment_date,
            grade_id: domain.grade_id,
            school_id: school_id.to_string(),
        }
    }
}

/// Partial changeset for students; `None` fields are left untouched.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::students)]
pub struct StudentChangeset {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDateTime>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub enrollment_date: Option<NaiveDateTime>,
    pub grade_id: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<StudentUpdate> for StudentChangeset {
    fn from(domain: StudentUpdate) -> Self {
        Self {
            first_name: domain.first_name,
            last_name: domain.last_name,
            date_of_birth: domain.date_of_birth,
            gender: domain.gender,
            address: domain.address,
            phone_number: domain.phone_number,
            email: domain.email,
            enrollment_date: domain.enrollment_date,
            grade_id: domain.grade_id,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
