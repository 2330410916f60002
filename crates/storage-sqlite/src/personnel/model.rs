//! Database models for teachers and staff.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use scholaris_core::personnel::{NewStaff, NewTeacher, Staff, StaffUpdate, Teacher, TeacherUpdate};

/// Database model for teachers.
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
#[diesel(table_name = crate::schema::teachers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TeacherDB {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub subject: Option<String>,
    pub school_id: String,
}

impl From<TeacherDB> for Teacher {
    fn from(db: TeacherDB) -> Self {
        Self {
            id: db.id,
            created_at: db.created_at,
            updated_at: db.updated_at,
            first_name: db.first_name,
            last_name: db.last_name,
            email: db.email,
            phone_number: db.phone_number,
            subject: db.subject,
            school_id: db.school_id,
        }
    }
}

impl TeacherDB {
    pub fn from_new(school_id: &str, domain: NewTeacher) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(), // assigned by the repository
            created_at: now,
            updated_at: now,
            first_name: domain.first_name,
            last_name: domain.last_name,
            email: domain.email,
            phone_number: domain.phone_number,
            subject: domain.subject,
            school_id: school_id.to_string(),
        }
    }
}

/// Partial changeset for teachers; `None` fields are left untouched.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::teachers)]
pub struct TeacherChangeset {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub subject: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<TeacherUpdate> for TeacherChangeset {
    fn from(domain: TeacherUpdate) -> Self {
        Self {
            first_name: domain.first_name,
            last_name: domain.last_name,
            email: domain.email,
            phone_number: domain.phone_number,
            subject: domain.subject,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Database model for staff.
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
#[diesel(table_name = crate::schema::staff)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StaffDB {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub position: String,
    pub school_id: String,
}

impl From<StaffDB> for Staff {
    fn from(db: StaffDB) -> Self {
        Self {
            id: db.id,
            created_at: db.created_at,
            updated_at: db.updated_at,
            first_name: db.first_name,
            last_name: db.last_name,
            email: db.email,
            phone_number: db.phone_number,
            position: db.position,
            school_id: db.school_id,
        }
    }
}

impl StaffDB {
    pub fn from_new(school_id: &str, domain: NewStaff) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(), // assigned by the repository
            created_at: now,
            updated_at: now,
            first_name: domain.first_name,
            last_name: domain.last_name,
            email: domain.email,
            phone_number: domain.phone_number,
            position: domain.position,
            school_id: school_id.to_string(),
        }
    }
}

/// Partial changeset for staff; `None` fields are left untouched.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::staff)]
pub struct StaffChangeset {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub position: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<StaffUpdate> for StaffChangeset {
    fn from(domain: StaffUpdate) -> Self {
        Self {
            first_name: domain.first_name,
            last_name: domain.last_name,
            email: domain.email,
            phone_number: domain.phone_number,
            position: domain.position,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
