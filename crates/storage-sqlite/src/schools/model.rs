//! Database models for schools and school stats.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use scholaris_core::errors::Result;
use scholaris_core::schools::{
    NewSchool, School, SchoolStats, SchoolStatsUpdate, SchoolType, SchoolUpdate,
};

/// Database model for schools.
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
#[diesel(table_name = crate::schema::schools)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SchoolDB {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub name: String,
    pub contact_person: String,
    pub code: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub image: Option<String>,
    pub email: String,
    pub website_url: Option<String>,
    pub school_type: String,
}

impl SchoolDB {
    /// Converts to the domain model, parsing the stored school type.
    pub fn into_domain(self) -> Result<School> {
        let school_type = SchoolType::from_db_str(&self.school_type)?;
        Ok(School {
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            name: self.name,
            contact_person: self.contact_person,
            code: self.code,
            address: self.address,
            phone_number: self.phone_number,
            image: self.image,
            email: self.email,
            website_url: self.website_url,
            school_type,
        })
    }
}

impl From<NewSchool> for SchoolDB {
    fn from(domain: NewSchool) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(), // assigned by the repository
            created_at: now,
            updated_at: now,
            name: domain.name,
            contact_person: domain.contact_person,
            code: domain.code,
            address: domain.address,
            phone_number: domain.phone_number,
            image: domain.image,
            email: domain.email,
            website_url: domain.website_url,
            school_type: domain.school_type.as_db_str().to_string(),
        }
    }
}

/// Partial changeset for schools; `None` fields are left untouched.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::schools)]
pub struct SchoolChangeset {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub code: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub image: Option<String>,
    pub email: Option<String>,
    pub website_url: Option<String>,
    pub school_type: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<SchoolUpdate> for SchoolChangeset {
    fn from(domain: SchoolUpdate) -> Self {
        Self {
            name: domain.name,
            contact_person: domain.contact_person,
            code: domain.code,
            address: domain.address,
            phone_number: domain.phone_number,
            image: domain.image,
            email: domain.email,
            website_url: domain.website_url,
            school_type: domain.school_type.map(|t| t.as_db_str().to_string()),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Database model for a school's stats snapshot.
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
#[diesel(table_name = crate::schema::school_stats)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SchoolStatsDB {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub total_students: i32,
    pub total_teachers: i32,
    pub total_staff: i32,
    pub total_fees_paid: f64,
    pub total_fees_outstanding: f64,
    pub average_attendance: f64,
    pub school_id: String,
}

impl SchoolStatsDB {
    /// Zeroed snapshot, inserted in the same transaction as its school.
    pub fn zeroed(school_id: &str) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            total_students: 0,
            total_teachers: 0,
            total_staff: 0,
            total_fees_paid: 0.0,
            total_fees_outstanding: 0.0,
            average_attendance: 0.0,
            school_id: school_id.to_string(),
        }
    }
}

impl From<SchoolStatsDB> for SchoolStats {
    fn from(db: SchoolStatsDB) -> Self {
        Self {
            id: db.id,
            created_at: db.created_at,
            updated_at: db.updated_at,
            total_students: db.total_students,
            total_teachers: db.total_teachers,
            total_staff: db.total_staff,
            total_fees_paid: db.total_fees_paid,
            total_fees_outstanding: db.total_fees_outstanding,
            average_attendance: db.average_attendance,
            school_id: db.school_id,
        }
    }
}

/// Partial changeset for the stats snapshot.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::school_stats)]
pub struct SchoolStatsChangeset {
    pub total_students: Option<i32>,
    pub total_teachers: Option<i32>,
    pub total_staff: Option<i32>,
    pub total_fees_paid: Option<f64>,
    pub total_fees_outstanding: Option<f64>,
    pub average_attendance: Option<f64>,
    pub updated_at: NaiveDateTime,
}

impl From<SchoolStatsUpdate> for SchoolStatsChangeset {
    fn from(domain: SchoolStatsUpdate) -> Self {
        Self {
            total_students: domain.total_students,
            total_teachers: domain.total_teachers,
            total_staff: domain.total_staff,
            total_fees_paid: domain.total_fees_paid,
            total_fees_outstanding: domain.total_fees_outstanding,
            average_attendance: domain.average_attendance,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
