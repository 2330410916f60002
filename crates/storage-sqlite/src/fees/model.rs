//! Database model for fees.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use scholaris_core::fees::{Fee, FeeUpdate, NewFee};

/// Database model for fees.
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
#[diesel(table_name = crate::schema::fees)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FeeDB {
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

impl From<FeeDB> for Fee {
    fn from(db: FeeDB) -> Self {
        Self {
            id: db.id,
            created_at: db.created_at,
            updated_at: db.updated_at,
            amount: db.amount,
            due_date: db.due_date,
            is_paid: db.is_paid,
            description: db.description,
            student_id: db.student_id,
            school_id: db.school_id,
        }
    }
}

impl FeeDB {
    pub fn from_new(school_id: &str, domain: NewFee) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(), // assigned by the repository
            created_at: now,
            updated_at: now,
            amount: domain.amount,
            due_date: domain.due_date,
            is_paid: domain.is_paid,
            description: domain.description,
            student_id: domain.student_id,
            school_id: school_id.to_string(),
        }
    }
}

/// Partial changeset for fees; `None` fields are left untouched.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::fees)]
pub struct FeeChangeset {
    pub amount: Option<f64>,
    pub due_date: Option<NaiveDateTime>,
    pub is_paid: Option<bool>,
    pub description: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<FeeUpdate> for FeeChangeset {
    fn from(domain: FeeUpdate) -> Self {
        Self {
            amount: domain.amount,
            due_date: domain.due_date,
            is_paid: domain.is_paid,
            description: domain.description,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
