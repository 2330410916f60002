//! Database model for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use scholaris_core::users::{NewUser, User, UserUpdate};

/// Database model for users.
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
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
    pub school_id: String,
    pub last_login: Option<NaiveDateTime>,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            created_at: db.created_at,
            updated_at: db.updated_at,
            email: db.email,
            password: db.password,
            first_name: db.first_name,
            last_name: db.last_name,
            is_admin: db.is_admin,
            school_id: db.school_id,
            last_login: db.last_login,
        }
    }
}

impl UserDB {
    /// Builds the row for a new user in the given school.
    pub fn from_new(school_id: &str, domain: NewUser) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(), // assigned by the repository
            created_at: now,
            updated_at: now,
            email: domain.email,
            password: domain.password,
            first_name: domain.first_name,
            last_name: domain.last_name,
            is_admin: domain.is_admin,
            school_id: school_id.to_string(),
            last_login: None,
        }
    }
}

/// Partial changeset for users; `None` fields are left untouched.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct UserChangeset {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_admin: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl From<UserUpdate> for UserChangeset {
    fn from(domain: UserUpdate) -> Self {
        Self {
            email: domain.email,
            password: domain.password,
            first_name: domain.first_name,
            last_name: domain.last_name,
            is_admin: domain.is_admin,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
