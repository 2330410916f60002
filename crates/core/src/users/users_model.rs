//! User domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::utils::{require_text, validate_email};

/// Domain model representing an application user of a school.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Globally unique login email.
    pub email: String,
    /// Password hash as provided by the caller; the store does no hashing.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
    pub school_id: String,
    pub last_login: Option<NaiveDateTime>,
}

/// Input model for creating a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl NewUser {
    /// Validates the new user data.
    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)?;
        require_text("password", &self.password)?;
        require_text("firstName", &self.first_name)?;
        require_text("lastName", &self.last_name)?;
        Ok(())
    }
}

/// Partial update for a user. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_admin: Option<bool>,
}

impl UserUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref email) = self.email {
            validate_email(email)?;
        }
        if let Some(ref password) = self.password {
            require_text("password", password)?;
        }
        Ok(())
    }
}

/// Filter for listing a school's users.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    pub is_admin: Option<bool>,
}
