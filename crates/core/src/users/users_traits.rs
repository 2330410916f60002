//! User repository and service traits.

use async_trait::async_trait;

use super::users_model::{NewUser, User, UserFilter, UserUpdate};
use crate::errors::Result;
use crate::paging::Page;

/// Trait defining the contract for User repository operations.
///
/// All operations are scoped to a school: a user belonging to another
/// school is indistinguishable from a missing one.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn create(&self, school_id: &str, new_user: NewUser) -> Result<User>;

    async fn update(&self, school_id: &str, user_id: &str, update: UserUpdate) -> Result<User>;

    /// Deletes a user. Returns the number of deleted records.
    async fn delete(&self, school_id: &str, user_id: &str) -> Result<usize>;

    /// Stamps the user's `lastLogin` with the current time.
    async fn record_login(&self, school_id: &str, user_id: &str) -> Result<User>;

    fn get_by_id(&self, school_id: &str, user_id: &str) -> Result<User>;

    fn list(&self, school_id: &str, filter: UserFilter, page: Page) -> Result<Vec<User>>;
}

/// Trait defining the contract for User service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create_user(&self, school_id: &str, new_user: NewUser) -> Result<User>;

    async fn update_user(&self, school_id: &str, user_id: &str, update: UserUpdate)
        -> Result<User>;

    async fn delete_user(&self, school_id: &str, user_id: &str) -> Result<usize>;

    async fn record_login(&self, school_id: &str, user_id: &str) -> Result<User>;

    fn get_user(&self, school_id: &str, user_id: &str) -> Result<User>;

    fn list_users(&self, school_id: &str, filter: UserFilter, page: Page) -> Result<Vec<User>>;
}
