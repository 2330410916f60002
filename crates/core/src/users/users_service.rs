use log::debug;
use std::sync::Arc;

use super::users_model::{NewUser, User, UserFilter, UserUpdate};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::Result;
use crate::paging::Page;

/// Service for managing a school's users.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    /// Creates a new UserService instance.
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    async fn create_user(&self, school_id: &str, new_user: NewUser) -> Result<User> {
        debug!("Creating user {} in school {}", new_user.email, school_id);
        new_user.validate()?;
        self.repository.create(school_id, new_user).await
    }

    async fn update_user(
        &self,
        school_id: &str,
        user_id: &str,
        update: UserUpdate,
    ) -> Result<User> {
        update.validate()?;
        self.repository.update(school_id, user_id, update).await
    }

    async fn delete_user(&self, school_id: &str, user_id: &str) -> Result<usize> {
        self.repository.delete(school_id, user_id).await
    }

    async fn record_login(&self, school_id: &str, user_id: &str) -> Result<User> {
        self.repository.record_login(school_id, user_id).await
    }

    fn get_user(&self, school_id: &str, user_id: &str) -> Result<User> {
        self.repository.get_by_id(school_id, user_id)
    }

    fn list_users(&self, school_id: &str, filter: UserFilter, page: Page) -> Result<Vec<User>> {
        self.repository.list(school_id, filter, page.normalized())
    }
}
