use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use scholaris_core::errors::{Error, Result};
use scholaris_core::paging::Page;
use scholaris_core::users::{NewUser, User, UserFilter, UserRepositoryTrait, UserUpdate};

use super::model::{UserChangeset, UserDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;
use crate::tenancy::require_school;

/// Repository for managing user data in the database.
pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    /// Creates a new UserRepository instance.
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create(&self, school_id: &str, new_user: NewUser) -> Result<User> {
        let mut user_db = UserDB::from_new(school_id, new_user);
        user_db.id = Uuid::new_v4().to_string();

        self.writer
            .exec(move |conn| {
                require_school(conn, &user_db.school_id)?;

                let duplicate: i64 = users::table
                    .filter(users::email.eq(&user_db.email))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if duplicate > 0 {
                    return Err(Error::Conflict(format!(
                        "User email '{}' is already in use",
                        user_db.email
                    )));
                }

                diesel::insert_into(users::table)
                    .values(&user_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(user_db.into())
            })
            .await
    }

    async fn update(&self, school_id: &str, user_id: &str, update: UserUpdate) -> Result<User> {
        let school_id = school_id.to_string();
        let user_id = user_id.to_string();

        self.writer
            .exec(move |conn| {
                let existing = users::table
                    .find(&user_id)
                    .filter(users::school_id.eq(&school_id))
                    .select(UserDB::as_select())
                    .first::<UserDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        Error::NotFound(format!("User with id {} not found", user_id))
                    })?;

                if let Some(ref new_email) = update.email {
                    if *new_email != existing.email {
                        let duplicate: i64 = users::table
                            .filter(users::email.eq(new_email))
                            .filter(users::id.ne(&user_id))
                            .count()
                            .get_result(conn)
                            .map_err(StorageError::from)?;
                        if duplicate > 0 {
                            return Err(Error::Conflict(format!(
                                "User email '{}' is already in use",
                                new_email
                            )));
                        }
                    }
                }

                let changeset = UserChangeset::from(update);
                diesel::update(users::table.find(&user_id))
                    .set(&changeset)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let reloaded = users::table
                    .find(&user_id)
                    .select(UserDB::as_select())
                    .first::<UserDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(reloaded.into())
            })
            .await
    }

    async fn delete(&self, school_id: &str, user_id: &str) -> Result<usize> {
        let school_id = school_id.to_string();
        let user_id = user_id.to_string();

        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(
                    users::table
                        .find(&user_id)
                        .filter(users::school_id.eq(&school_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;

                if affected == 0 {
                    return Err(Error::NotFound(format!(
                        "User with id {} not found",
                        user_id
                    )));
                }
                Ok(affected)
            })
            .await
    }

    async fn record_login(&self, school_id: &str, user_id: &str) -> Result<User> {
        let school_id = school_id.to_string();
        let user_id = user_id.to_string();

        self.writer
            .exec(move |conn| {
                let now = chrono::Utc::now().naive_utc();
                let affected = diesel::update(
                    users::table
                        .find(&user_id)
                        .filter(users::school_id.eq(&school_id)),
                )
                .set((users::last_login.eq(Some(now)), users::updated_at.eq(now)))
                .execute(conn)
                .map_err(StorageError::from)?;

                if affected == 0 {
                    return Err(Error::NotFound(format!(
                        "User with id {} not found",
                        user_id
                    )));
                }

                let reloaded = users::table
                    .find(&user_id)
                    .select(UserDB::as_select())
                    .first::<UserDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(reloaded.into())
            })
            .await
    }

    fn get_by_id(&self, school_id: &str, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;

        let user = users::table
            .find(user_id)
            .filter(users::school_id.eq(school_id))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::NotFound(format!("User with id {} not found", user_id)))?;

        Ok(user.into())
    }

    fn list(&self, school_id: &str, filter: UserFilter, page: Page) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = users::table
            .filter(users::school_id.eq(school_id))
            .into_boxed();
        if let Some(is_admin) = filter.is_admin {
            query = query.filter(users::is_admin.eq(is_admin));
        }

        let results = query
            .select(UserDB::as_select())
            .order((users::created_at.asc(), users::id.asc()))
            .limit(page.limit)
            .offset(page.offset)
            .load::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(User::from).collect())
    }
}
