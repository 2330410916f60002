use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use scholaris_core::errors::{Error, Result};
use scholaris_core::fees::{Fee, FeeFilter, FeeRepositoryTrait, FeeUpdate, NewFee};
use scholaris_core::paging::Page;

use super::model::{FeeChangeset, FeeDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::fees;
use crate::tenancy::require_student_in_school;

/// Repository for managing fee data in the database.
pub struct FeeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FeeRepository {
    /// Creates a new FeeRepository instance.
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl FeeRepositoryTrait for FeeRepository {
    async fn create(&self, school_id: &str, new_fee: NewFee) -> Result<Fee> {
        let mut fee_db = FeeDB::from_new(school_id, new_fee);
        fee_db.id = Uuid::new_v4().to_string();

        self.writer
            .exec(move |conn| {
                require_student_in_school(conn, &fee_db.student_id, &fee_db.school_id)?;

                diesel::insert_into(fees::table)
                    .values(&fee_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(fee_db.into())
            })
            .await
    }

    async fn update(&self, school_id: &str, fee_id: &str, update: FeeUpdate) -> Result<Fee> {
        let school_id = school_id.to_string();
        let fee_id = fee_id.to_string();

        self.writer
            .exec(move |conn| {
                let exists: i64 = fees::table
                    .find(&fee_id)
                    .filter(fees::school_id.eq(&school_id))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if exists == 0 {
                    return Err(Error::NotFound(format!("Fee with id {} not found", fee_id)));
                }

                let changeset = FeeChangeset::from(update);
                diesel::update(fees::table.find(&fee_id))
                    .set(&changeset)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let reloaded = fees::table
                    .find(&fee_id)
                    .select(FeeDB::as_select())
                    .first::<FeeDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(reloaded.into())
            })
            .await
    }

    async fn mark_paid(&self, school_id: &str, fee_id: &str) -> Result<Fee> {
        let school_id = school_id.to_string();
        let fee_id = fee_id.to_string();

        self.writer
            .exec(move |conn| {
                let affected = diesel::update(
                    fees::table
                        .find(&fee_id)
                        .filter(fees::school_id.eq(&school_id)),
                )
                .set((
                    fees::is_paid.eq(true),
                    fees::updated_at.eq(chrono::Utc::now().naive_utc()),
                ))
                .execute(conn)
                .map_err(StorageError::from)?;

                if affected == 0 {
                    return Err(Error::NotFound(format!("Fee with id {} not found", fee_id)));
                }

                let reloaded = fees::table
                    .find(&fee_id)
                    .select(FeeDB::as_select())
                    .first::<FeeDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(reloaded.into())
            })
            .await
    }

    async fn delete(&self, school_id: &str, fee_id: &str) -> Result<usize> {
        let school_id = school_id.to_string();
        let fee_id = fee_id.to_string();

        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(
                    fees::table
                        .find(&fee_id)
                        .filter(fees::school_id.eq(&school_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;

                if affected == 0 {
                    return Err(Error::NotFound(format!("Fee with id {} not found", fee_id)));
                }
                Ok(affected)
            })
            .await
    }

    fn get_by_id(&self, school_id: &str, fee_id: &str) -> Result<Fee> {
        let mut conn = get_connection(&self.pool)?;

        let fee = fees::table
            .find(fee_id)
            .filter(fees::school_id.eq(school_id))
            .select(FeeDB::as_select())
            .first::<FeeDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::NotFound(format!("Fee with id {} not found", fee_id)))?;

        Ok(fee.into())
    }

    fn list(&self, school_id: &str, filter: FeeFilter, page: Page) -> Result<Vec<Fee>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = fees::table
            .filter(fees::school_id.eq(school_id))
            .into_boxed();
        if let Some(student_id) = filter.student_id {
            query = query.filter(fees::student_id.eq(student_id));
        }
        if let Some(is_paid) = filter.is_paid {
            query = query.filter(fees::is_paid.eq(is_paid));
        }
        if let Some(due_before) = filter.due_before {
            query = query.filter(fees::due_date.lt(due_before));
        }

        let results = query
            .select(FeeDB::as_select())
            .order((fees::created_at.asc(), fees::id.asc()))
            .limit(page.limit)
            .offset(page.offset)
            .load::<FeeDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Fee::from).collect())
    }
}
