use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use scholaris_core::academics::{
    AcademicRecord, AcademicRecordFilter, AcademicRecordRepositoryTrait, AcademicRecordUpdate,
    NewAcademicRecord,
};
use scholaris_core::errors::{Error, Result};
use scholaris_core::paging::Page;

use super::model::{AcademicRecordChangeset, AcademicRecordDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{academic_records, students};
use crate::tenancy::require_student_in_school;

/// Repository for managing academic records in the database.
///
/// Like attendance, academic rows are scoped through the students table.
pub struct AcademicRecordRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AcademicRecordRepository {
    /// Creates a new AcademicRecordRepository instance.
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AcademicRecordRepositoryTrait for AcademicRecordRepository {
    async fn create(
        &self,
        school_id: &str,
        new_record: NewAcademicRecord,
    ) -> Result<AcademicRecord> {
        let school_id = school_id.to_string();
        let mut record_db: AcademicRecordDB = new_record.into();
        record_db.id = Uuid::new_v4().to_string();

        self.writer
            .exec(move |conn| {
                require_student_in_school(conn, &record_db.student_id, &school_id)?;

                diesel::insert_into(academic_records::table)
                    .values(&record_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(record_db.into())
            })
            .await
    }

    async fn update(
        &self,
        school_id: &str,
        record_id: &str,
        update: AcademicRecordUpdate,
    ) -> Result<AcademicRecord> {
        let school_id = school_id.to_string();
        let record_id = record_id.to_string();

        self.writer
            .exec(move |conn| {
                let exists: i64 = academic_records::table
                    .find(&record_id)
                    .filter(
                        academic_records::student_id.eq_any(
                            students::table
                                .filter(students::school_id.eq(&school_id))
                                .select(students::id),
                        ),
                    )
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if exists == 0 {
                    return Err(Error::NotFound(format!(
                        "Academic record with id {} not found",
                        record_id
                    )));
                }

                let changeset = AcademicRecordChangeset::from(update);
                diesel::update(academic_records::table.find(&record_id))
                    .set(&changeset)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let reloaded = academic_records::table
                    .find(&record_id)
                    .select(AcademicRecordDB::as_select())
                    .first::<AcademicRecordDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(reloaded.into())
            })
            .await
    }

    async fn delete(&self, school_id: &str, record_id: &str) -> Result<usize> {
        let school_id = school_id.to_string();
        let record_id = record_id.to_string();

        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(
                    academic_records::table.find(&record_id).filter(
                        academic_records::student_id.eq_any(
                            students::table
                                .filter(students::school_id.eq(&school_id))
                                .select(students::id),
                        ),
                    ),
                )
                .execute(conn)
                .map_err(StorageError::from)?;

                if affected == 0 {
                    return Err(Error::NotFound(format!(
                        "Academic record with id {} not found",
                        record_id
                    )));
                }
                Ok(affected)
            })
            .await
    }

    fn get_by_id(&self, school_id: &str, record_id: &str) -> Result<AcademicRecord> {
        let mut conn = get_connection(&self.pool)?;

        let record = academic_records::table
            .find(record_id)
            .filter(
                academic_records::student_id.eq_any(
                    students::table
                        .filter(students::school_id.eq(school_id))
                        .select(students::id),
                ),
            )
            .select(AcademicRecordDB::as_select())
            .first::<AcademicRecordDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| {
                Error::NotFound(format!("Academic record with id {} not found", record_id))
            })?;

        Ok(record.into())
    }

    fn list(
        &self,
        school_id: &str,
        filter: AcademicRecordFilter,
        page: Page,
    ) -> Result<Vec<AcademicRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = academic_records::table
            .filter(
                academic_records::student_id.eq_any(
                    students::table
                        .filter(students::school_id.eq(school_id))
                        .select(students::id),
                ),
            )
            .into_boxed();
        if let Some(student_id) = filter.student_id {
            query = query.filter(academic_records::student_id.eq(student_id));
        }
        if let Some(year) = filter.year {
            query = query.filter(academic_records::year.eq(year));
        }
        if let Some(term) = filter.term {
            query = query.filter(academic_records::term.eq(term));
        }

        let results = query
            .select(AcademicRecordDB::as_select())
            .order((
                academic_records::created_at.asc(),
                academic_records::id.asc(),
            ))
            .limit(page.limit)
            .offset(page.offset)
            .load::<AcademicRecordDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(AcademicRecord::from).collect())
    }
}
