use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use scholaris_core::errors::{Error, Result};
use scholaris_core::paging::Page;
use scholaris_core::personnel::{
    NewStaff, NewTeacher, Staff, StaffFilter, StaffRepositoryTrait, StaffUpdate, Teacher,
    TeacherFilter, TeacherRepositoryTrait, TeacherUpdate,
};

use super::model::{StaffChangeset, StaffDB, TeacherChangeset, TeacherDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{attendance_records, grades, staff, teachers};
use crate::tenancy::require_school;

/// Repository for managing teacher data in the database.
pub struct TeacherRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TeacherRepository {
    /// Creates a new TeacherRepository instance.
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl TeacherRepositoryTrait for TeacherRepository {
    async fn create(&self, school_id: &str, new_teacher: NewTeacher) -> Result<Teacher> {
        let mut teacher_db = TeacherDB::from_new(school_id, new_teacher);
        teacher_db.id = Uuid::new_v4().to_string();

        self.writer
            .exec(move |conn| {
                require_school(conn, &teacher_db.school_id)?;

                let duplicate: i64 = teachers::table
                    .filter(teachers::email.eq(&teacher_db.email))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if duplicate > 0 {
                    return Err(Error::Conflict(format!(
                        "Teacher email '{}' is already in use",
                        teacher_db.email
                    )));
                }

                diesel::insert_into(teachers::table)
                    .values(&teacher_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(teacher_db.into())
            })
            .await
    }

    async fn update(
        &self,
        school_id: &str,
        teacher_id: &str,
        update: TeacherUpdate,
    ) -> Result<Teacher> {
        let school_id = school_id.to_string();
        let teacher_id = teacher_id.to_string();

        self.writer
            .exec(move |conn| {
                let existing = teachers::table
                    .find(&teacher_id)
                    .filter(teachers::school_id.eq(&school_id))
                    .select(TeacherDB::as_select())
                    .first::<TeacherDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        Error::NotFound(format!("Teacher with id {} not found", teacher_id))
                    })?;

                if let Some(ref new_email) = update.email {
                    if *new_email != existing.email {
                        let duplicate: i64 = teachers::table
                            .filter(teachers::email.eq(new_email))
                            .filter(teachers::id.ne(&teacher_id))
                            .count()
                            .get_result(conn)
                            .map_err(StorageError::from)?;
                        if duplicate > 0 {
                            return Err(Error::Conflict(format!(
                                "Teacher email '{}' is already in use",
                                new_email
                            )));
                        }
                    }
                }

                let changeset = TeacherChangeset::from(update);
                diesel::update(teachers::table.find(&teacher_id))
                    .set(&changeset)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let reloaded = teachers::table
                    .find(&teacher_id)
                    .select(TeacherDB::as_select())
                    .first::<TeacherDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(reloaded.into())
            })
            .await
    }

    async fn delete(&self, school_id: &str, teacher_id: &str, cascade: bool) -> Result<usize> {
        let school_id = school_id.to_string();
        let teacher_id = teacher_id.to_string();

        self.writer
            .exec(move |conn| {
                let exists: i64 = teachers::table
                    .find(&teacher_id)
                    .filter(teachers::school_id.eq(&school_id))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if exists == 0 {
                    return Err(Error::NotFound(format!(
                        "Teacher with id {} not found",
                        teacher_id
                    )));
                }

                // Homeroom assignments always block the delete; a grade
                // cannot exist without a teacher.
                let homerooms: i64 = grades::table
                    .filter(grades::teacher_id.eq(&teacher_id))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if homerooms > 0 {
                    return Err(Error::Conflict(format!(
                        "Teacher {} is still homeroom teacher of {} grade(s); reassign them first",
                        teacher_id, homerooms
                    )));
                }

                let recorded: i64 = attendance_records::table
                    .filter(attendance_records::teacher_id.eq(&teacher_id))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if recorded > 0 && !cascade {
                    return Err(Error::Conflict(format!(
                        "Teacher {} recorded {} attendance record(s); request cascade to delete them",
                        teacher_id, recorded
                    )));
                }

                let mut affected = 0usize;
                if cascade {
                    affected += diesel::delete(
                        attendance_records::table
                            .filter(attendance_records::teacher_id.eq(&teacher_id)),
                    )
                    .execute(conn)
                    .map_err(StorageError::from)?;
                }

                affected += diesel::delete(teachers::table.find(&teacher_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }

    fn get_by_id(&self, school_id: &str, teacher_id: &str) -> Result<Teacher> {
        let mut conn = get_connection(&self.pool)?;

        let teacher = teachers::table
            .find(teacher_id)
            .filter(teachers::school_id.eq(school_id))
            .select(TeacherDB::as_select())
            .first::<TeacherDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::NotFound(format!("Teacher with id {} not found", teacher_id)))?;

        Ok(teacher.into())
    }

    fn list(&self, school_id: &str, filter: TeacherFilter, page: Page) -> Result<Vec<Teacher>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = teachers::table
            .filter(teachers::school_id.eq(school_id))
            .into_boxed();
        if let Some(subject) = filter.subject {
            query = query.filter(teachers::subject.eq(subject));
        }

        let results = query
            .select(TeacherDB::as_select())
            .order((teachers::created_at.asc(), teachers::id.asc()))
            .limit(page.limit)
            .offset(page.offset)
            .load::<TeacherDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Teacher::from).collect())
    }
}

/// Repository for managing staff data in the database.
pub struct StaffRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl StaffRepository {
    /// Creates a new StaffRepository instance.
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl StaffRepositoryTrait for StaffRepository {
    async fn create(&self, school_id: &str, new_staff: NewStaff) -> Result<Staff> {
        let mut staff_db = StaffDB::from_new(school_id, new_staff);
        staff_db.id = Uuid::new_v4().to_string();

        self.writer
            .exec(move |conn| {
                require_school(conn, &staff_db.school_id)?;

                let duplicate: i64 = staff::table
                    .filter(staff::email.eq(&staff_db.email))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if duplicate > 0 {
                    return Err(Error::Conflict(format!(
                        "Staff email '{}' is already in use",
                        staff_db.email
                    )));
                }

                diesel::insert_into(staff::table)
                    .values(&staff_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(staff_db.into())
            })
            .await
    }

    async fn update(&self, school_id: &str, staff_id: &str, update: StaffUpdate) -> Result<Staff> {
        let school_id = school_id.to_string();
        let staff_id = staff_id.to_string();

        self.writer
            .exec(move |conn| {
                let existing = staff::table
                    .find(&staff_id)
                    .filter(staff::school_id.eq(&school_id))
                    .select(StaffDB::as_select())
                    .first::<StaffDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        Error::NotFound(format!("Staff with id {} not found", staff_id))
                    })?;

                if let Some(ref new_email) = update.email {
                    if *new_email != existing.email {
                        let duplicate: i64 = staff::table
                            .filter(staff::email.eq(new_email))
                            .filter(staff::id.ne(&staff_id))
                            .count()
                            .get_result(conn)
                            .map_err(StorageError::from)?;
                        if duplicate > 0 {
                            return Err(Error::Conflict(format!(
                                "Staff email '{}' is already in use",
                                new_email
                            )));
                        }
                    }
                }

                let changeset = StaffChangeset::from(update);
                diesel::update(staff::table.find(&staff_id))
                    .set(&changeset)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let reloaded = staff::table
                    .find(&staff_id)
                    .select(StaffDB::as_select())
                    .first::<StaffDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(reloaded.into())
            })
            .await
    }

    async fn delete(&self, school_id: &str, staff_id: &str) -> Result<usize> {
        let school_id = school_id.to_string();
        let staff_id = staff_id.to_string();

        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(
                    staff::table
                        .find(&staff_id)
                        .filter(staff::school_id.eq(&school_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;

                if affected == 0 {
                    return Err(Error::NotFound(format!(
                        "Staff with id {} not found",
                        staff_id
                    )));
                }
                Ok(affected)
            })
            .await
    }

    fn get_by_id(&self, school_id: &str, staff_id: &str) -> Result<Staff> {
        let mut conn = get_connection(&self.pool)?;

        let member = staff::table
            .find(staff_id)
            .filter(staff::school_id.eq(school_id))
            .select(StaffDB::as_select())
            .first::<StaffDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::NotFound(format!("Staff with id {} not found", staff_id)))?;

        Ok(member.into())
    }

    fn list(&self, school_id: &str, filter: StaffFilter, page: Page) -> Result<Vec<Staff>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = staff::table
            .filter(staff::school_id.eq(school_id))
            .into_boxed();
        if let Some(position) = filter.position {
            query = query.filter(staff::position.eq(position));
        }

        let results = query
            .select(StaffDB::as_select())
            .order((staff::created_at.asc(), staff::id.asc()))
            .limit(page.limit)
            .offset(page.offset)
            .load::<StaffDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Staff::from).collect())
    }
}
