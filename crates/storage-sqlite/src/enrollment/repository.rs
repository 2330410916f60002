use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use scholaris_core::enrollment::{
    Grade, GradeFilter, GradeRepositoryTrait, GradeUpdate, NewGrade, NewStudent, Student,
    StudentFilter, StudentRepositoryTrait, StudentUpdate,
};
use scholaris_core::errors::{Error, Result};
use scholaris_core::paging::Page;

use super::model::{GradeChangeset, GradeDB, StudentChangeset, StudentDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{academic_records, attendance_records, fees, grades, students};
use crate::tenancy::{require_grade_in_school, require_school, require_teacher_in_school};

/// Repository for managing grade data in the database.
pub struct GradeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GradeRepository {
    /// Creates a new GradeRepository instance.
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl GradeRepositoryTrait for GradeRepository {
    async fn create(&self, school_id: &str, new_grade: NewGrade) -> Result<Grade> {
        let mut grade_db = GradeDB::from_new(school_id, new_grade);
        grade_db.id = Uuid::new_v4().to_string();

        self.writer
            .exec(move |conn| {
                require_school(conn, &grade_db.school_id)?;
                require_teacher_in_school(conn, &grade_db.teacher_id, &grade_db.school_id)?;

                diesel::insert_into(grades::table)
                    .values(&grade_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(grade_db.into())
            })
            .await
    }

    async fn update(&self, school_id: &str, grade_id: &str, update: GradeUpdate) -> Result<Grade> {
        let school_id = school_id.to_string();
        let grade_id = grade_id.to_string();

        self.writer
            .exec(move |conn| {
                let exists: i64 = grades::table
                    .find(&grade_id)
                    .filter(grades::school_id.eq(&school_id))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if exists == 0 {
                    return Err(Error::NotFound(format!(
                        "Grade with id {} not found",
                        grade_id
                    )));
                }

                if let Some(ref new_teacher_id) = update.teacher_id {
                    require_teacher_in_school(conn, new_teacher_id, &school_id)?;
                }

                let changeset = GradeChangeset::from(update);
                diesel::update(grades::table.find(&grade_id))
                    .set(&changeset)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let reloaded = grades::table
                    .find(&grade_id)
                    .select(GradeDB::as_select())
                    .first::<GradeDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(reloaded.into())
            })
            .await
    }

    async fn delete(&self, school_id: &str, grade_id: &str) -> Result<usize> {
        let school_id = school_id.to_string();
        let grade_id = grade_id.to_string();

        self.writer
            .exec(move |conn| {
                let exists: i64 = grades::table
                    .find(&grade_id)
                    .filter(grades::school_id.eq(&school_id))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if exists == 0 {
                    return Err(Error::NotFound(format!(
                        "Grade with id {} not found",
                        grade_id
                    )));
                }

                let enrolled: i64 = students::table
                    .filter(students::grade_id.eq(&grade_id))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if enrolled > 0 {
                    return Err(Error::Conflict(format!(
                        "Grade {} still has {} enrolled student(s); move them first",
                        grade_id, enrolled
                    )));
                }

                let affected = diesel::delete(grades::table.find(&grade_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }

    fn get_by_id(&self, school_id: &str, grade_id: &str) -> Result<Grade> {
        let mut conn = get_connection(&self.pool)?;

        let grade = grades::table
            .find(grade_id)
            .filter(grades::school_id.eq(school_id))
            .select(GradeDB::as_select())
            .first::<GradeDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::NotFound(format!("Grade with id {} not found", grade_id)))?;

        Ok(grade.into())
    }

    fn list(&self, school_id: &str, filter: GradeFilter, page: Page) -> Result<Vec<Grade>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = grades::table
            .filter(grades::school_id.eq(school_id))
            .into_boxed();
        if let Some(teacher_id) = filter.teacher_id {
            query = query.filter(grades::teacher_id.eq(teacher_id));
        }
        if let Some(level) = filter.level {
            query = query.filter(grades::level.eq(level));
        }

        let results = query
            .select(GradeDB::as_select())
            .order((grades::created_at.asc(), grades::id.asc()))
            .limit(page.limit)
            .offset(page.offset)
            .load::<GradeDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Grade::from).collect())
    }
}

/// Repository for managing student data in the database.
pub struct StudentRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl StudentRepository {
    /// Creates a new StudentRepository instance.
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl StudentRepositoryTrait for StudentRepository {
    async fn create(&self, school_id: &str, new_student: NewStudent) -> Result<Student> {
        let mut student_db = StudentDB::from_new(school_id, new_student);
        student_db.id = Uuid::new_v4().to_string();

        self.writer
            .exec(move |conn| {
                require_school(conn, &student_db.school_id)?;
                require_grade_in_school(conn, &student_db.grade_id, &student_db.school_id)?;

                if let Some(ref email) = student_db.email {
                    let duplicate: i64 = students::table
                        .filter(students::email.eq(email))
                        .count()
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    if duplicate > 0 {
                        return Err(Error::Conflict(format!(
                            "Student email '{}' is already in use",
                            email
                        )));
                    }
                }

                diesel::insert_into(students::table)
                    .values(&student_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(student_db.into())
            })
            .await
    }

    async fn update(
        &self,
        school_id: &str,
        student_id: &str,
        update: StudentUpdate,
    ) -> Result<Student> {
        let school_id = school_id.to_string();
        let student_id = student_id.to_string();

        self.writer
            .exec(move |conn| {
                let existing = students::table
                    .find(&student_id)
                    .filter(students::school_id.eq(&school_id))
                    .select(StudentDB::as_select())
                    .first::<StudentDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        Error::NotFound(format!("Student with id {} not found", student_id))
                    })?;

                if let Some(ref new_email) = update.email {
                    if existing.email.as_deref() != Some(new_email.as_str()) {
                        let duplicate: i64 = students::table
                            .filter(students::email.eq(new_email))
                            .filter(students::id.ne(&student_id))
                            .count()
                            .get_result(conn)
                            .map_err(StorageError::from)?;
                        if duplicate > 0 {
                            return Err(Error::Conflict(format!(
                                "Student email '{}' is already in use",
                                new_email
                            )));
                        }
                    }
                }

                if let Some(ref new_grade_id) = update.grade_id {
                    require_grade_in_school(conn, new_grade_id, &school_id)?;
                }

                let changeset = StudentChangeset::from(update);
                diesel::update(students::table.find(&student_id))
                    .set(&changeset)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let reloaded = students::table
                    .find(&student_id)
                    .select(StudentDB::as_select())
                    .first::<StudentDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(reloaded.into())
            })
            .await
    }

    async fn delete(&self, school_id: &str, student_id: &str, cascade: bool) -> Result<usize> {
        let school_id = school_id.to_string();
        let student_id = student_id.to_string();

        self.writer
            .exec(move |conn| {
                let exists: i64 = students::table
                    .find(&student_id)
                    .filter(students::school_id.eq(&school_id))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if exists == 0 {
                    return Err(Error::NotFound(format!(
                        "Student with id {} not found",
                        student_id
                    )));
                }

                let mut dependents: i64 = 0;
                dependents += fees::table
                    .filter(fees::student_id.eq(&student_id))
                    .count()
                    .get_result::<i64>(conn)
                    .map_err(StorageError::from)?;
                dependents += attendance_records::table
                    .filter(attendance_records::student_id.eq(&student_id))
                    .count()
                    .get_result::<i64>(conn)
                    .map_err(StorageError::from)?;
                dependents += academic_records::table
                    .filter(academic_records::student_id.eq(&student_id))
                    .count()
                    .get_result::<i64>(conn)
                    .map_err(StorageError::from)?;

                if dependents > 0 && !cascade {
                    return Err(Error::Conflict(format!(
                        "Student {} still has {} dependent record(s); request cascade to delete them",
                        student_id, dependents
                    )));
                }

                let mut affected = 0usize;
                if cascade {
                    affected += diesel::delete(
                        attendance_records::table
                            .filter(attendance_records::student_id.eq(&student_id)),
                    )
                    .execute(conn)
                    .map_err(StorageError::from)?;
                    affected += diesel::delete(
                        academic_records::table
                            .filter(academic_records::student_id.eq(&student_id)),
                    )
                    .execute(conn)
                    .map_err(StorageError::from)?;
                    affected +=
                        diesel::delete(fees::table.filter(fees::student_id.eq(&student_id)))
                            .execute(conn)
                            .map_err(StorageError::from)?;
                }

                affected += diesel::delete(students::table.find(&student_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }

    fn get_by_id(&self, school_id: &str, student_id: &str) -> Result<Student> {
        let mut conn = get_connection(&self.pool)?;

        let student = students::table
            .find(student_id)
            .filter(students::school_id.eq(school_id))
            .select(StudentDB::as_select())
            .first::<StudentDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::NotFound(format!("Student with id {} not found", student_id)))?;

        Ok(student.into())
    }

    fn list(&self, school_id: &str, filter: StudentFilter, page: Page) -> Result<Vec<Student>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = students::table
            .filter(students::school_id.eq(school_id))
            .into_boxed();
        if let Some(grade_id) = filter.grade_id {
            query = query.filter(students::grade_id.eq(grade_id));
        }

        let results = query
            .select(StudentDB::as_select())
            .order((students::created_at.asc(), students::id.asc()))
            .limit(page.limit)
            .offset(page.offset)
            .load::<StudentDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Student::from).collect())
    }
}
