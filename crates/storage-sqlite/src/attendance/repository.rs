use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use scholaris_core::attendance::{
    AttendanceFilter, AttendanceRecord, AttendanceRepositoryTrait, AttendanceUpdate,
    NewAttendanceRecord,
};
use scholaris_core::errors::{Error, Result};
use scholaris_core::paging::Page;

use super::model::AttendanceRecordDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{attendance_records, students};
use crate::tenancy::{require_student_in_school, require_teacher_in_school};

/// Repository for managing attendance records in the database.
///
/// Attendance rows carry no school id of their own; every query scopes
/// through the students table instead.
pub struct AttendanceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AttendanceRepository {
    /// Creates a new AttendanceRepository instance.
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AttendanceRepositoryTrait for AttendanceRepository {
    async fn create(
        &self,
        school_id: &str,
        new_record: NewAttendanceRecord,
    ) -> Result<AttendanceRecord> {
        let school_id = school_id.to_string();
        let mut record_db: AttendanceRecordDB = new_record.into();
        record_db.id = Uuid::new_v4().to_string();

        self.writer
            .exec(move |conn| {
                require_student_in_school(conn, &record_db.student_id, &school_id)?;
                require_teacher_in_school(conn, &record_db.teacher_id, &school_id)?;

                // One attendance entry per student per day. The unique index
                // on (date, student_id) backs this check up.
                let duplicate: i64 = attendance_records::table
                    .filter(attendance_records::date.eq(record_db.date))
                    .filter(attendance_records::student_id.eq(&record_db.student_id))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if duplicate > 0 {
                    return Err(Error::Conflict(format!(
                        "Attendance for student {} on {} is already recorded",
                        record_db.student_id, record_db.date
                    )));
                }

                diesel::insert_into(attendance_records::table)
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
        update: AttendanceUpdate,
    ) -> Result<AttendanceRecord> {
        let school_id = school_id.to_string();
        let record_id = record_id.to_string();

        self.writer
            .exec(move |conn| {
                let exists: i64 = attendance_records::table
                    .find(&record_id)
                    .filter(
                        attendance_records::student_id.eq_any(
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
                        "Attendance record with id {} not found",
                        record_id
                    )));
                }

                if let Some(is_present) = update.is_present {
                    diesel::update(attendance_records::table.find(&record_id))
                        .set((
                            attendance_records::is_present.eq(is_present),
                            attendance_records::updated_at.eq(chrono::Utc::now().naive_utc()),
                        ))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                let reloaded = attendance_records::table
                    .find(&record_id)
                    .select(AttendanceRecordDB::as_select())
                    .first::<AttendanceRecordDB>(conn)
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
                    attendance_records::table.find(&record_id).filter(
                        attendance_records::student_id.eq_any(
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
                        "Attendance record with id {} not found",
                        record_id
                    )));
                }
                Ok(affected)
            })
            .await
    }

    fn get_by_id(&self, school_id: &str, record_id: &str) -> Result<AttendanceRecord> {
        let mut conn = get_connection(&self.pool)?;

        let record = attendance_records::table
            .find(record_id)
            .filter(
                attendance_records::student_id.eq_any(
                    students::table
                        .filter(students::school_id.eq(school_id))
                        .select(students::id),
                ),
            )
            .select(AttendanceRecordDB::as_select())
            .first::<AttendanceRecordDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| {
                Error::NotFound(format!("Attendance record with id {} not found", record_id))
            })?;

        Ok(record.into())
    }

    fn list(
        &self,
        school_id: &str,
        filter: AttendanceFilter,
        page: Page,
    ) -> Result<Vec<AttendanceRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = attendance_records::table
            .filter(
                attendance_records::student_id.eq_any(
                    students::table
                        .filter(students::school_id.eq(school_id))
                        .select(students::id),
                ),
            )
            .into_boxed();
        if let Some(student_id) = filter.student_id {
            query = query.filter(attendance_records::student_id.eq(student_id));
        }
        if let Some(teacher_id) = filter.teacher_id {
            query = query.filter(attendance_records::teacher_id.eq(teacher_id));
        }
        if let Some(date) = filter.date {
            query = query.filter(attendance_records::date.eq(date));
        }
        if let Some(is_present) = filter.is_present {
            query = query.filter(attendance_records::is_present.eq(is_present));
        }

        let results = query
            .select(AttendanceRecordDB::as_select())
            .order((
                attendance_records::created_at.asc(),
                attendance_records::id.asc(),
            ))
            .limit(page.limit)
            .offset(page.offset)
            .load::<AttendanceRecordDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(AttendanceRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, get_connection, run_migrations, spawn_writer};
    use chrono::NaiveDate;
    use diesel::RunQueryDsl;
    use tempfile::tempdir;

    /// Creates a test repository with a temp database.
    /// Returns the pool (for seeding parent rows) and the temp dir to keep
    /// it alive.
    fn create_test_repository() -> (AttendanceRepository, Arc<DbPool>, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");

        let writer = spawn_writer((*pool).clone());

        let repo = AttendanceRepository::new(Arc::clone(&pool), writer);
        (repo, pool, temp_dir)
    }

    /// Seeds a school with one teacher, one grade, and one student, all
    /// sharing the given suffix, to satisfy foreign key constraints.
    fn seed_school_with_student(pool: &Arc<DbPool>, suffix: &str) {
        let mut conn = get_connection(pool).expect("Failed to get connection");
        diesel::sql_query(format!(
            "INSERT INTO schools (id, created_at, updated_at, name, contact_person, code, email, school_type) \
             VALUES ('school-{s}', datetime('now'), datetime('now'), 'School {s}', 'Head', 'C{s}', 'school-{s}@x.com', 'BASIC_SCHOOL')",
            s = suffix
        ))
        .execute(&mut conn)
        .expect("Failed to seed school");
        diesel::sql_query(format!(
            "INSERT INTO teachers (id, created_at, updated_at, first_name, last_name, email, school_id) \
             VALUES ('teacher-{s}', datetime('now'), datetime('now'), 'T', 'Eacher', 'teacher-{s}@x.com', 'school-{s}')",
            s = suffix
        ))
        .execute(&mut conn)
        .expect("Failed to seed teacher");
        diesel::sql_query(format!(
            "INSERT INTO grades (id, created_at, updated_at, name, level, teacher_id, school_id) \
             VALUES ('grade-{s}', datetime('now'), datetime('now'), 'Grade 1', 1, 'teacher-{s}', 'school-{s}')",
            s = suffix
        ))
        .execute(&mut conn)
        .expect("Failed to seed grade");
        diesel::sql_query(format!(
            "INSERT INTO students (id, created_at, updated_at, first_name, last_name, date_of_birth, gender, enrollment_date, grade_id, school_id) \
             VALUES ('student-{s}', datetime('now'), datetime('now'), 'S', 'Tudent', datetime('now'), 'F', datetime('now'), 'grade-{s}', 'school-{s}')",
            s = suffix
        ))
        .execute(&mut conn)
        .expect("Failed to seed student");
    }

    fn sample_record(suffix: &str) -> NewAttendanceRecord {
        NewAttendanceRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            is_present: true,
            student_id: format!("student-{}", suffix),
            teacher_id: format!("teacher-{}", suffix),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let (repo, pool, _temp_dir) = create_test_repository();
        seed_school_with_student(&pool, "a");

        let created = repo
            .create("school-a", sample_record("a"))
            .await
            .expect("Failed to create attendance record");

        let fetched = repo
            .get_by_id("school-a", &created.id)
            .expect("Failed to fetch record");
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.date, created.date);
        assert_eq!(fetched.student_id, created.student_id);
        assert!(fetched.is_present);
    }

    #[tokio::test]
    async fn test_duplicate_day_yields_conflict() {
        let (repo, pool, _temp_dir) = create_test_repository();
        seed_school_with_student(&pool, "a");

        repo.create("school-a", sample_record("a"))
            .await
            .expect("First record should succeed");
        let err = repo
            .create("school-a", sample_record("a"))
            .await
            .expect_err("Second record for same day should fail");
        assert!(matches!(err, Error::Conflict(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_cross_tenant_student_yields_reference_error() {
        let (repo, pool, _temp_dir) = create_test_repository();
        seed_school_with_student(&pool, "a");
        seed_school_with_student(&pool, "b");

        // School B tries to record attendance for school A's student.
        let mut record = sample_record("a");
        record.teacher_id = "teacher-b".to_string();
        let err = repo
            .create("school-b", record)
            .await
            .expect_err("Cross-tenant reference should fail");
        assert!(matches!(err, Error::Reference(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_get_is_tenant_scoped() {
        let (repo, pool, _temp_dir) = create_test_repository();
        seed_school_with_student(&pool, "a");
        seed_school_with_student(&pool, "b");

        let created = repo
            .create("school-a", sample_record("a"))
            .await
            .expect("Failed to create attendance record");

        let err = repo
            .get_by_id("school-b", &created.id)
            .expect_err("Other tenant should not see the record");
        assert!(matches!(err, Error::NotFound(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_update_toggles_presence() {
        let (repo, pool, _temp_dir) = create_test_repository();
        seed_school_with_student(&pool, "a");

        let created = repo
            .create("school-a", sample_record("a"))
            .await
            .expect("Failed to create attendance record");

        let updated = repo
            .update(
                "school-a",
                &created.id,
                AttendanceUpdate {
                    is_present: Some(false),
                },
            )
            .await
            .expect("Update should succeed");
        assert!(!updated.is_present);
        assert!(updated.updated_at >= created.updated_at);
    }
}
