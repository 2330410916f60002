use async_trait::async_trait;
use diesel::dsl::sum;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use scholaris_core::errors::{Error, Result};
use scholaris_core::paging::Page;
use scholaris_core::schools::{
    NewSchool, School, SchoolFilter, SchoolRepositoryTrait, SchoolStats, SchoolStatsRepositoryTrait,
    SchoolStatsUpdate, SchoolUpdate,
};

use super::model::{SchoolChangeset, SchoolDB, SchoolStatsChangeset, SchoolStatsDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{
    academic_records, attendance_records, events, fees, grades, school_stats, schools, staff,
    students, teachers, users,
};

/// Repository for managing school (tenant root) data in the database.
pub struct SchoolRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SchoolRepository {
    /// Creates a new SchoolRepository instance.
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SchoolRepositoryTrait for SchoolRepository {
    async fn create(&self, new_school: NewSchool) -> Result<School> {
        let mut school_db: SchoolDB = new_school.into();
        school_db.id = Uuid::new_v4().to_string();

        self.writer
            .exec(move |conn| {
                let duplicate_code: i64 = schools::table
                    .filter(schools::code.eq(&school_db.code))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if duplicate_code > 0 {
                    return Err(Error::Conflict(format!(
                        "School code '{}' is already in use",
                        school_db.code
                    )));
                }

                let duplicate_email: i64 = schools::table
                    .filter(schools::email.eq(&school_db.email))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if duplicate_email > 0 {
                    return Err(Error::Conflict(format!(
                        "School email '{}' is already in use",
                        school_db.email
                    )));
                }

                diesel::insert_into(schools::table)
                    .values(&school_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                // Every school carries a stats row from birth.
                diesel::insert_into(school_stats::table)
                    .values(SchoolStatsDB::zeroed(&school_db.id))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                school_db.into_domain()
            })
            .await
    }

    async fn update(&self, school_id: &str, update: SchoolUpdate) -> Result<School> {
        let school_id = school_id.to_string();

        self.writer
            .exec(move |conn| {
                let existing = schools::table
                    .find(&school_id)
                    .select(SchoolDB::as_select())
                    .first::<SchoolDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        Error::NotFound(format!("School with id {} not found", school_id))
                    })?;

                if let Some(ref new_code) = update.code {
                    if *new_code != existing.code {
                        let duplicate: i64 = schools::table
                            .filter(schools::code.eq(new_code))
                            .filter(schools::id.ne(&school_id))
                            .count()
                            .get_result(conn)
                            .map_err(StorageError::from)?;
                        if duplicate > 0 {
                            return Err(Error::Conflict(format!(
                                "School code '{}' is already in use",
                                new_code
                            )));
                        }
                    }
                }

                if let Some(ref new_email) = update.email {
                    if *new_email != existing.email {
                        let duplicate: i64 = schools::table
                            .filter(schools::email.eq(new_email))
                            .filter(schools::id.ne(&school_id))
                            .count()
                            .get_result(conn)
                            .map_err(StorageError::from)?;
                        if duplicate > 0 {
                            return Err(Error::Conflict(format!(
                                "School email '{}' is already in use",
                                new_email
                            )));
                        }
                    }
                }

                let changeset = SchoolChangeset::from(update);
                diesel::update(schools::table.find(&school_id))
                    .set(&changeset)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let reloaded = schools::table
                    .find(&school_id)
                    .select(SchoolDB::as_select())
                    .first::<SchoolDB>(conn)
                    .map_err(StorageError::from)?;
                reloaded.into_domain()
            })
            .await
    }

    async fn delete(&self, school_id: &str, cascade: bool) -> Result<usize> {
        let school_id = school_id.to_string();

        self.writer
            .exec(move |conn| {
                let exists: i64 = schools::table
                    .filter(schools::id.eq(&school_id))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if exists == 0 {
                    return Err(Error::NotFound(format!(
                        "School with id {} not found",
                        school_id
                    )));
                }

                let mut dependents: i64 = 0;
                dependents += users::table
                    .filter(users::school_id.eq(&school_id))
                    .count()
                    .get_result::<i64>(conn)
                    .map_err(StorageError::from)?;
                dependents += teachers::table
                    .filter(teachers::school_id.eq(&school_id))
                    .count()
                    .get_result::<i64>(conn)
                    .map_err(StorageError::from)?;
                dependents += staff::table
                    .filter(staff::school_id.eq(&school_id))
                    .count()
                    .get_result::<i64>(conn)
                    .map_err(StorageError::from)?;
                dependents += students::table
                    .filter(students::school_id.eq(&school_id))
                    .count()
                    .get_result::<i64>(conn)
                    .map_err(StorageError::from)?;
                dependents += grades::table
                    .filter(grades::school_id.eq(&school_id))
                    .count()
                    .get_result::<i64>(conn)
                    .map_err(StorageError::from)?;
                dependents += fees::table
                    .filter(fees::school_id.eq(&school_id))
                    .count()
                    .get_result::<i64>(conn)
                    .map_err(StorageError::from)?;
                dependents += events::table
                    .filter(events::school_id.eq(&school_id))
                    .count()
                    .get_result::<i64>(conn)
                    .map_err(StorageError::from)?;

                if dependents > 0 && !cascade {
                    return Err(Error::Conflict(format!(
                        "School {} still has {} dependent records; request cascade to delete them",
                        school_id, dependents
                    )));
                }

                let mut affected = 0usize;
                if cascade {
                    // Leaf tables first, respecting foreign-key order.
                    affected += diesel::delete(
                        attendance_records::table.filter(
                            attendance_records::student_id.eq_any(
                                students::table
                                    .filter(students::school_id.eq(&school_id))
                                    .select(students::id),
                            ),
                        ),
                    )
                    .execute(conn)
                    .map_err(StorageError::from)?;

                    affected += diesel::delete(
                        academic_records::table.filter(
                            academic_records::student_id.eq_any(
                                students::table
                                    .filter(students::school_id.eq(&school_id))
                                    .select(students::id),
                            ),
                        ),
                    )
                    .execute(conn)
                    .map_err(StorageError::from)?;

                    affected +=
                        diesel::delete(fees::table.filter(fees::school_id.eq(&school_id)))
                            .execute(conn)
                            .map_err(StorageError::from)?;
                    affected += diesel::delete(
                        students::table.filter(students::school_id.eq(&school_id)),
                    )
                    .execute(conn)
                    .map_err(StorageError::from)?;
                    affected +=
                        diesel::delete(grades::table.filter(grades::school_id.eq(&school_id)))
                            .execute(conn)
                            .map_err(StorageError::from)?;
                    affected +=
                        diesel::delete(events::table.filter(events::school_id.eq(&school_id)))
                            .execute(conn)
                            .map_err(StorageError::from)?;
                    affected +=
                        diesel::delete(users::table.filter(users::school_id.eq(&school_id)))
                            .execute(conn)
                            .map_err(StorageError::from)?;
                    affected +=
                        diesel::delete(staff::table.filter(staff::school_id.eq(&school_id)))
                            .execute(conn)
                            .map_err(StorageError::from)?;
                    affected += diesel::delete(
                        teachers::table.filter(teachers::school_id.eq(&school_id)),
                    )
                    .execute(conn)
                    .map_err(StorageError::from)?;
                }

                // The stats row lives and dies with its school.
                affected += diesel::delete(
                    school_stats::table.filter(school_stats::school_id.eq(&school_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                affected += diesel::delete(schools::table.find(&school_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(affected)
            })
            .await
    }

    fn get_by_id(&self, school_id: &str) -> Result<School> {
        let mut conn = get_connection(&self.pool)?;

        let school = schools::table
            .find(school_id)
            .select(SchoolDB::as_select())
            .first::<SchoolDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::NotFound(format!("School with id {} not found", school_id)))?;

        school.into_domain()
    }

    fn list(&self, filter: SchoolFilter, page: Page) -> Result<Vec<School>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = schools::table.into_boxed();
        if let Some(kind) = filter.school_type {
            query = query.filter(schools::school_type.eq(kind.as_db_str()));
        }

        let results = query
            .select(SchoolDB::as_select())
            .order((schools::created_at.asc(), schools::id.asc()))
            .limit(page.limit)
            .offset(page.offset)
            .load::<SchoolDB>(&mut conn)
            .map_err(StorageError::from)?;

        results.into_iter().map(SchoolDB::into_domain).collect()
    }
}

/// Repository for a school's stats snapshot.
pub struct SchoolStatsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SchoolStatsRepository {
    /// Creates a new SchoolStatsRepository instance.
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SchoolStatsRepositoryTrait for SchoolStatsRepository {
    fn get(&self, school_id: &str) -> Result<SchoolStats> {
        let mut conn = get_connection(&self.pool)?;

        let stats = school_stats::table
            .filter(school_stats::school_id.eq(school_id))
            .select(SchoolStatsDB::as_select())
            .first::<SchoolStatsDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| {
                Error::NotFound(format!("Stats for school {} not found", school_id))
            })?;

        Ok(stats.into())
    }

    async fn update(&self, school_id: &str, update: SchoolStatsUpdate) -> Result<SchoolStats> {
        let school_id = school_id.to_string();

        self.writer
            .exec(move |conn| {
                let exists: i64 = school_stats::table
                    .filter(school_stats::school_id.eq(&school_id))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if exists == 0 {
                    return Err(Error::NotFound(format!(
                        "Stats for school {} not found",
                        school_id
                    )));
                }

                let changeset = SchoolStatsChangeset::from(update);
                diesel::update(
                    school_stats::table.filter(school_stats::school_id.eq(&school_id)),
                )
                .set(&changeset)
                .execute(conn)
                .map_err(StorageError::from)?;

                let reloaded = school_stats::table
                    .filter(school_stats::school_id.eq(&school_id))
                    .select(SchoolStatsDB::as_select())
                    .first::<SchoolStatsDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(reloaded.into())
            })
            .await
    }

    async fn recompute(&self, school_id: &str) -> Result<SchoolStats> {
        let school_id = school_id.to_string();

        self.writer
            .exec(move |conn| {
                let exists: i64 = school_stats::table
                    .filter(school_stats::school_id.eq(&school_id))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if exists == 0 {
                    return Err(Error::NotFound(format!(
                        "Stats for school {} not found",
                        school_id
                    )));
                }

                let total_students: i64 = students::table
                    .filter(students::school_id.eq(&school_id))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                let total_teachers: i64 = teachers::table
                    .filter(teachers::school_id.eq(&school_id))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                let total_staff: i64 = staff::table
                    .filter(staff::school_id.eq(&school_id))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                let total_fees_paid: Option<f64> = fees::table
                    .filter(fees::school_id.eq(&school_id))
                    .filter(fees::is_paid.eq(true))
                    .select(sum(fees::amount))
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                let total_fees_outstanding: Option<f64> = fees::table
                    .filter(fees::school_id.eq(&school_id))
                    .filter(fees::is_paid.eq(false))
                    .select(sum(fees::amount))
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                let attendance_total: i64 = attendance_records::table
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
                let attendance_present: i64 = attendance_records::table
                    .filter(
                        attendance_records::student_id.eq_any(
                            students::table
                                .filter(students::school_id.eq(&school_id))
                                .select(students::id),
                        ),
                    )
                    .filter(attendance_records::is_present.eq(true))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                let average_attendance = if attendance_total == 0 {
                    0.0
                } else {
                    attendance_present as f64 / attendance_total as f64 * 100.0
                };

                diesel::update(
                    school_stats::table.filter(school_stats::school_id.eq(&school_id)),
                )
                .set((
                    school_stats::total_students.eq(total_students as i32),
                    school_stats::total_teachers.eq(total_teachers as i32),
                    school_stats::total_staff.eq(total_staff as i32),
                    school_stats::total_fees_paid.eq(total_fees_paid.unwrap_or(0.0)),
                    school_stats::total_fees_outstanding.eq(total_fees_outstanding.unwrap_or(0.0)),
                    school_stats::average_attendance.eq(average_attendance),
                    school_stats::updated_at.eq(chrono::Utc::now().naive_utc()),
                ))
                .execute(conn)
                .map_err(StorageError::from)?;

                let reloaded = school_stats::table
                    .filter(school_stats::school_id.eq(&school_id))
                    .select(SchoolStatsDB::as_select())
                    .first::<SchoolStatsDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(reloaded.into())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use scholaris_core::schools::{NewSchool, SchoolType, SchoolUpdate};
    use tempfile::tempdir;

    /// Creates test repositories backed by a temp database.
    /// Returns the temp dir as well to keep it alive.
    fn create_test_repositories() -> (SchoolRepository, SchoolStatsRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");

        let writer = spawn_writer((*pool).clone());

        let repo = SchoolRepository::new(Arc::clone(&pool), writer.clone());
        let stats_repo = SchoolStatsRepository::new(Arc::clone(&pool), writer);
        (repo, stats_repo, temp_dir)
    }

    fn sample_school(code: &str, email: &str) -> NewSchool {
        NewSchool {
            name: "Test School".to_string(),
            contact_person: "Head Teacher".to_string(),
            code: code.to_string(),
            address: None,
            phone_number: None,
            image: None,
            email: email.to_string(),
            website_url: None,
            school_type: SchoolType::BasicSchool,
        }
    }

    #[tokio::test]
    async fn test_create_school_assigns_id_and_stats_row() {
        let (repo, stats_repo, _temp_dir) = create_test_repositories();

        let school = repo
            .create(sample_school("ABCD", "a@x.com"))
            .await
            .expect("Failed to create school");
        assert!(!school.id.is_empty());
        assert_eq!(school.code, "ABCD");

        let stats = stats_repo.get(&school.id).expect("Stats row should exist");
        assert_eq!(stats.total_students, 0);
        assert_eq!(stats.average_attendance, 0.0);
    }

    #[tokio::test]
    async fn test_duplicate_code_yields_conflict() {
        let (repo, _stats_repo, _temp_dir) = create_test_repositories();

        repo.create(sample_school("ABCD", "a@x.com"))
            .await
            .expect("First create should succeed");
        let err = repo
            .create(sample_school("ABCD", "b@x.com"))
            .await
            .expect_err("Second create should fail");
        assert!(matches!(err, Error::Conflict(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_duplicate_email_yields_conflict() {
        let (repo, _stats_repo, _temp_dir) = create_test_repositories();

        repo.create(sample_school("ABCD", "a@x.com"))
            .await
            .expect("First create should succeed");
        let err = repo
            .create(sample_school("EFGH", "a@x.com"))
            .await
            .expect_err("Second create should fail");
        assert!(matches!(err, Error::Conflict(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_get_unknown_school_yields_not_found() {
        let (repo, _stats_repo, _temp_dir) = create_test_repositories();

        let err = repo.get_by_id("missing").expect_err("Should not exist");
        assert!(matches!(err, Error::NotFound(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_update_touches_updated_at_only_on_change() {
        let (repo, _stats_repo, _temp_dir) = create_test_repositories();

        let school = repo
            .create(sample_school("ABCD", "a@x.com"))
            .await
            .expect("Failed to create school");
        let stored = repo.get_by_id(&school.id).expect("Fetch should succeed");

        let updated = repo
            .update(
                &school.id,
                SchoolUpdate {
                    name: Some("Renamed School".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("Update should succeed");

        assert_eq!(updated.name, "Renamed School");
        assert_eq!(updated.code, "ABCD");
        assert_eq!(updated.created_at, stored.created_at);
        assert!(updated.updated_at >= stored.updated_at);
    }

    #[tokio::test]
    async fn test_delete_empty_school_succeeds_without_cascade() {
        let (repo, stats_repo, _temp_dir) = create_test_repositories();

        let school = repo
            .create(sample_school("ABCD", "a@x.com"))
            .await
            .expect("Failed to create school");

        // School + its stats row.
        let affected = repo
            .delete(&school.id, false)
            .await
            .expect("Delete should succeed");
        assert_eq!(affected, 2);

        assert!(matches!(
            stats_repo.get(&school.id),
            Err(Error::NotFound(_))
        ));
    }
}
