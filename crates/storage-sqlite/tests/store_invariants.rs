//! Cross-entity invariant tests for the record store: global uniqueness,
//! tenant isolation, compound constraints, and delete policies, exercised
//! through the service layer over a real temp database.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::tempdir;

use scholaris_core::academics::{AcademicRecordService, AcademicRecordServiceTrait, NewAcademicRecord};
use scholaris_core::attendance::{
    AttendanceFilter, AttendanceService, AttendanceServiceTrait, NewAttendanceRecord,
};
use scholaris_core::enrollment::{
    Grade, GradeService, GradeServiceTrait, NewGrade, NewStudent, Student, StudentFilter,
    StudentService, StudentServiceTrait,
};
use scholaris_core::errors::Error;
use scholaris_core::events::{EventFilter, EventService, EventServiceTrait, NewEvent};
use scholaris_core::fees::{FeeService, FeeServiceTrait, NewFee};
use scholaris_core::paging::Page;
use scholaris_core::personnel::{
    NewStaff, NewTeacher, StaffService, StaffServiceTrait, Teacher, TeacherService,
    TeacherServiceTrait,
};
use scholaris_core::schools::{
    NewSchool, School, SchoolService, SchoolServiceTrait, SchoolType,
};
use scholaris_core::users::{NewUser, UserService, UserServiceTrait};

use scholaris_storage_sqlite::academics::AcademicRecordRepository;
use scholaris_storage_sqlite::attendance::AttendanceRepository;
use scholaris_storage_sqlite::db::{create_pool, run_migrations, spawn_writer, spawn_writer_with_timeout};
use scholaris_storage_sqlite::enrollment::{GradeRepository, StudentRepository};
use scholaris_storage_sqlite::events::EventRepository;
use scholaris_storage_sqlite::fees::FeeRepository;
use scholaris_storage_sqlite::personnel::{StaffRepository, TeacherRepository};
use scholaris_storage_sqlite::schools::{SchoolRepository, SchoolStatsRepository};
use scholaris_storage_sqlite::users::UserRepository;

struct TestStore {
    schools: SchoolService,
    users: UserService,
    teachers: TeacherService,
    staff: StaffService,
    grades: GradeService,
    students: StudentService,
    fees: FeeService,
    events: EventService,
    attendance: AttendanceService,
    academics: AcademicRecordService,
    _temp_dir: tempfile::TempDir,
}

fn test_store() -> TestStore {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let db_path_str = db_path.to_string_lossy().to_string();

    let pool = create_pool(&db_path_str).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());

    TestStore {
        schools: SchoolService::new(
            Arc::new(SchoolRepository::new(Arc::clone(&pool), writer.clone())),
            Arc::new(SchoolStatsRepository::new(Arc::clone(&pool), writer.clone())),
        ),
        users: UserService::new(Arc::new(UserRepository::new(
            Arc::clone(&pool),
            writer.clone(),
        ))),
        teachers: TeacherService::new(Arc::new(TeacherRepository::new(
            Arc::clone(&pool),
            writer.clone(),
        ))),
        staff: StaffService::new(Arc::new(StaffRepository::new(
            Arc::clone(&pool),
            writer.clone(),
        ))),
        grades: GradeService::new(Arc::new(GradeRepository::new(
            Arc::clone(&pool),
            writer.clone(),
        ))),
        students: StudentService::new(Arc::new(StudentRepository::new(
            Arc::clone(&pool),
            writer.clone(),
        ))),
        fees: FeeService::new(Arc::new(FeeRepository::new(
            Arc::clone(&pool),
            writer.clone(),
        ))),
        events: EventService::new(Arc::new(EventRepository::new(
            Arc::clone(&pool),
            writer.clone(),
        ))),
        attendance: AttendanceService::new(Arc::new(AttendanceRepository::new(
            Arc::clone(&pool),
            writer.clone(),
        ))),
        academics: AcademicRecordService::new(Arc::new(AcademicRecordRepository::new(
            Arc::clone(&pool),
            writer,
        ))),
        _temp_dir: temp_dir,
    }
}

fn dt(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn new_school(code: &str, email: &str) -> NewSchool {
    NewSchool {
        name: format!("School {}", code),
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

fn new_teacher(email: &str) -> NewTeacher {
    NewTeacher {
        first_name: "Ama".to_string(),
        last_name: "Owusu".to_string(),
        email: email.to_string(),
        phone_number: None,
        subject: Some("Mathematics".to_string()),
    }
}

fn new_student(grade_id: &str, email: Option<&str>) -> NewStudent {
    NewStudent {
        first_name: "Kofi".to_string(),
        last_name: "Adjei".to_string(),
        date_of_birth: dt(2012, 3, 14),
        gender: "M".to_string(),
        address: None,
        phone_number: None,
        email: email.map(str::to_string),
        enrollment_date: dt(2023, 9, 1),
        grade_id: grade_id.to_string(),
    }
}

/// Seeds a school with one teacher and one grade; the common backdrop for
/// the student-level scenarios.
async fn seed_school(
    store: &TestStore,
    code: &str,
    email: &str,
    teacher_email: &str,
) -> (School, Teacher, Grade) {
    let school = store
        .schools
        .create_school(new_school(code, email))
        .await
        .expect("Failed to create school");
    let teacher = store
        .teachers
        .create_teacher(&school.id, new_teacher(teacher_email))
        .await
        .expect("Failed to create teacher");
    let grade = store
        .grades
        .create_grade(
            &school.id,
            NewGrade {
                name: "Grade 1A".to_string(),
                level: 1,
                teacher_id: teacher.id.clone(),
            },
        )
        .await
        .expect("Failed to create grade");
    (school, teacher, grade)
}

async fn seed_student(store: &TestStore, school_id: &str, grade_id: &str) -> Student {
    store
        .students
        .create_student(school_id, new_student(grade_id, None))
        .await
        .expect("Failed to create student")
}

// ==================== Uniqueness ====================

#[tokio::test]
async fn test_user_email_unique_across_schools() {
    let store = test_store();
    let (school_a, _, _) = seed_school(&store, "ABCD", "a@x.com", "t-a@x.com").await;
    let (school_b, _, _) = seed_school(&store, "EFGH", "b@x.com", "t-b@x.com").await;

    let user = NewUser {
        email: "admin@x.com".to_string(),
        password: "secret".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Mensah".to_string(),
        is_admin: true,
    };
    store
        .users
        .create_user(&school_a.id, user.clone())
        .await
        .expect("First user should succeed");

    // Email uniqueness is global, not per-tenant.
    let err = store
        .users
        .create_user(&school_b.id, user)
        .await
        .expect_err("Same email in another school should fail");
    assert!(matches!(err, Error::Conflict(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_student_email_unique_only_when_present() {
    let store = test_store();
    let (school, _, grade) = seed_school(&store, "ABCD", "a@x.com", "t-a@x.com").await;

    // Two students without email are fine.
    seed_student(&store, &school.id, &grade.id).await;
    seed_student(&store, &school.id, &grade.id).await;

    store
        .students
        .create_student(&school.id, new_student(&grade.id, Some("s@x.com")))
        .await
        .expect("First student with email should succeed");
    let err = store
        .students
        .create_student(&school.id, new_student(&grade.id, Some("s@x.com")))
        .await
        .expect_err("Duplicate student email should fail");
    assert!(matches!(err, Error::Conflict(_)), "got {:?}", err);
}

// ==================== Referential integrity ====================

#[tokio::test]
async fn test_cross_tenant_grade_reference_rejected() {
    let store = test_store();
    let (_school_a, _, grade_a) = seed_school(&store, "ABCD", "a@x.com", "t-a@x.com").await;
    let (school_b, _, _) = seed_school(&store, "EFGH", "b@x.com", "t-b@x.com").await;

    // A student in school B must not reference school A's grade.
    let err = store
        .students
        .create_student(&school_b.id, new_student(&grade_a.id, None))
        .await
        .expect_err("Cross-tenant grade reference should fail");
    assert!(matches!(err, Error::Reference(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_dangling_references_rejected() {
    let store = test_store();
    let (school, _, _grade) = seed_school(&store, "ABCD", "a@x.com", "t-a@x.com").await;

    let err = store
        .students
        .create_student(&school.id, new_student("no-such-grade", None))
        .await
        .expect_err("Dangling grade reference should fail");
    assert!(matches!(err, Error::Reference(_)), "got {:?}", err);

    let err = store
        .fees
        .create_fee(
            &school.id,
            NewFee {
                amount: 100.0,
                due_date: dt(2024, 12, 1),
                is_paid: false,
                description: None,
                student_id: "no-such-student".to_string(),
            },
        )
        .await
        .expect_err("Dangling student reference should fail");
    assert!(matches!(err, Error::Reference(_)), "got {:?}", err);

    let err = store
        .grades
        .create_grade(
            &school.id,
            NewGrade {
                name: "Grade 2".to_string(),
                level: 2,
                teacher_id: "no-such-teacher".to_string(),
            },
        )
        .await
        .expect_err("Dangling teacher reference should fail");
    assert!(matches!(err, Error::Reference(_)), "got {:?}", err);
}

// ==================== Round trips & idempotence ====================

#[tokio::test]
async fn test_student_create_get_round_trip() {
    let store = test_store();
    let (school, _, grade) = seed_school(&store, "ABCD", "a@x.com", "t-a@x.com").await;

    let created = store
        .students
        .create_student(&school.id, new_student(&grade.id, Some("kofi@x.com")))
        .await
        .expect("Failed to create student");

    let fetched = store
        .students
        .get_student(&school.id, &created.id)
        .expect("Failed to fetch student");

    // Equal up to server-assigned fields (id and timestamps are generated).
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.first_name, created.first_name);
    assert_eq!(fetched.last_name, created.last_name);
    assert_eq!(fetched.date_of_birth, created.date_of_birth);
    assert_eq!(fetched.email, created.email);
    assert_eq!(fetched.grade_id, created.grade_id);
    assert_eq!(fetched.school_id, school.id);
}

#[tokio::test]
async fn test_get_and_list_are_idempotent() {
    let store = test_store();
    let (school, _, grade) = seed_school(&store, "ABCD", "a@x.com", "t-a@x.com").await;
    let student = seed_student(&store, &school.id, &grade.id).await;

    let first = store
        .students
        .get_student(&school.id, &student.id)
        .expect("get should succeed");
    let second = store
        .students
        .get_student(&school.id, &student.id)
        .expect("get should succeed");
    assert_eq!(first.id, second.id);
    assert_eq!(first.updated_at, second.updated_at);

    let list_a = store
        .students
        .list_students(&school.id, StudentFilter::default(), Page::default())
        .expect("list should succeed");
    let list_b = store
        .students
        .list_students(&school.id, StudentFilter::default(), Page::default())
        .expect("list should succeed");
    let ids_a: Vec<_> = list_a.iter().map(|s| s.id.clone()).collect();
    let ids_b: Vec<_> = list_b.iter().map(|s| s.id.clone()).collect();
    assert_eq!(ids_a, ids_b);
}

#[tokio::test]
async fn test_pagination_is_stable_and_disjoint() {
    let store = test_store();
    let (school, _, _) = seed_school(&store, "ABCD", "a@x.com", "t-a@x.com").await;

    for i in 0..5 {
        store
            .events
            .create_event(
                &school.id,
                NewEvent {
                    title: format!("Event {}", i),
                    description: None,
                    start_date: dt(2024, 6, 10 + i),
                    end_date: dt(2024, 6, 10 + i),
                    location: None,
                },
            )
            .await
            .expect("Failed to create event");
    }

    let page1 = store
        .events
        .list_events(&school.id, EventFilter::default(), Page::new(3, 0))
        .expect("list should succeed");
    let page2 = store
        .events
        .list_events(&school.id, EventFilter::default(), Page::new(3, 3))
        .expect("list should succeed");
    assert_eq!(page1.len(), 3);
    assert_eq!(page2.len(), 2);

    let mut all_ids: Vec<_> = page1.iter().chain(page2.iter()).map(|e| e.id.clone()).collect();
    all_ids.sort();
    all_ids.dedup();
    assert_eq!(all_ids.len(), 5, "Pages must be disjoint and cover all records");

    let page1_again = store
        .events
        .list_events(&school.id, EventFilter::default(), Page::new(3, 0))
        .expect("list should succeed");
    let ids_a: Vec<_> = page1.iter().map(|e| e.id.clone()).collect();
    let ids_b: Vec<_> = page1_again.iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids_a, ids_b, "Same page must return the same records");
}

// ==================== Tenant isolation ====================

#[tokio::test]
async fn test_get_is_tenant_scoped() {
    let store = test_store();
    let (school_a, _, grade_a) = seed_school(&store, "ABCD", "a@x.com", "t-a@x.com").await;
    let (school_b, _, _) = seed_school(&store, "EFGH", "b@x.com", "t-b@x.com").await;

    let student = seed_student(&store, &school_a.id, &grade_a.id).await;

    let err = store
        .students
        .get_student(&school_b.id, &student.id)
        .expect_err("Other tenant must not see the student");
    assert!(matches!(err, Error::NotFound(_)), "got {:?}", err);
}

// ==================== Attendance compound constraint ====================

#[tokio::test]
async fn test_attendance_duplicate_day_conflict() {
    let store = test_store();
    let (school, teacher, grade) = seed_school(&store, "ABCD", "a@x.com", "t-a@x.com").await;
    let student = seed_student(&store, &school.id, &grade.id).await;

    let record = NewAttendanceRecord {
        date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        is_present: true,
        student_id: student.id.clone(),
        teacher_id: teacher.id.clone(),
    };
    store
        .attendance
        .record_attendance(&school.id, record.clone())
        .await
        .expect("First attendance record should succeed");

    let err = store
        .attendance
        .record_attendance(&school.id, record)
        .await
        .expect_err("Second record for the same day should fail");
    assert!(matches!(err, Error::Conflict(_)), "got {:?}", err);

    // A different day is fine.
    store
        .attendance
        .record_attendance(
            &school.id,
            NewAttendanceRecord {
                date: NaiveDate::from_ymd_opt(2024, 1, 11).unwrap(),
                is_present: false,
                student_id: student.id.clone(),
                teacher_id: teacher.id,
            },
        )
        .await
        .expect("Different day should succeed");

    let records = store
        .attendance
        .list_attendance(
            &school.id,
            AttendanceFilter {
                student_id: Some(student.id),
                ..Default::default()
            },
            Page::default(),
        )
        .expect("list should succeed");
    assert_eq!(records.len(), 2);
}

// ==================== Delete policies ====================

#[tokio::test]
async fn test_school_delete_restricts_then_cascades() {
    let store = test_store();
    let (school, teacher, grade) = seed_school(&store, "ABCD", "a@x.com", "t-a@x.com").await;
    let student = seed_student(&store, &school.id, &grade.id).await;

    store
        .attendance
        .record_attendance(
            &school.id,
            NewAttendanceRecord {
                date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                is_present: true,
                student_id: student.id.clone(),
                teacher_id: teacher.id.clone(),
            },
        )
        .await
        .expect("Failed to record attendance");

    let err = store
        .schools
        .delete_school(&school.id, false)
        .await
        .expect_err("Delete with dependents should fail without cascade");
    assert!(matches!(err, Error::Conflict(_)), "got {:?}", err);

    // Cascade removes the whole closure.
    store
        .schools
        .delete_school(&school.id, true)
        .await
        .expect("Cascade delete should succeed");

    assert!(matches!(
        store.schools.get_school(&school.id),
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        store.students.get_student(&school.id, &student.id),
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        store.teachers.get_teacher(&school.id, &teacher.id),
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn test_student_delete_restricts_then_cascades() {
    let store = test_store();
    let (school, _teacher, grade) = seed_school(&store, "ABCD", "a@x.com", "t-a@x.com").await;
    let student = seed_student(&store, &school.id, &grade.id).await;

    store
        .fees
        .create_fee(
            &school.id,
            NewFee {
                amount: 250.0,
                due_date: dt(2024, 12, 1),
                is_paid: false,
                description: Some("Term fee".to_string()),
                student_id: student.id.clone(),
            },
        )
        .await
        .expect("Failed to create fee");
    store
        .academics
        .create_record(
            &school.id,
            NewAcademicRecord {
                subject: "Mathematics".to_string(),
                score: 82.0,
                term: "T1".to_string(),
                year: 2024,
                student_id: student.id.clone(),
            },
        )
        .await
        .expect("Failed to create academic record");

    let err = store
        .students
        .delete_student(&school.id, &student.id, false)
        .await
        .expect_err("Delete with dependents should fail without cascade");
    assert!(matches!(err, Error::Conflict(_)), "got {:?}", err);

    let affected = store
        .students
        .delete_student(&school.id, &student.id, true)
        .await
        .expect("Cascade delete should succeed");
    assert_eq!(affected, 3, "fee + academic record + student");
}

#[tokio::test]
async fn test_teacher_delete_restricted_by_homeroom() {
    let store = test_store();
    let (school, teacher, _grade) = seed_school(&store, "ABCD", "a@x.com", "t-a@x.com").await;

    let err = store
        .teachers
        .delete_teacher(&school.id, &teacher.id, true)
        .await
        .expect_err("Homeroom teacher delete should fail even with cascade");
    assert!(matches!(err, Error::Conflict(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_grade_delete_restricted_by_students() {
    let store = test_store();
    let (school, _, grade) = seed_school(&store, "ABCD", "a@x.com", "t-a@x.com").await;
    seed_student(&store, &school.id, &grade.id).await;

    let err = store
        .grades
        .delete_grade(&school.id, &grade.id)
        .await
        .expect_err("Grade with students should not be deletable");
    assert!(matches!(err, Error::Conflict(_)), "got {:?}", err);
}

// ==================== Supplemental operations ====================

#[tokio::test]
async fn test_record_login_stamps_last_login() {
    let store = test_store();
    let (school, _, _) = seed_school(&store, "ABCD", "a@x.com", "t-a@x.com").await;

    let user = store
        .users
        .create_user(
            &school.id,
            NewUser {
                email: "admin@x.com".to_string(),
                password: "secret".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Mensah".to_string(),
                is_admin: false,
            },
        )
        .await
        .expect("Failed to create user");
    assert!(user.last_login.is_none());

    let logged_in = store
        .users
        .record_login(&school.id, &user.id)
        .await
        .expect("record_login should succeed");
    assert!(logged_in.last_login.is_some());
}

#[tokio::test]
async fn test_mark_fee_paid() {
    let store = test_store();
    let (school, _, grade) = seed_school(&store, "ABCD", "a@x.com", "t-a@x.com").await;
    let student = seed_student(&store, &school.id, &grade.id).await;

    let fee = store
        .fees
        .create_fee(
            &school.id,
            NewFee {
                amount: 120.0,
                due_date: dt(2024, 12, 1),
                is_paid: false,
                description: None,
                student_id: student.id,
            },
        )
        .await
        .expect("Failed to create fee");
    assert!(!fee.is_paid);

    let paid = store
        .fees
        .mark_fee_paid(&school.id, &fee.id)
        .await
        .expect("mark_fee_paid should succeed");
    assert!(paid.is_paid);
}

#[tokio::test]
async fn test_stats_recompute_reflects_records() {
    let store = test_store();
    let (school, teacher, grade) = seed_school(&store, "ABCD", "a@x.com", "t-a@x.com").await;
    let student_a = seed_student(&store, &school.id, &grade.id).await;
    let student_b = seed_student(&store, &school.id, &grade.id).await;

    store
        .staff
        .create_staff(
            &school.id,
            NewStaff {
                first_name: "Yaw".to_string(),
                last_name: "Boateng".to_string(),
                email: "staff@x.com".to_string(),
                phone_number: None,
                position: "Bursar".to_string(),
            },
        )
        .await
        .expect("Failed to create staff");

    for (student, amount, paid) in [(&student_a, 100.0, true), (&student_b, 50.0, false)] {
        store
            .fees
            .create_fee(
                &school.id,
                NewFee {
                    amount,
                    due_date: dt(2024, 12, 1),
                    is_paid: paid,
                    description: None,
                    student_id: student.id.clone(),
                },
            )
            .await
            .expect("Failed to create fee");
    }

    for (student, present) in [(&student_a, true), (&student_b, false)] {
        store
            .attendance
            .record_attendance(
                &school.id,
                NewAttendanceRecord {
                    date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                    is_present: present,
                    student_id: student.id.clone(),
                    teacher_id: teacher.id.clone(),
                },
            )
            .await
            .expect("Failed to record attendance");
    }

    let stats = store
        .schools
        .recompute_stats(&school.id)
        .await
        .expect("Recompute should succeed");
    assert_eq!(stats.total_students, 2);
    assert_eq!(stats.total_teachers, 1);
    assert_eq!(stats.total_staff, 1);
    assert_eq!(stats.total_fees_paid, 100.0);
    assert_eq!(stats.total_fees_outstanding, 50.0);
    assert_eq!(stats.average_attendance, 50.0);

    // The snapshot read back matches the recomputed one.
    let fetched = store.schools.get_stats(&school.id).expect("get_stats");
    assert_eq!(fetched.total_students, 2);
    assert_eq!(fetched.average_attendance, 50.0);
}

// ==================== Timeouts ====================

#[tokio::test]
async fn test_exhausted_write_budget_yields_timeout() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let db_path_str = db_path.to_string_lossy().to_string();

    let pool = create_pool(&db_path_str).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");

    // A zero budget expires every job before it reaches the database.
    let writer = spawn_writer_with_timeout((*pool).clone(), Duration::ZERO);
    let schools = SchoolService::new(
        Arc::new(SchoolRepository::new(Arc::clone(&pool), writer.clone())),
        Arc::new(SchoolStatsRepository::new(Arc::clone(&pool), writer)),
    );

    let err = schools
        .create_school(new_school("ABCD", "a@x.com"))
        .await
        .expect_err("Zero write budget should time out");
    assert!(matches!(err, Error::Timeout(_)), "got {:?}", err);

    // Nothing was written.
    let list = schools
        .list_schools(Default::default(), Page::default())
        .expect("list should succeed");
    assert!(list.is_empty());
}
