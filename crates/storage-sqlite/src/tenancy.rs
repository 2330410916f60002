//! Cross-tenant reference checks shared by the repositories.
//!
//! Every referenced record must exist AND belong to the same school as the
//! record referencing it. A dangling id and a cross-tenant id are reported
//! the same way: the caller has no business knowing which one it was.

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::errors::StorageError;
use crate::schema::{grades, schools, students, teachers};
use scholaris_core::errors::{Error, Result};

pub(crate) fn require_school(conn: &mut SqliteConnection, school_id: &str) -> Result<()> {
    let found: i64 = schools::table
        .filter(schools::id.eq(school_id))
        .select(count_star())
        .get_result(conn)
        .map_err(StorageError::from)?;
    if found == 0 {
        return Err(Error::Reference(format!(
            "School {} does not exist",
            school_id
        )));
    }
    Ok(())
}

pub(crate) fn require_teacher_in_school(
    conn: &mut SqliteConnection,
    teacher_id: &str,
    school_id: &str,
) -> Result<()> {
    let found: i64 = teachers::table
        .filter(teachers::id.eq(teacher_id))
        .filter(teachers::school_id.eq(school_id))
        .select(count_star())
        .get_result(conn)
        .map_err(StorageError::from)?;
    if found == 0 {
        return Err(Error::Reference(format!(
            "Teacher {} does not exist in school {}",
            teacher_id, school_id
        )));
    }
    Ok(())
}

pub(crate) fn require_grade_in_school(
    conn: &mut SqliteConnection,
    grade_id: &str,
    school_id: &str,
) -> Result<()> {
    let found: i64 = grades::table
        .filter(grades::id.eq(grade_id))
        .filter(grades::school_id.eq(school_id))
        .select(count_star())
        .get_result(conn)
        .map_err(StorageError::from)?;
    if found == 0 {
        return Err(Error::Reference(format!(
            "Grade {} does not exist in school {}",
            grade_id, school_id
        )));
    }
    Ok(())
}

pub(crate) fn require_student_in_school(
    conn: &mut SqliteConnection,
    student_id: &str,
    school_id: &str,
) -> Result<()> {
    let found: i64 = students::table
        .filter(students::id.eq(student_id))
        .filter(students::school_id.eq(school_id))
        .select(count_star())
        .get_result(conn)
        .map_err(StorageError::from)?;
    if found == 0 {
        return Err(Error::Reference(format!(
            "Student {} does not exist in school {}",
            student_id, school_id
        )));
    }
    Ok(())
}
