//! Grade and student repository and service traits.

use async_trait::async_trait;

use super::enrollment_model::{
    Grade, GradeFilter, GradeUpdate, NewGrade, NewStudent, Student, StudentFilter, StudentUpdate,
};
use crate::errors::Result;
use crate::paging::Page;

/// Trait defining the contract for Grade repository operations.
#[async_trait]
pub trait GradeRepositoryTrait: Send + Sync {
    /// Creates a grade after verifying the homeroom teacher belongs to the
    /// same school.
    async fn create(&self, school_id: &str, new_grade: NewGrade) -> Result<Grade>;

    async fn update(&self, school_id: &str, grade_id: &str, update: GradeUpdate) -> Result<Grade>;

    /// Deletes a grade. Rejected while students are still enrolled in it.
    async fn delete(&self, school_id: &str, grade_id: &str) -> Result<usize>;

    fn get_by_id(&self, school_id: &str, grade_id: &str) -> Result<Grade>;

    fn list(&self, school_id: &str, filter: GradeFilter, page: Page) -> Result<Vec<Grade>>;
}

/// Trait defining the contract for Student repository operations.
#[async_trait]
pub trait StudentRepositoryTrait: Send + Sync {
    /// Enrolls a student after verifying the grade belongs to the same
    /// school.
    async fn create(&self, school_id: &str, new_student: NewStudent) -> Result<Student>;

    async fn update(
        &self,
        school_id: &str,
        student_id: &str,
        update: StudentUpdate,
    ) -> Result<Student>;

    /// Deletes a student.
    ///
    /// Without `cascade` the delete is rejected while fees, attendance
    /// records, or academic records reference the student; with `cascade`
    /// those are removed in the same transaction.
    async fn delete(&self, school_id: &str, student_id: &str, cascade: bool) -> Result<usize>;

    fn get_by_id(&self, school_id: &str, student_id: &str) -> Result<Student>;

    fn list(&self, school_id: &str, filter: StudentFilter, page: Page) -> Result<Vec<Student>>;
}

/// Trait defining the contract for Grade service operations.
#[async_trait]
pub trait GradeServiceTrait: Send + Sync {
    async fn create_grade(&self, school_id: &str, new_grade: NewGrade) -> Result<Grade>;

    async fn update_grade(
        &self,
        school_id: &str,
        grade_id: &str,
        update: GradeUpdate,
    ) -> Result<Grade>;

    async fn delete_grade(&self, school_id: &str, grade_id: &str) -> Result<usize>;

    fn get_grade(&self, school_id: &str, grade_id: &str) -> Result<Grade>;

    fn list_grades(&self, school_id: &str, filter: GradeFilter, page: Page) -> Result<Vec<Grade>>;
}

/// Trait defining the contract for Student service operations.
#[async_trait]
pub trait StudentServiceTrait: Send + Sync {
    async fn create_student(&self, school_id: &str, new_student: NewStudent) -> Result<Student>;

    async fn update_student(
        &self,
        school_id: &str,
        student_id: &str,
        update: StudentUpdate,
    ) -> Result<Student>;

    async fn delete_student(
        &self,
        school_id: &str,
        student_id: &str,
        cascade: bool,
    ) -> Result<usize>;

    fn get_student(&self, school_id: &str, student_id: &str) -> Result<Student>;

    fn list_students(
        &self,
        school_id: &str,
        filter: StudentFilter,
        page: Page,
    ) -> Result<Vec<Student>>;
}
