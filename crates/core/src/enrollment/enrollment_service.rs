use log::debug;
use std::sync::Arc;

use super::enrollment_model::{
    Grade, GradeFilter, GradeUpdate, NewGrade, NewStudent, Student, StudentFilter, StudentUpdate,
};
use super::enrollment_traits::{
    GradeRepositoryTrait, GradeServiceTrait, StudentRepositoryTrait, StudentServiceTrait,
};
use crate::errors::Result;
use crate::paging::Page;

/// Service for managing a school's grades.
pub struct GradeService {
    repository: Arc<dyn GradeRepositoryTrait>,
}

impl GradeService {
    pub fn new(repository: Arc<dyn GradeRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl GradeServiceTrait for GradeService {
    async fn create_grade(&self, school_id: &str, new_grade: NewGrade) -> Result<Grade> {
        debug!("Creating grade {} in school {}", new_grade.name, school_id);
        new_grade.validate()?;
        self.repository.create(school_id, new_grade).await
    }

    async fn update_grade(
        &self,
        school_id: &str,
        grade_id: &str,
        update: GradeUpdate,
    ) -> Result<Grade> {
        update.validate()?;
        self.repository.update(school_id, grade_id, update).await
    }

    async fn delete_grade(&self, school_id: &str, grade_id: &str) -> Result<usize> {
        self.repository.delete(school_id, grade_id).await
    }

    fn get_grade(&self, school_id: &str, grade_id: &str) -> Result<Grade> {
        self.repository.get_by_id(school_id, grade_id)
    }

    fn list_grades(&self, school_id: &str, filter: GradeFilter, page: Page) -> Result<Vec<Grade>> {
        self.repository.list(school_id, filter, page.normalized())
    }
}

/// Service for managing a school's students.
pub struct StudentService {
    repository: Arc<dyn StudentRepositoryTrait>,
}

impl StudentService {
    pub fn new(repository: Arc<dyn StudentRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl StudentServiceTrait for StudentService {
    async fn create_student(&self, school_id: &str, new_student: NewStudent) -> Result<Student> {
        debug!(
            "Enrolling student {} {} in school {} grade {}",
            new_student.first_name, new_student.last_name, school_id, new_student.grade_id
        );
        new_student.validate()?;
        self.repository.create(school_id, new_student).await
    }

    async fn update_student(
        &self,
        school_id: &str,
        student_id: &str,
        update: StudentUpdate,
    ) -> Result<Student> {
        update.validate()?;
        self.repository.update(school_id, student_id, update).await
    }

    async fn delete_student(
        &self,
        school_id: &str,
        student_id: &str,
        cascade: bool,
    ) -> Result<usize> {
        debug!(
            "Deleting student {} from school {} cascade={}",
            student_id, school_id, cascade
        );
        self.repository.delete(school_id, student_id, cascade).await
    }

    fn get_student(&self, school_id: &str, student_id: &str) -> Result<Student> {
        self.repository.get_by_id(school_id, student_id)
    }

    fn list_students(
        &self,
        school_id: &str,
        filter: StudentFilter,
        page: Page,
    ) -> Result<Vec<Student>> {
        self.repository.list(school_id, filter, page.normalized())
    }
}
