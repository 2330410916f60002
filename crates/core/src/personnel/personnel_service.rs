use log::debug;
use std::sync::Arc;

use super::personnel_model::{
    NewStaff, NewTeacher, Staff, StaffFilter, StaffUpdate, Teacher, TeacherFilter, TeacherUpdate,
};
use super::personnel_traits::{
    StaffRepositoryTrait, StaffServiceTrait, TeacherRepositoryTrait, TeacherServiceTrait,
};
use crate::errors::Result;
use crate::paging::Page;

/// Service for managing a school's teachers.
pub struct TeacherService {
    repository: Arc<dyn TeacherRepositoryTrait>,
}

impl TeacherService {
    pub fn new(repository: Arc<dyn TeacherRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl TeacherServiceTrait for TeacherService {
    async fn create_teacher(&self, school_id: &str, new_teacher: NewTeacher) -> Result<Teacher> {
        debug!(
            "Creating teacher {} in school {}",
            new_teacher.email, school_id
        );
        new_teacher.validate()?;
        self.repository.create(school_id, new_teacher).await
    }

    async fn update_teacher(
        &self,
        school_id: &str,
        teacher_id: &str,
        update: TeacherUpdate,
    ) -> Result<Teacher> {
        update.validate()?;
        self.repository.update(school_id, teacher_id, update).await
    }

    async fn delete_teacher(
        &self,
        school_id: &str,
        teacher_id: &str,
        cascade: bool,
    ) -> Result<usize> {
        debug!(
            "Deleting teacher {} from school {} cascade={}",
            teacher_id, school_id, cascade
        );
        self.repository.delete(school_id, teacher_id, cascade).await
    }

    fn get_teacher(&self, school_id: &str, teacher_id: &str) -> Result<Teacher> {
        self.repository.get_by_id(school_id, teacher_id)
    }

    fn list_teachers(
        &self,
        school_id: &str,
        filter: TeacherFilter,
        page: Page,
    ) -> Result<Vec<Teacher>> {
        self.repository.list(school_id, filter, page.normalized())
    }
}

/// Service for managing a school's non-teaching staff.
pub struct StaffService {
    repository: Arc<dyn StaffRepositoryTrait>,
}

impl StaffService {
    pub fn new(repository: Arc<dyn StaffRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl StaffServiceTrait for StaffService {
    async fn create_staff(&self, school_id: &str, new_staff: NewStaff) -> Result<Staff> {
        debug!("Creating staff {} in school {}", new_staff.email, school_id);
        new_staff.validate()?;
        self.repository.create(school_id, new_staff).await
    }

    async fn update_staff(
        &self,
        school_id: &str,
        staff_id: &str,
        update: StaffUpdate,
    ) -> Result<Staff> {
        update.validate()?;
        self.repository.update(school_id, staff_id, update).await
    }

    async fn delete_staff(&self, school_id: &str, staff_id: &str) -> Result<usize> {
        self.repository.delete(school_id, staff_id).await
    }

    fn get_staff(&self, school_id: &str, staff_id: &str) -> Result<Staff> {
        self.repository.get_by_id(school_id, staff_id)
    }

    fn list_staff(&self, school_id: &str, filter: StaffFilter, page: Page) -> Result<Vec<Staff>> {
        self.repository.list(school_id, filter, page.normalized())
    }
}
