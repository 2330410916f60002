//! Teacher and staff repository and service traits.

use async_trait::async_trait;

use super::personnel_model::{
    NewStaff, NewTeacher, Staff, StaffFilter, StaffUpdate, Teacher, TeacherFilter, TeacherUpdate,
};
use crate::errors::Result;
use crate::paging::Page;

/// Trait defining the contract for Teacher repository operations.
#[async_trait]
pub trait TeacherRepositoryTrait: Send + Sync {
    async fn create(&self, school_id: &str, new_teacher: NewTeacher) -> Result<Teacher>;

    async fn update(
        &self,
        school_id: &str,
        teacher_id: &str,
        update: TeacherUpdate,
    ) -> Result<Teacher>;

    /// Deletes a teacher.
    ///
    /// A teacher that is still homeroom teacher of any grade cannot be
    /// deleted; reassign the grades first. With `cascade` the teacher's
    /// attendance records are removed along with the teacher.
    async fn delete(&self, school_id: &str, teacher_id: &str, cascade: bool) -> Result<usize>;

    fn get_by_id(&self, school_id: &str, teacher_id: &str) -> Result<Teacher>;

    fn list(&self, school_id: &str, filter: TeacherFilter, page: Page) -> Result<Vec<Teacher>>;
}

/// Trait defining the contract for Staff repository operations.
#[async_trait]
pub trait StaffRepositoryTrait: Send + Sync {
    async fn create(&self, school_id: &str, new_staff: NewStaff) -> Result<Staff>;

    async fn update(&self, school_id: &str, staff_id: &str, update: StaffUpdate) -> Result<Staff>;

    async fn delete(&self, school_id: &str, staff_id: &str) -> Result<usize>;

    fn get_by_id(&self, school_id: &str, staff_id: &str) -> Result<Staff>;

    fn list(&self, school_id: &str, filter: StaffFilter, page: Page) -> Result<Vec<Staff>>;
}

/// Trait defining the contract for Teacher service operations.
#[async_trait]
pub trait TeacherServiceTrait: Send + Sync {
    async fn create_teacher(&self, school_id: &str, new_teacher: NewTeacher) -> Result<Teacher>;

    async fn update_teacher(
        &self,
        school_id: &str,
        teacher_id: &str,
        update: TeacherUpdate,
    ) -> Result<Teacher>;

    async fn delete_teacher(
        &self,
        school_id: &str,
        teacher_id: &str,
        cascade: bool,
    ) -> Result<usize>;

    fn get_teacher(&self, school_id: &str, teacher_id: &str) -> Result<Teacher>;

    fn list_teachers(
        &self,
        school_id: &str,
        filter: TeacherFilter,
        page: Page,
    ) -> Result<Vec<Teacher>>;
}

/// Trait defining the contract for Staff service operations.
#[async_trait]
pub trait StaffServiceTrait: Send + Sync {
    async fn create_staff(&self, school_id: &str, new_staff: NewStaff) -> Result<Staff>;

    async fn update_staff(
        &self,
        school_id: &str,
        staff_id: &str,
        update: StaffUpdate,
    ) -> Result<Staff>;

    async fn delete_staff(&self, school_id: &str, staff_id: &str) -> Result<usize>;

    fn get_staff(&self, school_id: &str, staff_id: &str) -> Result<Staff>;

    fn list_staff(&self, school_id: &str, filter: StaffFilter, page: Page) -> Result<Vec<Staff>>;
}
