use log::debug;
use std::sync::Arc;

use super::attendance_model::{
    AttendanceFilter, AttendanceRecord, AttendanceUpdate, NewAttendanceRecord,
};
use super::attendance_traits::{AttendanceRepositoryTrait, AttendanceServiceTrait};
use crate::errors::Result;
use crate::paging::Page;

/// Service for managing a school's attendance records.
pub struct AttendanceService {
    repository: Arc<dyn AttendanceRepositoryTrait>,
}

impl AttendanceService {
    pub fn new(repository: Arc<dyn AttendanceRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl AttendanceServiceTrait for AttendanceService {
    async fn record_attendance(
        &self,
        school_id: &str,
        new_record: NewAttendanceRecord,
    ) -> Result<AttendanceRecord> {
        debug!(
            "Recording attendance for student {} on {} in school {}",
            new_record.student_id, new_record.date, school_id
        );
        new_record.validate()?;
        self.repository.create(school_id, new_record).await
    }

    async fn update_attendance(
        &self,
        school_id: &str,
        record_id: &str,
        update: AttendanceUpdate,
    ) -> Result<AttendanceRecord> {
        self.repository.update(school_id, record_id, update).await
    }

    async fn delete_attendance(&self, school_id: &str, record_id: &str) -> Result<usize> {
        self.repository.delete(school_id, record_id).await
    }

    fn get_attendance(&self, school_id: &str, record_id: &str) -> Result<AttendanceRecord> {
        self.repository.get_by_id(school_id, record_id)
    }

    fn list_attendance(
        &self,
        school_id: &str,
        filter: AttendanceFilter,
        page: Page,
    ) -> Result<Vec<AttendanceRecord>> {
        self.repository.list(school_id, filter, page.normalized())
    }
}
