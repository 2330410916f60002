//! Attendance repository and service traits.

use async_trait::async_trait;

use super::attendance_model::{
    AttendanceFilter, AttendanceRecord, AttendanceUpdate, NewAttendanceRecord,
};
use crate::errors::Result;
use crate::paging::Page;

/// Trait defining the contract for AttendanceRecord repository operations.
#[async_trait]
pub trait AttendanceRepositoryTrait: Send + Sync {
    /// Records attendance after verifying student and teacher belong to the
    /// school and no record exists for the same (date, student) pair.
    async fn create(&self, school_id: &str, new_record: NewAttendanceRecord)
        -> Result<AttendanceRecord>;

    async fn update(
        &self,
        school_id: &str,
        record_id: &str,
        update: AttendanceUpdate,
    ) -> Result<AttendanceRecord>;

    async fn delete(&self, school_id: &str, record_id: &str) -> Result<usize>;

    fn get_by_id(&self, school_id: &str, record_id: &str) -> Result<AttendanceRecord>;

    fn list(
        &self,
        school_id: &str,
        filter: AttendanceFilter,
        page: Page,
    ) -> Result<Vec<AttendanceRecord>>;
}

/// Trait defining the contract for AttendanceRecord service operations.
#[async_trait]
pub trait AttendanceServiceTrait: Send + Sync {
    async fn record_attendance(
        &self,
        school_id: &str,
        new_record: NewAttendanceRecord,
    ) -> Result<AttendanceRecord>;

    async fn update_attendance(
        &self,
        school_id: &str,
        record_id: &str,
        update: AttendanceUpdate,
    ) -> Result<AttendanceRecord>;

    async fn delete_attendance(&self, school_id: &str, record_id: &str) -> Result<usize>;

    fn get_attendance(&self, school_id: &str, record_id: &str) -> Result<AttendanceRecord>;

    fn list_attendance(
        &self,
        school_id: &str,
        filter: AttendanceFilter,
        page: Page,
    ) -> Result<Vec<AttendanceRecord>>;
}
