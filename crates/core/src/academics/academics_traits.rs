//! Academic record repository and service traits.

use async_trait::async_trait;

use super::academics_model::{
    AcademicRecord, AcademicRecordFilter, AcademicRecordUpdate, NewAcademicRecord,
};
use crate::errors::Result;
use crate::paging::Page;

/// Trait defining the contract for AcademicRecord repository operations.
#[async_trait]
pub trait AcademicRecordRepositoryTrait: Send + Sync {
    /// Creates a record after verifying the student belongs to the school.
    async fn create(
        &self,
        school_id: &str,
        new_record: NewAcademicRecord,
    ) -> Result<AcademicRecord>;

    async fn update(
        &self,
        school_id: &str,
        record_id: &str,
        update: AcademicRecordUpdate,
    ) -> Result<AcademicRecord>;

    async fn delete(&self, school_id: &str, record_id: &str) -> Result<usize>;

    fn get_by_id(&self, school_id: &str, record_id: &str) -> Result<AcademicRecord>;

    fn list(
        &self,
        school_id: &str,
        filter: AcademicRecordFilter,
        page: Page,
    ) -> Result<Vec<AcademicRecord>>;
}

/// Trait defining the contract for AcademicRecord service operations.
#[async_trait]
pub trait AcademicRecordServiceTrait: Send + Sync {
    async fn create_record(
        &self,
        school_id: &str,
        new_record: NewAcademicRecord,
    ) -> Result<AcademicRecord>;

    async fn update_record(
        &self,
        school_id: &str,
        record_id: &str,
        update: AcademicRecordUpdate,
    ) -> Result<AcademicRecord>;

    async fn delete_record(&self, school_id: &str, record_id: &str) -> Result<usize>;

    fn get_record(&self, school_id: &str, record_id: &str) -> Result<AcademicRecord>;

    fn list_records(
        &self,
        school_id: &str,
        filter: AcademicRecordFilter,
        page: Page,
    ) -> Result<Vec<AcademicRecord>>;
}
