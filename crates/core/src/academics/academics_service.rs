use log::debug;
use std::sync::Arc;

use super::academics_model::{
    AcademicRecord, AcademicRecordFilter, AcademicRecordUpdate, NewAcademicRecord,
};
use super::academics_traits::{AcademicRecordRepositoryTrait, AcademicRecordServiceTrait};
use crate::errors::Result;
use crate::paging::Page;

/// Service for managing a school's academic records.
pub struct AcademicRecordService {
    repository: Arc<dyn AcademicRecordRepositoryTrait>,
}

impl AcademicRecordService {
    pub fn new(repository: Arc<dyn AcademicRecordRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl AcademicRecordServiceTrait for AcademicRecordService {
    async fn create_record(
        &self,
        school_id: &str,
        new_record: NewAcademicRecord,
    ) -> Result<AcademicRecord> {
        debug!(
            "Creating academic record {} {}/{} for student {} in school {}",
            new_record.subject, new_record.term, new_record.year, new_record.student_id, school_id
        );
        new_record.validate()?;
        self.repository.create(school_id, new_record).await
    }

    async fn update_record(
        &self,
        school_id: &str,
        record_id: &str,
        update: AcademicRecordUpdate,
    ) -> Result<AcademicRecord> {
        update.validate()?;
        self.repository.update(school_id, record_id, update).await
    }

    async fn delete_record(&self, school_id: &str, record_id: &str) -> Result<usize> {
        self.repository.delete(school_id, record_id).await
    }

    fn get_record(&self, school_id: &str, record_id: &str) -> Result<AcademicRecord> {
        self.repository.get_by_id(school_id, record_id)
    }

    fn list_records(
        &self,
        school_id: &str,
        filter: AcademicRecordFilter,
        page: Page,
    ) -> Result<Vec<AcademicRecord>> {
        self.repository.list(school_id, filter, page.normalized())
    }
}
