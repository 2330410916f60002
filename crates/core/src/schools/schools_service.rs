use log::debug;
use std::sync::Arc;

use super::schools_model::{
    NewSchool, School, SchoolFilter, SchoolStats, SchoolStatsUpdate, SchoolUpdate,
};
use super::schools_traits::{
    SchoolRepositoryTrait, SchoolServiceTrait, SchoolStatsRepositoryTrait,
};
use crate::errors::Result;
use crate::paging::Page;

/// Service for managing schools and their stats snapshots.
pub struct SchoolService {
    repository: Arc<dyn SchoolRepositoryTrait>,
    stats_repository: Arc<dyn SchoolStatsRepositoryTrait>,
}

impl SchoolService {
    /// Creates a new SchoolService instance.
    pub fn new(
        repository: Arc<dyn SchoolRepositoryTrait>,
        stats_repository: Arc<dyn SchoolStatsRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            stats_repository,
        }
    }
}

#[async_trait::async_trait]
impl SchoolServiceTrait for SchoolService {
    async fn create_school(&self, new_school: NewSchool) -> Result<School> {
        debug!(
            "Creating school code={} type={:?}",
            new_school.code, new_school.school_type
        );
        new_school.validate()?;
        self.repository.create(new_school).await
    }

    async fn update_school(&self, school_id: &str, update: SchoolUpdate) -> Result<School> {
        update.validate()?;
        self.repository.update(school_id, update).await
    }

    async fn delete_school(&self, school_id: &str, cascade: bool) -> Result<usize> {
        debug!("Deleting school {} cascade={}", school_id, cascade);
        self.repository.delete(school_id, cascade).await
    }

    fn get_school(&self, school_id: &str) -> Result<School> {
        self.repository.get_by_id(school_id)
    }

    fn list_schools(&self, filter: SchoolFilter, page: Page) -> Result<Vec<School>> {
        self.repository.list(filter, page.normalized())
    }

    fn get_stats(&self, school_id: &str) -> Result<SchoolStats> {
        self.stats_repository.get(school_id)
    }

    async fn update_stats(
        &self,
        school_id: &str,
        update: SchoolStatsUpdate,
    ) -> Result<SchoolStats> {
        update.validate()?;
        self.stats_repository.update(school_id, update).await
    }

    async fn recompute_stats(&self, school_id: &str) -> Result<SchoolStats> {
        debug!("Recomputing stats for school {}", school_id);
        self.stats_repository.recompute(school_id).await
    }
}
