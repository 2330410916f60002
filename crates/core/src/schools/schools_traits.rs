//! School repository and service traits.
//!
//! These traits define the contract for school operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::schools_model::{
    NewSchool, School, SchoolFilter, SchoolStats, SchoolStatsUpdate, SchoolUpdate,
};
use crate::errors::Result;
use crate::paging::Page;

/// Trait defining the contract for School repository operations.
///
/// The school is the tenant root, so unlike every other repository in the
/// store its operations take no separate tenant argument. Implementations
/// handle transaction management internally: uniqueness checks and the
/// write they guard always execute atomically.
#[async_trait]
pub trait SchoolRepositoryTrait: Send + Sync {
    /// Creates a new school together with its zeroed stats row.
    async fn create(&self, new_school: NewSchool) -> Result<School>;

    /// Applies a partial update, re-validating touched unique fields.
    async fn update(&self, school_id: &str, update: SchoolUpdate) -> Result<School>;

    /// Deletes a school.
    ///
    /// Without `cascade` the delete is rejected while dependent records
    /// exist. With `cascade` the school's full dependent closure is removed
    /// in one transaction. Returns the number of deleted rows.
    async fn delete(&self, school_id: &str, cascade: bool) -> Result<usize>;

    /// Retrieves a school by its ID.
    fn get_by_id(&self, school_id: &str) -> Result<School>;

    /// Lists schools, newest-created last.
    fn list(&self, filter: SchoolFilter, page: Page) -> Result<Vec<School>>;
}

/// Trait defining the contract for SchoolStats repository operations.
#[async_trait]
pub trait SchoolStatsRepositoryTrait: Send + Sync {
    /// Returns the current stats snapshot for a school.
    fn get(&self, school_id: &str) -> Result<SchoolStats>;

    /// Overwrites parts of the stats snapshot.
    async fn update(&self, school_id: &str, update: SchoolStatsUpdate) -> Result<SchoolStats>;

    /// Recomputes the snapshot from the school's current records and
    /// persists it, all in one transaction.
    async fn recompute(&self, school_id: &str) -> Result<SchoolStats>;
}

/// Trait defining the contract for School service operations.
#[async_trait]
pub trait SchoolServiceTrait: Send + Sync {
    async fn create_school(&self, new_school: NewSchool) -> Result<School>;

    async fn update_school(&self, school_id: &str, update: SchoolUpdate) -> Result<School>;

    async fn delete_school(&self, school_id: &str, cascade: bool) -> Result<usize>;

    fn get_school(&self, school_id: &str) -> Result<School>;

    fn list_schools(&self, filter: SchoolFilter, page: Page) -> Result<Vec<School>>;

    fn get_stats(&self, school_id: &str) -> Result<SchoolStats>;

    async fn update_stats(&self, school_id: &str, update: SchoolStatsUpdate)
        -> Result<SchoolStats>;

    async fn recompute_stats(&self, school_id: &str) -> Result<SchoolStats>;
}
