//! Fee repository and service traits.

use async_trait::async_trait;

use super::fees_model::{Fee, FeeFilter, FeeUpdate, NewFee};
use crate::errors::Result;
use crate::paging::Page;

/// Trait defining the contract for Fee repository operations.
#[async_trait]
pub trait FeeRepositoryTrait: Send + Sync {
    /// Creates a fee after verifying the student belongs to the school.
    async fn create(&self, school_id: &str, new_fee: NewFee) -> Result<Fee>;

    async fn update(&self, school_id: &str, fee_id: &str, update: FeeUpdate) -> Result<Fee>;

    /// Marks a fee as paid.
    async fn mark_paid(&self, school_id: &str, fee_id: &str) -> Result<Fee>;

    async fn delete(&self, school_id: &str, fee_id: &str) -> Result<usize>;

    fn get_by_id(&self, school_id: &str, fee_id: &str) -> Result<Fee>;

    fn list(&self, school_id: &str, filter: FeeFilter, page: Page) -> Result<Vec<Fee>>;
}

/// Trait defining the contract for Fee service operations.
#[async_trait]
pub trait FeeServiceTrait: Send + Sync {
    async fn create_fee(&self, school_id: &str, new_fee: NewFee) -> Result<Fee>;

    async fn update_fee(&self, school_id: &str, fee_id: &str, update: FeeUpdate) -> Result<Fee>;

    async fn mark_fee_paid(&self, school_id: &str, fee_id: &str) -> Result<Fee>;

    async fn delete_fee(&self, school_id: &str, fee_id: &str) -> Result<usize>;

    fn get_fee(&self, school_id: &str, fee_id: &str) -> Result<Fee>;

    fn list_fees(&self, school_id: &str, filter: FeeFilter, page: Page) -> Result<Vec<Fee>>;
}
