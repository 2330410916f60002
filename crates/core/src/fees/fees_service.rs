use log::debug;
use std::sync::Arc;

use super::fees_model::{Fee, FeeFilter, FeeUpdate, NewFee};
use super::fees_traits::{FeeRepositoryTrait, FeeServiceTrait};
use crate::errors::Result;
use crate::paging::Page;

/// Service for managing a school's fees.
pub struct FeeService {
    repository: Arc<dyn FeeRepositoryTrait>,
}

impl FeeService {
    pub fn new(repository: Arc<dyn FeeRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl FeeServiceTrait for FeeService {
    async fn create_fee(&self, school_id: &str, new_fee: NewFee) -> Result<Fee> {
        debug!(
            "Creating fee of {} for student {} in school {}",
            new_fee.amount, new_fee.student_id, school_id
        );
        new_fee.validate()?;
        self.repository.create(school_id, new_fee).await
    }

    async fn update_fee(&self, school_id: &str, fee_id: &str, update: FeeUpdate) -> Result<Fee> {
        update.validate()?;
        self.repository.update(school_id, fee_id, update).await
    }

    async fn mark_fee_paid(&self, school_id: &str, fee_id: &str) -> Result<Fee> {
        debug!("Marking fee {} paid in school {}", fee_id, school_id);
        self.repository.mark_paid(school_id, fee_id).await
    }

    async fn delete_fee(&self, school_id: &str, fee_id: &str) -> Result<usize> {
        self.repository.delete(school_id, fee_id).await
    }

    fn get_fee(&self, school_id: &str, fee_id: &str) -> Result<Fee> {
        self.repository.get_by_id(school_id, fee_id)
    }

    fn list_fees(&self, school_id: &str, filter: FeeFilter, page: Page) -> Result<Vec<Fee>> {
        self.repository.list(school_id, filter, page.normalized())
    }
}
