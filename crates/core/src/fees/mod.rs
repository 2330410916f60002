//! Fees module - domain models, services, and traits.

mod fees_model;
mod fees_service;
mod fees_traits;

// Re-export the public interface
pub use fees_model::{Fee, FeeFilter, FeeUpdate, NewFee};
pub use fees_service::FeeService;
pub use fees_traits::{FeeRepositoryTrait, FeeServiceTrait};
