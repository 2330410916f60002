//! Academics module - domain models, services, and traits.

mod academics_model;
mod academics_service;
mod academics_traits;

// Re-export the public interface
pub use academics_model::{
    AcademicRecord, AcademicRecordFilter, AcademicRecordUpdate, NewAcademicRecord,
};
pub use academics_service::AcademicRecordService;
pub use academics_traits::{AcademicRecordRepositoryTrait, AcademicRecordServiceTrait};
