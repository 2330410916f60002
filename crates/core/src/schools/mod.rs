//! Schools module - tenant root models, services, and traits.

mod schools_model;
mod schools_service;
mod schools_traits;

#[cfg(test)]
mod schools_model_tests;

// Re-export the public interface
pub use schools_model::{
    NewSchool, School, SchoolFilter, SchoolStats, SchoolStatsUpdate, SchoolType, SchoolUpdate,
};
pub use schools_service::SchoolService;
pub use schools_traits::{SchoolRepositoryTrait, SchoolServiceTrait, SchoolStatsRepositoryTrait};
