//! Enrollment module - grade and student models, services, and traits.

mod enrollment_model;
mod enrollment_service;
mod enrollment_traits;

#[cfg(test)]
mod enrollment_model_tests;

// Re-export the public interface
pub use enrollment_model::{
    Grade, GradeFilter, GradeUpdate, NewGrade, NewStudent, Student, StudentFilter, StudentUpdate,
};
pub use enrollment_service::{GradeService, StudentService};
pub use enrollment_traits::{
    GradeRepositoryTrait, GradeServiceTrait, StudentRepositoryTrait, StudentServiceTrait,
};
