//! Personnel module - teacher and staff models, services, and traits.

mod personnel_model;
mod personnel_service;
mod personnel_traits;

// Re-export the public interface
pub use personnel_model::{
    NewStaff, NewTeacher, Staff, StaffFilter, StaffUpdate, Teacher, TeacherFilter, TeacherUpdate,
};
pub use personnel_service::{StaffService, TeacherService};
pub use personnel_traits::{
    StaffRepositoryTrait, StaffServiceTrait, TeacherRepositoryTrait, TeacherServiceTrait,
};
