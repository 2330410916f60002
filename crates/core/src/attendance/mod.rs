//! Attendance module - domain models, services, and traits.

mod attendance_model;
mod attendance_service;
mod attendance_traits;

// Re-export the public interface
pub use attendance_model::{
    AttendanceFilter, AttendanceRecord, AttendanceUpdate, NewAttendanceRecord,
};
pub use attendance_service::AttendanceService;
pub use attendance_traits::{AttendanceRepositoryTrait, AttendanceServiceTrait};
