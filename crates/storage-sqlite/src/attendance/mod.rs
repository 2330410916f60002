pub mod model;
pub mod repository;

pub use model::AttendanceRecordDB;
pub use repository::AttendanceRepository;
