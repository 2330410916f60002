pub mod model;
pub mod repository;

pub use model::AcademicRecordDB;
pub use repository::AcademicRecordRepository;
