pub mod model;
pub mod repository;

pub use model::{GradeDB, StudentDB};
pub use repository::{GradeRepository, StudentRepository};
