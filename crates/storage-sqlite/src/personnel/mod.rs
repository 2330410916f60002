pub mod model;
pub mod repository;

pub use model::{StaffDB, TeacherDB};
pub use repository::{StaffRepository, TeacherRepository};
