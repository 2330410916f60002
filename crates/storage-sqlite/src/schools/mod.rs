pub mod model;
pub mod repository;

pub use model::{SchoolDB, SchoolStatsDB};
pub use repository::{SchoolRepository, SchoolStatsRepository};
