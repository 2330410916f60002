pub mod model;
pub mod repository;

pub use model::FeeDB;
pub use repository::FeeRepository;
