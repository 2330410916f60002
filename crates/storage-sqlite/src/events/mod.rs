pub mod model;
pub mod repository;

pub use model::EventDB;
pub use repository::EventRepository;
