//! Events module - domain models, services, and traits.

mod events_model;
mod events_service;
mod events_traits;

#[cfg(test)]
mod events_model_tests;

// Re-export the public interface
pub use events_model::{Event, EventFilter, EventUpdate, NewEvent};
pub use events_service::EventService;
pub use events_traits::{EventRepositoryTrait, EventServiceTrait};
