pub mod events_model;
pub mod events_repository;
pub mod events_service;
pub mod events_traits;

pub use events_model::{Event, EventDraft, EventForm, EventType, NewEvent, Recurrence};
pub use events_repository::EventRepository;
pub use events_service::EventService;
pub use events_traits::{EventRepositoryTrait, EventServiceTrait};
