pub mod coach_model;
pub mod coach_service;

pub use coach_model::{CoachMessage, CoachMessageKind};
pub use coach_service::CoachService;
