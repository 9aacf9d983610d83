pub mod schedule_errors;
pub mod schedule_model;
pub mod schedule_provider;
pub mod schedule_service;

pub use schedule_errors::ScheduleError;
pub use schedule_model::{ScheduleDay, ScheduleSlot};
pub use schedule_provider::{ChatCompletionProvider, ScheduleProviderTrait};
pub use schedule_service::ScheduleService;
