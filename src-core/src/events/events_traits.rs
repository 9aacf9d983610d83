use crate::errors::Result;
use crate::events::events_model::{Event, EventDraft, NewEvent};
use async_trait::async_trait;

/// Trait for event repository operations
#[async_trait]
pub trait EventRepositoryTrait: Send + Sync {
    fn load_events(&self) -> Result<Vec<Event>>;
    fn load_archived_events(&self) -> Result<Vec<Event>>;
    async fn insert_new_event(&self, new_event: NewEvent) -> Result<Event>;
    async fn update_event(&self, event_update: Event) -> Result<Event>;
    async fn reschedule_event(
        &self,
        event_id: &str,
        start_time: String,
        end_time: Option<String>,
    ) -> Result<Event>;
    async fn set_event_deleted(&self, event_id: &str, deleted: bool) -> Result<Event>;
}

/// Trait for event service operations
#[async_trait]
pub trait EventServiceTrait: Send + Sync {
    fn get_events(&self) -> Result<Vec<Event>>;
    fn get_archived_events(&self) -> Result<Vec<Event>>;
    /// The in-memory active view as last patched, without touching the store.
    fn cached_events(&self) -> Vec<Event>;
    async fn create_event(&self, draft: EventDraft) -> Result<Event>;
    async fn update_event(&self, event_update: Event) -> Result<Event>;
    async fn reschedule_event(
        &self,
        event_id: &str,
        start_time: String,
        end_time: Option<String>,
    ) -> Result<Event>;
    async fn archive_event(&self, event_id: &str) -> Result<Event>;
    async fn restore_event(&self, event_id: &str) -> Result<Event>;
}
