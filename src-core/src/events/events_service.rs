use crate::cache::ArchiveView;
use crate::errors::Result;
use crate::events::events_model::{Event, EventDraft};
use crate::events::events_traits::{EventRepositoryTrait, EventServiceTrait};
use async_trait::async_trait;
use std::sync::Arc;

pub struct EventService<T: EventRepositoryTrait> {
    event_repo: Arc<T>,
    view: ArchiveView<Event>,
}

impl<T: EventRepositoryTrait> EventService<T> {
    pub fn new(event_repo: Arc<T>) -> Self {
        EventService {
            event_repo,
            view: ArchiveView::new(),
        }
    }
}

#[async_trait]
impl<T: EventRepositoryTrait + Send + Sync> EventServiceTrait for EventService<T> {
    fn get_events(&self) -> Result<Vec<Event>> {
        let loaded = self.event_repo.load_events()?;
        self.view.replace_active(loaded.clone());
        Ok(loaded)
    }

    fn get_archived_events(&self) -> Result<Vec<Event>> {
        let loaded = self.event_repo.load_archived_events()?;
        self.view.replace_archived(loaded.clone());
        Ok(loaded)
    }

    fn cached_events(&self) -> Vec<Event> {
        self.view.active().snapshot()
    }

    async fn create_event(&self, draft: EventDraft) -> Result<Event> {
        let new_event = draft.into_new_event()?;
        let created = self.event_repo.insert_new_event(new_event).await?;
        self.view.active().upsert(created.clone());
        Ok(created)
    }

    async fn update_event(&self, event_update: Event) -> Result<Event> {
        let updated = self.event_repo.update_event(event_update).await?;
        self.view.active().patch(updated.clone());
        Ok(updated)
    }

    /// Drag/resize write-through. The cached view is patched before the
    /// store write; if the write fails the patch is reverted, leaving the
    /// view equal to the last fetched snapshot.
    async fn reschedule_event(
        &self,
        event_id: &str,
        start_time: String,
        end_time: Option<String>,
    ) -> Result<Event> {
        let prior = self.view.active().patch_with(event_id, |e| {
            e.start_time = start_time.clone();
            e.end_time = end_time.clone();
        });

        match self
            .event_repo
            .reschedule_event(event_id, start_time, end_time)
            .await
        {
            Ok(updated) => {
                self.view.active().patch(updated.clone());
                Ok(updated)
            }
            Err(err) => {
                if let Some(previous) = prior {
                    self.view.active().patch(previous);
                }
                Err(err)
            }
        }
    }

    async fn archive_event(&self, event_id: &str) -> Result<Event> {
        let archived = self.event_repo.set_event_deleted(event_id, true).await?;
        self.view.apply_archive(archived.clone());
        Ok(archived)
    }

    async fn restore_event(&self, event_id: &str) -> Result<Event> {
        let restored = self.event_repo.set_event_deleted(event_id, false).await?;
        self.view.apply_restore(restored.clone());
        Ok(restored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{DatabaseError, Error};
    use crate::events::events_model::NewEvent;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn sample_event(id: &str, start: &str) -> Event {
        Event {
            id: id.to_string(),
            title: format!("event {}", id),
            start_time: start.to_string(),
            end_time: None,
            all_day: false,
            color: "#06b6d4".to_string(),
            event_type: "meeting".to_string(),
            recurrence: "none".to_string(),
            user_id: "u1".to_string(),
            deleted: false,
        }
    }

    /// Repository stub whose writes can be switched to fail, for exercising
    /// the revert-on-failure path without a database.
    struct FlakyRepository {
        rows: Vec<Event>,
        fail_writes: AtomicBool,
    }

    impl FlakyRepository {
        fn new(rows: Vec<Event>) -> Self {
            FlakyRepository {
                rows,
                fail_writes: AtomicBool::new(false),
            }
        }

        fn write_error() -> Error {
            Error::Database(DatabaseError::MigrationFailed("disk unplugged".to_string()))
        }
    }

    #[async_trait]
    impl EventRepositoryTrait for FlakyRepository {
        fn load_events(&self) -> Result<Vec<Event>> {
            Ok(self.rows.clone())
        }

        fn load_archived_events(&self) -> Result<Vec<Event>> {
            Ok(Vec::new())
        }

        async fn insert_new_event(&self, _new_event: NewEvent) -> Result<Event> {
            unimplemented!("not used in these tests")
        }

        async fn update_event(&self, _event_update: Event) -> Result<Event> {
            unimplemented!("not used in these tests")
        }

        async fn reschedule_event(
            &self,
            event_id: &str,
            start_time: String,
            end_time: Option<String>,
        ) -> Result<Event> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(Self::write_error());
            }
            let mut updated = self
                .rows
                .iter()
                .find(|e| e.id == event_id)
                .cloned()
                .ok_or(diesel::result::Error::NotFound)?;
            updated.start_time = start_time;
            updated.end_time = end_time;
            Ok(updated)
        }

        async fn set_event_deleted(&self, _event_id: &str, _deleted: bool) -> Result<Event> {
            unimplemented!("not used in these tests")
        }
    }

    #[tokio::test]
    async fn failed_reschedule_leaves_view_at_last_snapshot() {
        let repo = Arc::new(FlakyRepository::new(vec![
            sample_event("e1", "2024-01-10T09:00"),
            sample_event("e2", "2024-01-11T10:00"),
        ]));
        let service = EventService::new(repo.clone());

        let snapshot = service.get_events().unwrap();
        repo.fail_writes.store(true, Ordering::SeqCst);

        let result = service
            .reschedule_event("e1", "2024-01-12T09:00".to_string(), None)
            .await;
        assert!(result.is_err());
        assert_eq!(service.cached_events(), snapshot);
    }

    #[tokio::test]
    async fn successful_reschedule_patches_only_the_moved_event() {
        let repo = Arc::new(FlakyRepository::new(vec![
            sample_event("e1", "2024-01-10T09:00"),
            sample_event("e2", "2024-01-11T10:00"),
        ]));
        let service = EventService::new(repo);

        service.get_events().unwrap();
        let moved = service
            .reschedule_event(
                "e1",
                "2024-01-12T09:00".to_string(),
                Some("2024-01-12T10:00".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(moved.start_time, "2024-01-12T09:00");
        let cached = service.cached_events();
        assert_eq!(cached[0].start_time, "2024-01-12T09:00");
        assert_eq!(cached[1].start_time, "2024-01-11T10:00");
    }
}
