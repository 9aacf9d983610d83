use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::events::events_model::{Event, NewEvent};
use crate::events::events_traits::EventRepositoryTrait;
use crate::schema::events;
use crate::schema::events::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct EventRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl EventRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        EventRepository { pool, writer }
    }
}

#[async_trait]
impl EventRepositoryTrait for EventRepository {
    fn load_events(&self) -> Result<Vec<Event>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(events
            .filter(deleted.eq(false))
            .order(start_time.asc())
            .load::<Event>(&mut conn)?)
    }

    fn load_archived_events(&self) -> Result<Vec<Event>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(events
            .filter(deleted.eq(true))
            .order(start_time.asc())
            .load::<Event>(&mut conn)?)
    }

    async fn insert_new_event(&self, mut new_event: NewEvent) -> Result<Event> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Event> {
                new_event.id = Some(Uuid::new_v4().to_string());

                Ok(diesel::insert_into(events::table)
                    .values(&new_event)
                    .returning(events::all_columns)
                    .get_result(conn)?)
            })
            .await
    }

    async fn update_event(&self, event_update: Event) -> Result<Event> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Event> {
                let event_id = event_update.id.clone();

                diesel::update(events.find(event_id.clone()))
                    .set(&event_update)
                    .execute(conn)?;

                Ok(events.find(event_id).first(conn)?)
            })
            .await
    }

    async fn reschedule_event(
        &self,
        event_id: &str,
        new_start: String,
        new_end: Option<String>,
    ) -> Result<Event> {
        let event_id = event_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Event> {
                diesel::update(events.find(event_id.clone()))
                    .set((start_time.eq(new_start), end_time.eq(new_end)))
                    .execute(conn)?;

                Ok(events.find(event_id).first(conn)?)
            })
            .await
    }

    async fn set_event_deleted(&self, event_id: &str, flag: bool) -> Result<Event> {
        let event_id = event_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Event> {
                diesel::update(events.find(event_id.clone()))
                    .set(deleted.eq(flag))
                    .execute(conn)?;

                Ok(events.find(event_id).first(conn)?)
            })
            .await
    }
}
