use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::schema::tasks;
use crate::schema::tasks::dsl::*;
use crate::tasks::tasks_model::{NewTask, Task};
use crate::tasks::tasks_traits::TaskRepositoryTrait;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct TaskRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TaskRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TaskRepository { pool, writer }
    }
}

#[async_trait]
impl TaskRepositoryTrait for TaskRepository {
    fn load_tasks(&self) -> Result<Vec<Task>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(tasks
            .filter(deleted.eq(false))
            .order(id.asc())
            .load::<Task>(&mut conn)?)
    }

    fn load_archived_tasks(&self) -> Result<Vec<Task>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(tasks
            .filter(deleted.eq(true))
            .order(id.asc())
            .load::<Task>(&mut conn)?)
    }

    async fn insert_new_task(&self, mut new_task: NewTask) -> Result<Task> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Task> {
                new_task.id = Some(Uuid::new_v4().to_string());

                Ok(diesel::insert_into(tasks::table)
                    .values(&new_task)
                    .returning(tasks::all_columns)
                    .get_result(conn)?)
            })
            .await
    }

    async fn update_task(&self, task_update: Task) -> Result<Task> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Task> {
                let task_id = task_update.id.clone();

                diesel::update(tasks.find(task_id.clone()))
                    .set(&task_update)
                    .execute(conn)?;

                Ok(tasks.find(task_id).first(conn)?)
            })
            .await
    }

    async fn set_task_completed(&self, task_id: &str, flag: bool) -> Result<Task> {
        let task_id = task_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Task> {
                diesel::update(tasks.find(task_id.clone()))
                    .set(completed.eq(flag))
                    .execute(conn)?;

                Ok(tasks.find(task_id).first(conn)?)
            })
            .await
    }

    async fn set_task_deleted(&self, task_id: &str, flag: bool) -> Result<Task> {
        let task_id = task_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Task> {
                diesel::update(tasks.find(task_id.clone()))
                    .set(deleted.eq(flag))
                    .execute(conn)?;

                Ok(tasks.find(task_id).first(conn)?)
            })
            .await
    }
}
