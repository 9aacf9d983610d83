use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::goals::goals_model::{Goal, NewGoal};
use crate::goals::goals_traits::GoalRepositoryTrait;
use crate::schema::goals;
use crate::schema::goals::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn load_goals(&self) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(goals
            .filter(deleted.eq(false))
            .order(days_left.asc())
            .load::<Goal>(&mut conn)?)
    }

    fn load_archived_goals(&self) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(goals
            .filter(deleted.eq(true))
            .order(days_left.asc())
            .load::<Goal>(&mut conn)?)
    }

    async fn insert_new_goal(&self, mut new_goal: NewGoal) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                new_goal.id = Some(Uuid::new_v4().to_string());

                Ok(diesel::insert_into(goals::table)
                    .values(&new_goal)
                    .returning(goals::all_columns)
                    .get_result(conn)?)
            })
            .await
    }

    async fn update_goal(&self, goal_update: Goal) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let goal_id = goal_update.id.clone();

                diesel::update(goals.find(goal_id.clone()))
                    .set(&goal_update)
                    .execute(conn)?;

                Ok(goals.find(goal_id.clone()).first(conn)?)
            })
            .await
    }

    async fn set_goal_deleted(&self, goal_id: &str, flag: bool) -> Result<Goal> {
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                diesel::update(goals.find(goal_id.clone()))
                    .set(deleted.eq(flag))
                    .execute(conn)?;

                Ok(goals.find(goal_id.clone()).first(conn)?)
            })
            .await
    }
}
