use diesel::prelude::*;
use diesel::Queryable;
use diesel::Selectable;
use serde::{Deserialize, Serialize};

use crate::cache::Keyed;
use crate::tasks::progress::TaskProgress;

#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub goal_id: String,
    pub time_estimate: String,
    pub ai_note: Option<String>,
    pub user_id: String,
    pub deleted: bool,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::tasks)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    pub goal_id: String,
    #[serde(default)]
    pub time_estimate: String,
    #[serde(default)]
    pub ai_note: Option<String>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub deleted: bool,
}

/// Result of flipping one task's completion flag: the persisted task, the
/// recomputed dashboard aggregate, and whether the celebration fires.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleOutcome {
    pub task: Task,
    pub progress: TaskProgress,
    pub celebrate: bool,
}

impl Keyed for Task {
    fn key(&self) -> &str {
        &self.id
    }
}
