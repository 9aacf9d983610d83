use diesel::prelude::*;
use diesel::Queryable;
use diesel::Selectable;
use serde::{Deserialize, Serialize};

use crate::cache::Keyed;

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
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub timeline: String,
    pub progress: i32,
    pub status: String,
    pub category: String,
    pub current_phase: String,
    pub next_milestone: String,
    pub days_left: i32,
    pub user_id: String,
    pub deleted: bool,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub id: Option<String>,
    pub title: String,
    pub timeline: String,
    #[serde(default)]
    pub progress: i32,
    pub status: String,
    pub category: String,
    pub current_phase: String,
    pub next_milestone: String,
    #[serde(default)]
    pub days_left: i32,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub deleted: bool,
}

impl Keyed for Goal {
    fn key(&self) -> &str {
        &self.id
    }
}
