use crate::errors::Result;
use crate::tasks::progress::TaskProgress;
use crate::tasks::tasks_model::{NewTask, Task, ToggleOutcome};
use async_trait::async_trait;

/// Trait for task repository operations
#[async_trait]
pub trait TaskRepositoryTrait: Send + Sync {
    fn load_tasks(&self) -> Result<Vec<Task>>;
    fn load_archived_tasks(&self) -> Result<Vec<Task>>;
    async fn insert_new_task(&self, new_task: NewTask) -> Result<Task>;
    async fn update_task(&self, task_update: Task) -> Result<Task>;
    async fn set_task_completed(&self, task_id: &str, completed: bool) -> Result<Task>;
    async fn set_task_deleted(&self, task_id: &str, deleted: bool) -> Result<Task>;
}

/// Trait for task service operations
#[async_trait]
pub trait TaskServiceTrait: Send + Sync {
    fn get_tasks(&self) -> Result<Vec<Task>>;
    fn get_archived_tasks(&self) -> Result<Vec<Task>>;
    fn get_progress(&self) -> Result<TaskProgress>;
    async fn create_task(&self, new_task: NewTask) -> Result<Task>;
    async fn update_task(&self, task_update: Task) -> Result<Task>;
    async fn toggle_task(&self, task_id: &str) -> Result<ToggleOutcome>;
    async fn archive_task(&self, task_id: &str) -> Result<Task>;
    async fn restore_task(&self, task_id: &str) -> Result<Task>;
}
