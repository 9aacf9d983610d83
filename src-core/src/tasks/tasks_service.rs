use crate::cache::ArchiveView;
use crate::errors::{Result, ValidationError};
use crate::tasks::progress::{CompletionLatch, TaskProgress};
use crate::tasks::tasks_model::{NewTask, Task, ToggleOutcome};
use crate::tasks::tasks_traits::{TaskRepositoryTrait, TaskServiceTrait};
use async_trait::async_trait;
use diesel::result::Error as DieselError;
use std::sync::Arc;

pub struct TaskService<T: TaskRepositoryTrait> {
    task_repo: Arc<T>,
    view: ArchiveView<Task>,
    celebration: CompletionLatch,
}

impl<T: TaskRepositoryTrait> TaskService<T> {
    pub fn new(task_repo: Arc<T>) -> Self {
        TaskService {
            task_repo,
            view: ArchiveView::new(),
            celebration: CompletionLatch::new(),
        }
    }
}

#[async_trait]
impl<T: TaskRepositoryTrait + Send + Sync> TaskServiceTrait for TaskService<T> {
    fn get_tasks(&self) -> Result<Vec<Task>> {
        let loaded = self.task_repo.load_tasks()?;
        self.view.replace_active(loaded.clone());
        Ok(loaded)
    }

    fn get_archived_tasks(&self) -> Result<Vec<Task>> {
        let loaded = self.task_repo.load_archived_tasks()?;
        self.view.replace_archived(loaded.clone());
        Ok(loaded)
    }

    fn get_progress(&self) -> Result<TaskProgress> {
        let tasks = self.task_repo.load_tasks()?;
        Ok(TaskProgress::from_tasks(&tasks))
    }

    async fn create_task(&self, new_task: NewTask) -> Result<Task> {
        if new_task.text.trim().is_empty() {
            return Err(ValidationError::MissingField("text".to_string()).into());
        }

        let created = self.task_repo.insert_new_task(new_task).await?;
        self.view.active().upsert(created.clone());
        Ok(created)
    }

    async fn update_task(&self, task_update: Task) -> Result<Task> {
        let updated = self.task_repo.update_task(task_update).await?;
        self.view.active().patch(updated.clone());
        Ok(updated)
    }

    async fn toggle_task(&self, task_id: &str) -> Result<ToggleOutcome> {
        // Owning goal and current state are looked up by scanning the list.
        let mut tasks = self.task_repo.load_tasks()?;
        let current = tasks
            .iter()
            .find(|t| t.id == task_id)
            .ok_or(DieselError::NotFound)?
            .clone();

        let updated = self
            .task_repo
            .set_task_completed(task_id, !current.completed)
            .await?;
        self.view.active().patch(updated.clone());

        if let Some(entry) = tasks.iter_mut().find(|t| t.id == task_id) {
            *entry = updated.clone();
        }
        let progress = TaskProgress::from_tasks(&tasks);
        let celebrate = self.celebration.observe(progress.all_complete());

        Ok(ToggleOutcome {
            task: updated,
            progress,
            celebrate,
        })
    }

    async fn archive_task(&self, task_id: &str) -> Result<Task> {
        let archived = self.task_repo.set_task_deleted(task_id, true).await?;
        self.view.apply_archive(archived.clone());
        Ok(archived)
    }

    async fn restore_task(&self, task_id: &str) -> Result<Task> {
        let restored = self.task_repo.set_task_deleted(task_id, false).await?;
        self.view.apply_restore(restored.clone());
        Ok(restored)
    }
}
