use crate::cache::ArchiveView;
use crate::errors::{Result, ValidationError};
use crate::goals::goals_model::{Goal, NewGoal};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use async_trait::async_trait;
use std::sync::Arc;

pub struct GoalService<T: GoalRepositoryTrait> {
    goal_repo: Arc<T>,
    view: ArchiveView<Goal>,
}

impl<T: GoalRepositoryTrait> GoalService<T> {
    pub fn new(goal_repo: Arc<T>) -> Self {
        GoalService {
            goal_repo,
            view: ArchiveView::new(),
        }
    }

    fn validate_progress(value: i32) -> Result<()> {
        if !(0..=100).contains(&value) {
            return Err(ValidationError::InvalidInput(format!(
                "progress must be between 0 and 100, got {}",
                value
            ))
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl<T: GoalRepositoryTrait + Send + Sync> GoalServiceTrait for GoalService<T> {
    fn get_goals(&self) -> Result<Vec<Goal>> {
        let loaded = self.goal_repo.load_goals()?;
        self.view.replace_active(loaded.clone());
        Ok(loaded)
    }

    fn get_archived_goals(&self) -> Result<Vec<Goal>> {
        let loaded = self.goal_repo.load_archived_goals()?;
        self.view.replace_archived(loaded.clone());
        Ok(loaded)
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        if new_goal.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        Self::validate_progress(new_goal.progress)?;

        let created = self.goal_repo.insert_new_goal(new_goal).await?;
        self.view.active().upsert(created.clone());
        Ok(created)
    }

    async fn update_goal(&self, updated_goal_data: Goal) -> Result<Goal> {
        Self::validate_progress(updated_goal_data.progress)?;

        let updated = self.goal_repo.update_goal(updated_goal_data).await?;
        self.view.active().patch(updated.clone());
        Ok(updated)
    }

    async fn archive_goal(&self, goal_id: &str) -> Result<Goal> {
        let archived = self.goal_repo.set_goal_deleted(goal_id, true).await?;
        self.view.apply_archive(archived.clone());
        Ok(archived)
    }

    async fn restore_goal(&self, goal_id: &str) -> Result<Goal> {
        let restored = self.goal_repo.set_goal_deleted(goal_id, false).await?;
        self.view.apply_restore(restored.clone());
        Ok(restored)
    }
}
