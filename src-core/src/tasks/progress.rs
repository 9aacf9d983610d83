use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::tasks::tasks_model::Task;

/// Derived completion aggregate for a task list. Recomputed on demand,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskProgress {
    pub total: usize,
    pub completed_count: usize,
    pub progress_percent: u8,
}

impl TaskProgress {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed_count = tasks.iter().filter(|t| t.completed).count();
        let progress_percent = if total == 0 {
            0
        } else {
            ((completed_count as f64 / total as f64) * 100.0).round() as u8
        };
        TaskProgress {
            total,
            completed_count,
            progress_percent,
        }
    }

    pub fn all_complete(&self) -> bool {
        self.total > 0 && self.completed_count == self.total
    }
}

/// One-shot guard for the "all tasks complete" celebration.
///
/// Fires exactly once on the transition into the complete state and stays
/// quiet until the aggregate drops back below 100%, which re-arms it.
pub struct CompletionLatch {
    fired: AtomicBool,
}

impl CompletionLatch {
    pub fn new() -> Self {
        CompletionLatch {
            fired: AtomicBool::new(false),
        }
    }

    /// Feeds the current aggregate state; returns true when the celebration
    /// should fire.
    pub fn observe(&self, all_complete: bool) -> bool {
        if all_complete {
            !self.fired.swap(true, Ordering::SeqCst)
        } else {
            self.fired.store(false, Ordering::SeqCst);
            false
        }
    }
}

impl Default for CompletionLatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            text: format!("task {}", id),
            completed,
            goal_id: "g1".to_string(),
            time_estimate: "15 min".to_string(),
            ai_note: None,
            user_id: "u1".to_string(),
            deleted: false,
        }
    }

    #[test]
    fn empty_list_is_zero_percent() {
        let progress = TaskProgress::from_tasks(&[]);
        assert_eq!(progress.progress_percent, 0);
        assert!(!progress.all_complete());
    }

    #[test]
    fn percent_is_rounded_ratio_for_all_list_sizes() {
        for total in 0..=50usize {
            for completed in 0..=total {
                let tasks: Vec<Task> = (0..total)
                    .map(|i| task(&format!("t{}", i), i < completed))
                    .collect();
                let progress = TaskProgress::from_tasks(&tasks);

                let expected = if total == 0 {
                    0
                } else {
                    ((completed as f64 / total as f64) * 100.0).round() as u8
                };
                assert_eq!(progress.progress_percent, expected);
                assert_eq!(progress.completed_count, completed);
                assert_eq!(progress.total, total);
            }
        }
    }

    #[test]
    fn latch_fires_once_per_completion() {
        let latch = CompletionLatch::new();

        assert!(!latch.observe(false));
        assert!(latch.observe(true));
        // Still complete: no second celebration.
        assert!(!latch.observe(true));

        // Dropping below 100% re-arms the latch.
        assert!(!latch.observe(false));
        assert!(latch.observe(true));
    }
}
