pub mod progress;
pub mod tasks_model;
pub mod tasks_repository;
pub mod tasks_service;
pub mod tasks_traits;

pub use progress::{CompletionLatch, TaskProgress};
pub use tasks_model::{NewTask, Task, ToggleOutcome};
pub use tasks_repository::TaskRepository;
pub use tasks_service::TaskService;
pub use tasks_traits::{TaskRepositoryTrait, TaskServiceTrait};
