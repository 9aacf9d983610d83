#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use finitive_core::coach::CoachService;
use finitive_core::db::{self, write_actor};
use finitive_core::events::{EventRepository, EventService};
use finitive_core::goals::{GoalRepository, GoalService};
use finitive_core::schedule::{ScheduleError, ScheduleProviderTrait, ScheduleService};
use finitive_core::tasks::{TaskRepository, TaskService};
use finitive_server::auth::AuthManager;
use finitive_server::config::{AiConfig, Config};
use finitive_server::AppState;
use tempfile::TempDir;

/// Text-generation collaborator that always answers with the same text.
pub struct CannedProvider(pub String);

#[async_trait]
impl ScheduleProviderTrait for CannedProvider {
    async fn complete(&self, _prompt: &str) -> Result<String, ScheduleError> {
        Ok(self.0.clone())
    }
}

/// Collaborator whose upstream call always fails.
pub struct BrokenProvider;

#[async_trait]
impl ScheduleProviderTrait for BrokenProvider {
    async fn complete(&self, _prompt: &str) -> Result<String, ScheduleError> {
        Err(ScheduleError::Provider("upstream unavailable".to_string()))
    }
}

pub fn test_config(dir: &TempDir) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(5),
        static_dir: "dist".to_string(),
        auth: None,
        ai: AiConfig {
            api_key: None,
            base_url: None,
            model: None,
        },
    }
}

/// Builds the full application state over a fresh temp database, with the
/// schedule provider injected so tests control the model reply.
pub fn build_test_state(
    config: &Config,
    provider: Arc<dyn ScheduleProviderTrait>,
) -> Arc<AppState> {
    let db_path = db::init(&config.db_path).expect("init database");
    let pool = db::create_pool(&db_path).expect("create pool");
    db::run_migrations(&pool).expect("run migrations");
    let writer = write_actor::spawn_writer((*pool).clone());

    let goal_service = Arc::new(GoalService::new(Arc::new(GoalRepository::new(
        pool.clone(),
        writer.clone(),
    ))));
    let task_service = Arc::new(TaskService::new(Arc::new(TaskRepository::new(
        pool.clone(),
        writer.clone(),
    ))));
    let event_service = Arc::new(EventService::new(Arc::new(EventRepository::new(
        pool.clone(),
        writer.clone(),
    ))));

    let auth = config
        .auth
        .as_ref()
        .map(|cfg| Arc::new(AuthManager::new(cfg).expect("auth manager")));

    Arc::new(AppState {
        goal_service,
        task_service,
        event_service,
        coach_service: Arc::new(CoachService::new()),
        schedule_service: Arc::new(ScheduleService::new(provider)),
        auth,
    })
}
