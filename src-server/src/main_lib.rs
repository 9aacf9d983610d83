use std::sync::Arc;

use crate::{auth::AuthManager, config::Config};
use finitive_core::{
    coach::CoachService,
    db::{self, write_actor},
    events::{EventRepository, EventService, EventServiceTrait},
    goals::{GoalRepository, GoalService, GoalServiceTrait},
    schedule::{ChatCompletionProvider, ScheduleService},
    tasks::{TaskRepository, TaskService, TaskServiceTrait},
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub goal_service: Arc<dyn GoalServiceTrait + Send + Sync>,
    pub task_service: Arc<dyn TaskServiceTrait + Send + Sync>,
    pub event_service: Arc<dyn EventServiceTrait + Send + Sync>,
    pub coach_service: Arc<CoachService>,
    pub schedule_service: Arc<ScheduleService>,
    pub auth: Option<Arc<AuthManager>>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let goal_service = Arc::new(GoalService::new(goal_repository));

    let task_repository = Arc::new(TaskRepository::new(pool.clone(), writer.clone()));
    let task_service = Arc::new(TaskService::new(task_repository));

    let event_repository = Arc::new(EventRepository::new(pool.clone(), writer.clone()));
    let event_service = Arc::new(EventService::new(event_repository));

    let coach_service = Arc::new(CoachService::new());

    let provider = Arc::new(ChatCompletionProvider::new(
        config.ai.api_key.clone(),
        config.ai.base_url.clone(),
        config.ai.model.clone(),
    ));
    let schedule_service = Arc::new(ScheduleService::new(provider));

    let auth_manager = config
        .auth
        .as_ref()
        .map(AuthManager::new)
        .transpose()?
        .map(Arc::new);

    Ok(Arc::new(AppState {
        goal_service,
        task_service,
        event_service,
        coach_service,
        schedule_service,
        auth: auth_manager,
    }))
}
