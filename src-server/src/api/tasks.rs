use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use finitive_core::tasks::{NewTask, Task, TaskProgress, ToggleOutcome};

async fn get_tasks(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.task_service.get_tasks()?;
    Ok(Json(tasks))
}

async fn get_archived_tasks(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.task_service.get_archived_tasks()?;
    Ok(Json(tasks))
}

async fn get_progress(State(state): State<Arc<AppState>>) -> ApiResult<Json<TaskProgress>> {
    let progress = state.task_service.get_progress()?;
    Ok(Json(progress))
}

async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(task): Json<NewTask>,
) -> ApiResult<Json<Task>> {
    let t = state.task_service.create_task(task).await?;
    Ok(Json(t))
}

async fn update_task(
    State(state): State<Arc<AppState>>,
    Json(task): Json<Task>,
) -> ApiResult<Json<Task>> {
    let t = state.task_service.update_task(task).await?;
    Ok(Json(t))
}

async fn toggle_task(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ToggleOutcome>> {
    let outcome = state.task_service.toggle_task(&id).await?;
    Ok(Json(outcome))
}

async fn archive_task(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Task>> {
    let t = state.task_service.archive_task(&id).await?;
    Ok(Json(t))
}

async fn restore_task(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Task>> {
    let t = state.task_service.restore_task(&id).await?;
    Ok(Json(t))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks", get(get_tasks).post(create_task).put(update_task))
        .route("/tasks/archived", get(get_archived_tasks))
        .route("/tasks/progress", get(get_progress))
        .route("/tasks/{id}/toggle", post(toggle_task))
        .route("/tasks/{id}/archive", post(archive_task))
        .route("/tasks/{id}/restore", post(restore_task))
}
