use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use finitive_core::events::{Event, EventDraft};

async fn get_events(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Event>>> {
    let events = state.event_service.get_events()?;
    Ok(Json(events))
}

async fn get_archived_events(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Event>>> {
    let events = state.event_service.get_archived_events()?;
    Ok(Json(events))
}

async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<EventDraft>,
) -> ApiResult<Json<Event>> {
    let e = state.event_service.create_event(draft).await?;
    Ok(Json(e))
}

async fn update_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<Event>,
) -> ApiResult<Json<Event>> {
    let e = state.event_service.update_event(event).await?;
    Ok(Json(e))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RescheduleBody {
    start_time: String,
    #[serde(default)]
    end_time: Option<String>,
}

/// Drag/resize write-through: new start/end strings straight from the
/// calendar widget callback.
async fn reschedule_event(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<RescheduleBody>,
) -> ApiResult<Json<Event>> {
    let e = state
        .event_service
        .reschedule_event(&id, body.start_time, body.end_time)
        .await?;
    Ok(Json(e))
}

async fn archive_event(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Event>> {
    let e = state.event_service.archive_event(&id).await?;
    Ok(Json(e))
}

async fn restore_event(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Event>> {
    let e = state.event_service.restore_event(&id).await?;
    Ok(Json(e))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/events",
            get(get_events).post(create_event).put(update_event),
        )
        .route("/events/archived", get(get_archived_events))
        .route("/events/{id}/schedule", put(reschedule_event))
        .route("/events/{id}/archive", post(archive_event))
        .route("/events/{id}/restore", post(restore_event))
}
