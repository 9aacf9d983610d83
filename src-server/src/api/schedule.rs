use std::sync::Arc;

use crate::main_lib::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use finitive_core::schedule::ScheduleDay;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Deserialize)]
pub struct GenerateScheduleRequest {
    #[serde(default)]
    user: Option<Value>,
    #[serde(default)]
    goals: Option<Value>,
}

#[derive(Serialize)]
pub struct GenerateScheduleResponse {
    pub schedule: Vec<ScheduleDay>,
}

#[derive(Serialize)]
struct ErrorReply {
    error: String,
}

/// POST /api/schedule/generate: build a weekly schedule from the user's
/// profile and goal list. 400 when either is missing or goals is not an
/// array; 500 when the model reply cannot be parsed or the upstream call
/// fails.
pub async fn generate_schedule(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateScheduleRequest>,
) -> Response {
    let user = body.user.filter(|u| !u.is_null());
    let goals = body.goals.as_ref().and_then(|g| g.as_array());

    let (Some(user), Some(goals)) = (user, goals) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorReply {
                error: "Missing user or goals".to_string(),
            }),
        )
            .into_response();
    };

    match state.schedule_service.generate_schedule(&user, goals).await {
        Ok(schedule) => (StatusCode::OK, Json(GenerateScheduleResponse { schedule })).into_response(),
        Err(err) => {
            tracing::error!("Schedule generation failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorReply {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}
