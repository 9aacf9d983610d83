use std::sync::Arc;

use crate::main_lib::AppState;
use axum::{extract::State, routing::get, Json, Router};
use finitive_core::coach::CoachMessage;

async fn get_messages(State(state): State<Arc<AppState>>) -> Json<Vec<CoachMessage>> {
    Json(state.coach_service.messages())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/coach/messages", get(get_messages))
}
