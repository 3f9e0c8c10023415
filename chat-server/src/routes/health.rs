//! Health check endpoint.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let mode = if state.chat.requires_login() {
        "accounts"
    } else {
        "stateless"
    };
    Json(json!({
        "status": "healthy",
        "service": "chatbot",
        "mode": mode
    }))
}
