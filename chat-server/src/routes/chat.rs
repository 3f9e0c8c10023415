//! `POST /chat`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/chat", post(chat))
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: Option<String>,
}

/// A body that is missing, not JSON, or lacks `message` reaches the service as `None`, which
/// it rejects after the login check.
async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    info!("Received chat request");
    let message = match payload {
        Ok(Json(req)) => req.message,
        Err(rejection) => {
            debug!(rejection = %rejection, "chat body rejected");
            None
        }
    };

    let session_user = state.session_user(&headers);
    let reply = state
        .chat
        .handle_chat(session_user, message.as_deref())
        .await?;

    Ok(Json(json!({
        "response": reply,
        "status": "success"
    })))
}
