//! HTTP mapping for [`ChatError`]: status code + `{"error": message}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chat_core::ChatError;
use serde_json::json;
use tracing::{error, warn};

/// Error returned by route handlers.
#[derive(Debug)]
pub struct ApiError(pub ChatError);

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.status_code();
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(status = code, error = %self.0, "request failed");
        } else {
            warn!(status = code, error = %self.0, "request rejected");
        }
        (status, Json(json!({ "error": self.0.client_message() }))).into_response()
    }
}
