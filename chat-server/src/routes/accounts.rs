//! `POST /register`, `POST /login`, `POST /logout`, `GET /history` (accounts mode only).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chat_core::{ChatError, Identity};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::accounts::AccountService;
use crate::error::ApiError;
use crate::session::clear_cookie;
use crate::state::AppState;

/// Most turns `GET /history` returns.
pub const HISTORY_LIMIT: i64 = 100;

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/history", get(history))
}

#[derive(Debug, Deserialize)]
struct Credentials {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

fn accounts(state: &AppState) -> Result<&AccountService, ApiError> {
    state
        .accounts
        .as_deref()
        .ok_or_else(|| ChatError::Internal("accounts mode is not enabled".to_string()).into())
}

fn credentials(
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Credentials, ApiError> {
    payload.map(|Json(c)| c).map_err(|_| {
        ChatError::ClientInput("Username and password are required".to_string()).into()
    })
}

fn signed_in(accounts: &AccountService, identity: Identity) -> impl IntoResponse {
    (
        [(SET_COOKIE, accounts.signer().set_cookie(identity.user_id))],
        Json(json!({
            "status": "success",
            "username": identity.username
        })),
    )
}

async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let accounts = accounts(&state)?;
    let creds = credentials(payload)?;
    let identity = accounts.register(&creds.username, &creds.password).await?;
    Ok(signed_in(accounts, identity))
}

async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let accounts = accounts(&state)?;
    let creds = credentials(payload)?;
    let identity = accounts.login(&creds.username, &creds.password).await?;
    Ok(signed_in(accounts, identity))
}

async fn logout() -> impl IntoResponse {
    (
        [(SET_COOKIE, clear_cookie())],
        Json(json!({ "status": "success" })),
    )
}

async fn history(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let turns = state
        .chat
        .history(state.session_user(&headers), HISTORY_LIMIT)
        .await?;
    let history: Vec<Value> = turns
        .into_iter()
        .map(|t| {
            json!({
                "role": t.role,
                "content": t.content,
                "timestamp": t.timestamp.to_rfc3339(),
            })
        })
        .collect();
    Ok(Json(json!({ "history": history })))
}
