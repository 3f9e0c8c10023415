//! Shared helpers for the router integration tests: config pointing at mockito servers, and a
//! one-shot request helper.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::Router;
use chat_core::ChatMode;
use chat_server::config::{
    AccountsConfig, BaseConfig, ChatLimits, LlmConfig, SearchConfig, StoreType,
};
use chat_server::{build_app_state, build_router, ServerConfig};
use serde_json::Value;
use tower::ServiceExt;

pub const COMPLETIONS_PATH: &str = "/api/v1/chat/completions";
pub const SEARCH_PATH: &str = "/search";

pub fn config(llm_url: &str, search_url: &str, accounts: Option<AccountsConfig>) -> ServerConfig {
    let chat_mode = if accounts.is_some() {
        ChatMode::Accounts
    } else {
        ChatMode::Stateless
    };
    ServerConfig {
        base: BaseConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            log_file: "logs/test.log".to_string(),
            chat_mode,
        },
        llm: LlmConfig {
            api_key: "sk-test-0123456789abcdef".to_string(),
            api_url: format!("{}{}", llm_url, COMPLETIONS_PATH),
            model: "test/model".to_string(),
            timeout_secs: 5,
            referer: Some("http://localhost:3000".to_string()),
            title: Some("Rust Chatbot".to_string()),
        },
        search: SearchConfig {
            api_key: "search-key".to_string(),
            api_url: format!("{}{}", search_url, SEARCH_PATH),
            timeout_secs: 5,
        },
        accounts,
        limits: ChatLimits::default(),
    }
}

pub fn memory_accounts() -> AccountsConfig {
    AccountsConfig {
        session_secret: "test-session-secret".to_string(),
        store_type: StoreType::Memory,
        database_url: None,
    }
}

pub async fn app(config: &ServerConfig) -> Router {
    let state = build_app_state(config).await.expect("Failed to build state");
    build_router(state)
}

/// Completion API body with one choice.
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }],
        "usage": { "prompt_tokens": 20, "completion_tokens": 10, "total_tokens": 30 }
    })
    .to_string()
}

pub struct Reply {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub json: Value,
}

impl Reply {
    /// `name=value` part of the Set-Cookie header, ready for a Cookie header.
    pub fn cookie(&self) -> Option<String> {
        self.set_cookie
            .as_deref()
            .and_then(|c| c.split(';').next())
            .map(str::to_string)
    }
}

/// Sends one request through the router. `body` is sent raw with a JSON content type.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
    cookie: Option<&str>,
) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(CONTENT_TYPE, "application/json");
    }
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = builder
        .body(match body {
            Some(b) => Body::from(b.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    Reply {
        status,
        set_cookie,
        json,
    }
}
