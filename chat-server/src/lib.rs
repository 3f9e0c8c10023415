//! # Chat server
//!
//! Wires the completion client, search augmenter, reply formatter and storage behind an axum
//! router. Loads config from env and serves `POST /chat` (plus register/login/logout/history in
//! accounts mode).

pub mod accounts;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod facts;
pub mod password;
pub mod routes;
pub mod runner;
pub mod service;
pub mod session;
pub mod state;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_app_state, create_chat_store};
pub use config::{ChatLimits, ServerConfig};
pub use error::ApiError;
pub use runner::{build_router, run_server};
pub use service::ChatService;
pub use state::AppState;
