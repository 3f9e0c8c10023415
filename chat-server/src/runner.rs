use anyhow::Result;
use axum::Router;
use chat_core::init_tracing;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use super::components::build_app_state;
use super::config::ServerConfig;
use super::routes::{account_routes, chat_routes, health_routes, page_routes};
use super::state::AppState;

/// Builds the router. Account routes are mounted only in accounts mode.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(page_routes())
        .merge(health_routes())
        .merge(chat_routes());
    if state.accounts.is_some() {
        router = router.merge(account_routes());
    }

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Main entry: validate config, init logging, build components, then serve.
#[instrument(skip(config))]
pub async fn run_server(config: ServerConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        bind_address = %config.bind_address(),
        chat_mode = %config.chat_mode(),
        model = %config.model(),
        completion_api = %config.llm.api_url,
        api_key = %completion_client::mask_token(&config.llm.api_key),
        history_cap = config.limits.history_cap,
        max_list_items = config.limits.max_list_items,
        "Initializing server"
    );

    let state = build_app_state(&config).await?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(address = %listener.local_addr()?, "Server started successfully");

    axum::serve(listener, app).await?;

    Ok(())
}
