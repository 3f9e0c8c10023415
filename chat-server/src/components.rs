//! Component factory: builds AppState from config. Isolates assembly logic from runner.

use anyhow::Result;
use completion_client::{CompletionClient, CompletionProvider, RequestBuilder, SamplingParams};
use std::sync::Arc;
use storage::{ChatStore, InMemoryChatStore, SqliteChatStore};
use tracing::{error, info, instrument};
use web_search::{SearchAugmenter, SerpApiClient};

use crate::accounts::AccountService;
use crate::config::{AccountsConfig, ServerConfig, StoreType};
use crate::service::ChatService;
use crate::session::SessionSigner;
use crate::state::AppState;

/// Creates the chat store for accounts mode from config.
#[instrument(skip(config))]
pub async fn create_chat_store(config: &AccountsConfig) -> Result<Arc<dyn ChatStore>> {
    let store: Arc<dyn ChatStore> = match config.store_type {
        StoreType::Sqlite => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for STORE_TYPE=sqlite"))?;
            info!(database_url = %url, "Using SQLite chat store");
            Arc::new(SqliteChatStore::new(url).await.map_err(|e| {
                error!(error = %e, "Failed to initialize SQLite store");
                anyhow::anyhow!("Failed to initialize SQLite store: {}", e)
            })?)
        }
        StoreType::Memory => {
            info!("Using in-memory chat store");
            Arc::new(InMemoryChatStore::new())
        }
    };
    Ok(store)
}

/// Builds the completion client, search augmenter, store and services.
#[instrument(skip(config))]
pub async fn build_app_state(config: &ServerConfig) -> Result<AppState> {
    let completion: Arc<dyn CompletionProvider> =
        Arc::new(CompletionClient::new(config.llm.client_config())?);
    let search = SerpApiClient::new(config.search.client_config())?;
    let augmenter = SearchAugmenter::new(Arc::new(search));
    let builder = RequestBuilder::new(config.model(), SamplingParams::default());

    let (store, accounts) = match config.accounts() {
        Some(accounts_config) => {
            let store = create_chat_store(accounts_config).await?;
            let signer = SessionSigner::new(&accounts_config.session_secret)?;
            (
                Some(store.clone()),
                Some(AccountService::new(store, signer)),
            )
        }
        None => (None, None),
    };

    let chat = ChatService::new(completion, augmenter, builder, config.limits, store);
    Ok(AppState::new(chat, accounts))
}
