//! Shared handler state.

use std::sync::Arc;

use crate::accounts::AccountService;
use crate::service::ChatService;

/// Cloned into every handler. Holds no per-conversation data.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
    /// `Some` in accounts mode.
    pub accounts: Option<Arc<AccountService>>,
}

impl AppState {
    pub fn new(chat: ChatService, accounts: Option<AccountService>) -> Self {
        Self {
            chat: Arc::new(chat),
            accounts: accounts.map(Arc::new),
        }
    }

    /// User id from a valid session cookie, if accounts mode is on.
    pub fn session_user(&self, headers: &axum::http::HeaderMap) -> Option<i64> {
        self.accounts
            .as_ref()
            .and_then(|a| a.signer().session_user(headers))
    }
}
