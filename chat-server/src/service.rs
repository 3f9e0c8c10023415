//! Chat orchestrator: one call per `POST /chat`.
//!
//! `authorize → validate → (search?) → build → complete → format → persist`. Any step can end
//! the request with a [`ChatError`]; nothing is persisted unless the completion succeeded.
//!
//! The window lives for one request. In accounts mode the next request rebuilds it from the
//! store, so the reply reaches later windows through `record_exchange`.

use std::sync::Arc;

use chat_core::{ChatError, Identity, UserFacts};
use completion_client::{CompletionProvider, RequestBuilder};
use prompt::{system_message_with_facts, ChatMessage, ConversationWindow, MessageRole};
use reply_format::format_reply;
use storage::{ChatStore, TurnRecord};
use tracing::{debug, error, info, instrument, warn};
use web_search::SearchAugmenter;

use crate::config::ChatLimits;
use crate::facts::extract_facts;

pub struct ChatService {
    completion: Arc<dyn CompletionProvider>,
    augmenter: SearchAugmenter,
    builder: RequestBuilder,
    limits: ChatLimits,
    system_prompt: String,
    /// `Some` in accounts mode.
    store: Option<Arc<dyn ChatStore>>,
}

impl ChatService {
    pub fn new(
        completion: Arc<dyn CompletionProvider>,
        augmenter: SearchAugmenter,
        builder: RequestBuilder,
        limits: ChatLimits,
        store: Option<Arc<dyn ChatStore>>,
    ) -> Self {
        Self {
            completion,
            augmenter,
            builder,
            limits,
            system_prompt: prompt::DEFAULT_SYSTEM_MESSAGE.to_string(),
            store,
        }
    }

    pub fn requires_login(&self) -> bool {
        self.store.is_some()
    }

    /// Capability check. Stateless mode needs no identity; accounts mode needs a session
    /// whose user still exists.
    pub async fn authorize(
        &self,
        session_user: Option<i64>,
    ) -> Result<Option<Identity>, ChatError> {
        let Some(store) = &self.store else {
            return Ok(None);
        };
        let user_id = session_user.ok_or_else(|| ChatError::Auth("Please log in".to_string()))?;
        let user = store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| ChatError::Auth("Session is no longer valid".to_string()))?;
        Ok(Some(Identity {
            user_id: user.id,
            username: user.username,
        }))
    }

    /// Handles one chat message and returns the formatted reply.
    #[instrument(skip(self, message))]
    pub async fn handle_chat(
        &self,
        session_user: Option<i64>,
        message: Option<&str>,
    ) -> Result<String, ChatError> {
        let identity = self.authorize(session_user).await?;

        let message = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| ChatError::ClientInput("No message provided".to_string()))?;
        info!(message_len = message.len(), "step: chat request validated");

        let mut window = self.open_window(identity.as_ref()).await?;
        window.push_trimmed(ChatMessage::user(message), self.limits.history_cap);

        if let Some(context) = self.augmenter.maybe_augment(message).await {
            debug!(context_len = context.len(), "step: search context added");
            window.append(ChatMessage::system(context));
        }

        let request = self.builder.build(&window, message);
        info!(
            model = %request.model,
            message_count = request.messages.len(),
            "step: calling completion API"
        );
        let raw = self.completion.complete(&request).await.map_err(|e| {
            let err = ChatError::from(e);
            error!(error = %err, status = err.status_code(), "completion call failed");
            err
        })?;

        let reply = format_reply(&raw, self.limits.max_list_items);
        debug!(reply_len = reply.len(), "step: reply formatted");

        if let (Some(store), Some(identity)) = (&self.store, &identity) {
            let facts = extract_facts(message);
            store
                .record_exchange(identity.user_id, message, &reply, &facts)
                .await
                .map_err(|e| {
                    error!(error = %e, user_id = identity.user_id, "failed to persist exchange");
                    ChatError::from(e)
                })?;
        }

        info!(reply_len = reply.len(), "step: chat request completed");
        Ok(reply)
    }

    /// The caller's persisted turns, oldest first. Accounts mode only.
    pub async fn history(
        &self,
        session_user: Option<i64>,
        limit: i64,
    ) -> Result<Vec<TurnRecord>, ChatError> {
        let identity = self
            .authorize(session_user)
            .await?
            .ok_or_else(|| ChatError::Internal("history requires accounts mode".to_string()))?;
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| ChatError::Internal("history requires accounts mode".to_string()))?;
        Ok(store.recent_turns(identity.user_id, limit).await?)
    }

    /// Fresh window (stateless) or one seeded with the user's facts and recent turns.
    async fn open_window(
        &self,
        identity: Option<&Identity>,
    ) -> Result<ConversationWindow, ChatError> {
        let (Some(store), Some(identity)) = (&self.store, identity) else {
            return Ok(ConversationWindow::new(ChatMessage::system(
                self.system_prompt.as_str(),
            )));
        };

        let facts: UserFacts = store.get_user_info(identity.user_id).await?;
        let seed_limit = self.limits.history_cap.saturating_sub(1) as i64;
        let turns = store.recent_turns(identity.user_id, seed_limit).await?;
        debug!(
            user_id = identity.user_id,
            turns = turns.len(),
            facts = facts.0.len(),
            "step: window seeded from store"
        );

        let history = turns.into_iter().filter_map(|t| match t.role.parse::<MessageRole>() {
            Ok(role) => Some(ChatMessage::new(role, t.content)),
            Err(_) => {
                warn!(turn_id = t.id, role = %t.role, "skipping turn with unknown role");
                None
            }
        });
        Ok(ConversationWindow::from_history(
            system_message_with_facts(&self.system_prompt, &facts),
            history,
        ))
    }
}
