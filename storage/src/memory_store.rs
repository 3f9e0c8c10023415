//! In-memory [`ChatStore`] for development and tests.
//!
//! Data is lost on restart. State sits behind one `Arc<RwLock<..>>` so an exchange is recorded
//! atomically with respect to other callers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chat_core::UserFacts;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::models::{TurnRecord, UserRecord};
use crate::repository::ChatStore;

#[derive(Debug, Default)]
struct Inner {
    users: Vec<UserRecord>,
    info: HashMap<i64, UserFacts>,
    turns: Vec<TurnRecord>,
    next_turn_id: i64,
}

impl Inner {
    fn push_turn(&mut self, user_id: i64, role: &str, content: &str) -> TurnRecord {
        self.next_turn_id += 1;
        let turn = TurnRecord {
            id: self.next_turn_id,
            user_id,
            role: role.to_string(),
            content: content.to_string(),
            timestamp: Utc::now(),
        };
        self.turns.push(turn.clone());
        turn
    }

    fn merge(&mut self, user_id: i64, update: &UserFacts) -> UserFacts {
        let facts = self.info.entry(user_id).or_default();
        facts.merge(update);
        facts.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryChatStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored turns across all users.
    pub async fn turn_count(&self) -> usize {
        self.inner.read().await.turns.len()
    }
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<UserRecord, StorageError> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.username == username) {
            return Err(StorageError::AlreadyExists(
                "Username already exists".to_string(),
            ));
        }
        let user = UserRecord {
            id: inner.users.len() as i64 + 1,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(&self, user_id: i64) -> Result<Option<UserRecord>, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn get_user_info(&self, user_id: i64) -> Result<UserFacts, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner.info.get(&user_id).cloned().unwrap_or_default())
    }

    async fn merge_user_info(
        &self,
        user_id: i64,
        update: &UserFacts,
    ) -> Result<UserFacts, StorageError> {
        Ok(self.inner.write().await.merge(user_id, update))
    }

    async fn append_turn(
        &self,
        user_id: i64,
        role: &str,
        content: &str,
    ) -> Result<TurnRecord, StorageError> {
        Ok(self.inner.write().await.push_turn(user_id, role, content))
    }

    async fn record_exchange(
        &self,
        user_id: i64,
        user_message: &str,
        assistant_reply: &str,
        facts: &UserFacts,
    ) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        inner.push_turn(user_id, "user", user_message);
        inner.push_turn(user_id, "assistant", assistant_reply);
        if !facts.is_empty() {
            inner.merge(user_id, facts);
        }
        Ok(())
    }

    async fn recent_turns(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<TurnRecord>, StorageError> {
        let inner = self.inner.read().await;
        let limit = limit.max(0) as usize;
        let mine: Vec<&TurnRecord> = inner.turns.iter().filter(|t| t.user_id == user_id).collect();
        let start = mine.len().saturating_sub(limit);
        Ok(mine[start..].iter().map(|t| (*t).clone()).collect())
    }
}
