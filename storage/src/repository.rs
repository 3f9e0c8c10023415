//! Store abstraction used by the chat server in accounts mode.

use async_trait::async_trait;
use chat_core::UserFacts;

use crate::error::StorageError;
use crate::models::{TurnRecord, UserRecord};

/// Persistence for users, their facts and their conversation turns.
///
/// Implementations must be safe to share across request handlers.
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Inserts a user. Fails with [`StorageError::AlreadyExists`] when the username is taken.
    async fn create_user(&self, username: &str, password_hash: &str)
        -> Result<UserRecord, StorageError>;

    async fn find_user_by_username(&self, username: &str)
        -> Result<Option<UserRecord>, StorageError>;

    async fn find_user_by_id(&self, user_id: i64) -> Result<Option<UserRecord>, StorageError>;

    /// Stored facts for a user; empty when none were ever recorded.
    async fn get_user_info(&self, user_id: i64) -> Result<UserFacts, StorageError>;

    /// Shallow-merges `update` into the stored facts and returns the result.
    async fn merge_user_info(&self, user_id: i64, update: &UserFacts)
        -> Result<UserFacts, StorageError>;

    /// Appends one turn with the current time.
    async fn append_turn(&self, user_id: i64, role: &str, content: &str)
        -> Result<TurnRecord, StorageError>;

    /// Records a completed exchange: the user turn, the assistant turn and, when non-empty, the
    /// fact merge. Nothing is written if any part fails.
    async fn record_exchange(
        &self,
        user_id: i64,
        user_message: &str,
        assistant_reply: &str,
        facts: &UserFacts,
    ) -> Result<(), StorageError>;

    /// The `limit` most recent turns, oldest first.
    async fn recent_turns(&self, user_id: i64, limit: i64) -> Result<Vec<TurnRecord>, StorageError>;
}
