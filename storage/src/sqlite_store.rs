//! SQLite-backed [`ChatStore`].
//!
//! Tables: `users`, `user_info` (one JSON object per user) and `conversations` (one row per
//! turn). History reads order by `timestamp DESC, id DESC` and are reversed before returning.

use async_trait::async_trait;
use chat_core::UserFacts;
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::{TurnRecord, UserRecord};
use crate::repository::ChatStore;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct SqliteChatStore {
    pool_manager: SqlitePoolManager,
}

impl SqliteChatStore {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let store = Self { pool_manager };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_info (
                user_id INTEGER PRIMARY KEY REFERENCES users(id),
                info TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS conversations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                timestamp TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_conversations_user_ts ON conversations(user_id, timestamp)",
        )
        .execute(pool)
        .await?;

        info!("Database tables created successfully");
        Ok(())
    }
}

async fn load_info(conn: &mut SqliteConnection, user_id: i64) -> Result<UserFacts, StorageError> {
    let row: Option<(String,)> = sqlx::query_as("SELECT info FROM user_info WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;
    match row {
        Some((info,)) => Ok(serde_json::from_str(&info)?),
        None => Ok(UserFacts::new()),
    }
}

async fn merge_info(
    conn: &mut SqliteConnection,
    user_id: i64,
    update: &UserFacts,
) -> Result<UserFacts, StorageError> {
    let mut facts = load_info(&mut *conn, user_id).await?;
    facts.merge(update);
    let json = serde_json::to_string(&facts)?;

    sqlx::query(
        r#"
        INSERT INTO user_info (user_id, info) VALUES (?, ?)
        ON CONFLICT(user_id) DO UPDATE SET info = excluded.info
        "#,
    )
    .bind(user_id)
    .bind(&json)
    .execute(&mut *conn)
    .await?;

    debug!(user_id, info = %json, "user info merged");
    Ok(facts)
}

async fn insert_turn(
    conn: &mut SqliteConnection,
    user_id: i64,
    role: &str,
    content: &str,
) -> Result<TurnRecord, StorageError> {
    let timestamp = Utc::now();
    let result = sqlx::query(
        "INSERT INTO conversations (user_id, role, content, timestamp) VALUES (?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(role)
    .bind(content)
    .bind(timestamp)
    .execute(&mut *conn)
    .await?;

    Ok(TurnRecord {
        id: result.last_insert_rowid(),
        user_id,
        role: role.to_string(),
        content: content.to_string(),
        timestamp,
    })
}

#[async_trait]
impl ChatStore for SqliteChatStore {
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<UserRecord, StorageError> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?)",
        )
        .bind(username)
        .bind(password_hash)
        .bind(created_at)
        .execute(self.pool_manager.pool())
        .await;

        match result {
            Ok(done) => {
                info!(user_id = done.last_insert_rowid(), username = %username, "user created");
                Ok(UserRecord {
                    id: done.last_insert_rowid(),
                    username: username.to_string(),
                    password_hash: password_hash.to_string(),
                    created_at,
                })
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(
                StorageError::AlreadyExists("Username already exists".to_string()),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, StorageError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.pool_manager.pool())
        .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, user_id: i64) -> Result<Option<UserRecord>, StorageError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, username, password_hash, created_at FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(self.pool_manager.pool())
        .await?;
        Ok(user)
    }

    async fn get_user_info(&self, user_id: i64) -> Result<UserFacts, StorageError> {
        let mut conn = self.pool_manager.pool().acquire().await?;
        load_info(&mut conn, user_id).await
    }

    async fn merge_user_info(
        &self,
        user_id: i64,
        update: &UserFacts,
    ) -> Result<UserFacts, StorageError> {
        let mut tx = self.pool_manager.pool().begin().await?;
        let facts = merge_info(&mut tx, user_id, update).await?;
        tx.commit().await?;
        Ok(facts)
    }

    async fn append_turn(
        &self,
        user_id: i64,
        role: &str,
        content: &str,
    ) -> Result<TurnRecord, StorageError> {
        let mut conn = self.pool_manager.pool().acquire().await?;
        insert_turn(&mut conn, user_id, role, content).await
    }

    async fn record_exchange(
        &self,
        user_id: i64,
        user_message: &str,
        assistant_reply: &str,
        facts: &UserFacts,
    ) -> Result<(), StorageError> {
        let mut tx = self.pool_manager.pool().begin().await?;
        insert_turn(&mut tx, user_id, "user", user_message).await?;
        insert_turn(&mut tx, user_id, "assistant", assistant_reply).await?;
        if !facts.is_empty() {
            merge_info(&mut tx, user_id, facts).await?;
        }
        tx.commit().await?;

        info!(user_id, "exchange persisted");
        Ok(())
    }

    async fn recent_turns(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<TurnRecord>, StorageError> {
        let mut turns = sqlx::query_as::<_, TurnRecord>(
            r#"
            SELECT id, user_id, role, content, timestamp FROM conversations
            WHERE user_id = ?
            ORDER BY timestamp DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool_manager.pool())
        .await?;
        turns.reverse();

        debug!(user_id, count = turns.len(), "Retrieved recent turns");
        Ok(turns)
    }
}
