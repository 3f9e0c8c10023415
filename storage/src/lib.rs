//! Storage crate: users, per-user facts and conversation turns.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – UserRecord, TurnRecord
//! - [`repository`] – ChatStore trait
//! - [`sqlite_store`] – SqliteChatStore (sqlx)
//! - [`memory_store`] – InMemoryChatStore
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod memory_store;
mod models;
mod repository;
mod sqlite_pool;
mod sqlite_store;

pub use error::StorageError;
pub use memory_store::InMemoryChatStore;
pub use models::{TurnRecord, UserRecord};
pub use repository::ChatStore;
pub use sqlite_pool::SqlitePoolManager;
pub use sqlite_store::SqliteChatStore;
