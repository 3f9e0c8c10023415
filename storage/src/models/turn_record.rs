//! One persisted conversation turn.
//!
//! Maps to the `conversations` table. `role` is `user` or `assistant`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TurnRecord {
    pub id: i64,
    pub user_id: i64,
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}
