//! Core types: chat mode, authenticated identity, and the user-derived fact set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How the server treats conversations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    /// Fresh window per request; no login, nothing persisted.
    Stateless,
    /// Login required; history and facts persisted per user.
    Accounts,
}

impl FromStr for ChatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stateless" => Ok(ChatMode::Stateless),
            "accounts" => Ok(ChatMode::Accounts),
            other => Err(format!(
                "unknown chat mode '{}', expected 'stateless' or 'accounts'",
                other
            )),
        }
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatMode::Stateless => write!(f, "stateless"),
            ChatMode::Accounts => write!(f, "accounts"),
        }
    }
}

/// A user resolved from a verified session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
}

/// Facts extracted from what a user said about themselves, e.g. `name -> Alice`.
///
/// Merging is shallow: a key present in the update overwrites the stored value, nothing is
/// ever removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserFacts(pub BTreeMap<String, String>);

impl UserFacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Shallow merge: keys in `other` win.
    pub fn merge(&mut self, other: &UserFacts) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Renders as `key: value; key: value` in key order.
    pub fn describe(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
