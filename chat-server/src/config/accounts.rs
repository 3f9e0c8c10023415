//! Accounts-mode config: session secret and persistence store. Loaded from env.

use anyhow::{anyhow, Result};
use std::env;
use std::fmt;
use std::str::FromStr;

use super::required_var;

/// Which [`storage::ChatStore`] backs accounts mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreType {
    Sqlite,
    Memory,
}

impl FromStr for StoreType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreType::Sqlite),
            "memory" => Ok(StoreType::Memory),
            other => Err(anyhow!(
                "STORE_TYPE must be 'sqlite' or 'memory', got '{}'",
                other
            )),
        }
    }
}

impl fmt::Display for StoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreType::Sqlite => write!(f, "sqlite"),
            StoreType::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Clone)]
pub struct AccountsConfig {
    /// SESSION_SECRET (required)
    pub session_secret: String,
    /// STORE_TYPE, default `sqlite`
    pub store_type: StoreType,
    /// DATABASE_URL (required for `sqlite`)
    pub database_url: Option<String>,
}

impl fmt::Debug for AccountsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountsConfig")
            .field("session_secret", &"***")
            .field("store_type", &self.store_type)
            .field("database_url", &self.database_url)
            .finish()
    }
}

impl AccountsConfig {
    pub fn from_env() -> Result<Self> {
        let session_secret = required_var("SESSION_SECRET")?;
        let store_type = match env::var("STORE_TYPE") {
            Ok(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => StoreType::Sqlite,
        };
        let database_url = match store_type {
            StoreType::Sqlite => Some(required_var("DATABASE_URL")?),
            StoreType::Memory => None,
        };

        Ok(Self {
            session_secret,
            store_type,
            database_url,
        })
    }
}
