//! Base config: bind address, logging, chat mode. Loaded from env.

use anyhow::Result;
use chat_core::ChatMode;
use std::env;

use super::parsed_var;

/// Base config: where to listen, where to log, which mode to run.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// HOST
    pub host: String,
    /// PORT
    pub port: u16,
    /// Log file path
    pub log_file: String,
    /// CHAT_MODE: `stateless` (default) or `accounts`
    pub chat_mode: ChatMode,
}

impl BaseConfig {
    /// Load from environment variables. `host` / `port` override HOST / PORT if provided.
    pub fn load(host: Option<String>, port: Option<u16>) -> Result<Self> {
        let host = host
            .or_else(|| env::var("HOST").ok())
            .unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match port {
            Some(p) => p,
            None => parsed_var("PORT", 5000)?,
        };
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/chatbot.log".to_string());
        let chat_mode = parsed_var("CHAT_MODE", ChatMode::Stateless)?;

        Ok(Self {
            host,
            port,
            log_file,
            chat_mode,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
