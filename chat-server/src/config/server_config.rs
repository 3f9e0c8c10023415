//! ServerConfig: BaseConfig + collaborator configs + limits. Use load() for env-based loading.

use anyhow::Result;
use chat_core::ChatMode;

use super::{AccountsConfig, BaseConfig, ChatLimits, LlmConfig, SearchConfig};

/// Full server config. Use ServerConfig::load() for env-based loading.
#[derive(Clone)]
pub struct ServerConfig {
    pub base: BaseConfig,
    pub llm: LlmConfig,
    pub search: SearchConfig,
    /// Present only in accounts mode.
    pub accounts: Option<AccountsConfig>,
    pub limits: ChatLimits,
}

impl ServerConfig {
    /// Load full config from environment variables. `host` / `port` override HOST / PORT.
    /// Call validate() after load to check config before init.
    pub fn load(host: Option<String>, port: Option<u16>) -> Result<Self> {
        let base = BaseConfig::load(host, port)?;
        let llm = LlmConfig::from_env()?;
        let search = SearchConfig::from_env()?;
        let accounts = match base.chat_mode {
            ChatMode::Accounts => Some(AccountsConfig::from_env()?),
            ChatMode::Stateless => None,
        };
        let limits = ChatLimits::from_env()?;
        Ok(Self {
            base,
            llm,
            search,
            accounts,
            limits,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.llm.validate()?;
        self.search.validate()?;
        self.limits.validate()?;
        if self.base.chat_mode == ChatMode::Accounts && self.accounts.is_none() {
            anyhow::bail!("CHAT_MODE=accounts requires SESSION_SECRET and a store");
        }
        Ok(())
    }

    pub fn chat_mode(&self) -> ChatMode {
        self.base.chat_mode
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn bind_address(&self) -> String {
        self.base.bind_address()
    }
    pub fn model(&self) -> &str {
        &self.llm.model
    }
    pub fn accounts(&self) -> Option<&AccountsConfig> {
        self.accounts.as_ref()
    }
}
