//! Server configuration: BaseConfig (bind address, log, mode) + collaborator configs (LLM,
//! search, accounts) + chat limits. Loaded from env; required secrets fail fast.

mod accounts;
mod base;
mod limits;
mod llm;
mod search;
mod server_config;


pub use accounts::{AccountsConfig, StoreType};
pub use base::BaseConfig;
pub use limits::ChatLimits;
pub use llm::LlmConfig;
pub use search::SearchConfig;
pub use server_config::ServerConfig;

use anyhow::{anyhow, Result};
use std::env;

/// Reads a required, non-blank variable.
fn required_var(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| anyhow!("{} environment variable is not set", name))
}

/// Reads an optional variable parsed as `T`; unset uses `default`, unparsable is an error.
fn parsed_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| anyhow!("{} has an invalid value: {}", name, raw)),
        _ => Ok(default),
    }
}
