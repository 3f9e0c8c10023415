//! Window and reply limits.

use anyhow::Result;

use super::parsed_var;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLimits {
    /// HISTORY_CAP: system message + most recent turns kept in a window
    pub history_cap: usize,
    /// MAX_LIST_ITEMS: list lines kept in a formatted reply
    pub max_list_items: usize,
}

impl Default for ChatLimits {
    fn default() -> Self {
        Self {
            history_cap: prompt::DEFAULT_HISTORY_CAP,
            max_list_items: reply_format::DEFAULT_MAX_LIST_ITEMS,
        }
    }
}

impl ChatLimits {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            history_cap: parsed_var("HISTORY_CAP", defaults.history_cap)?,
            max_list_items: parsed_var("MAX_LIST_ITEMS", defaults.max_list_items)?,
        })
    }

    /// The window must hold the system message and at least one turn; replies at least one item.
    pub fn validate(&self) -> Result<()> {
        if self.history_cap < 2 {
            anyhow::bail!("HISTORY_CAP must be at least 2, got {}", self.history_cap);
        }
        if self.max_list_items < 1 {
            anyhow::bail!("MAX_LIST_ITEMS must be at least 1, got {}", self.max_list_items);
        }
        Ok(())
    }
}
