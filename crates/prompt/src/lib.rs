//! # Prompt
//!
//! Builds what the completion model sees.
//!
//! - [`ChatMessage`] / [`MessageRole`]: one element of the OpenAI-style `messages` array.
//! - [`ConversationWindow`]: the ordered, bounded message list of one conversation. Always starts
//!   with a single system message; [`ConversationWindow::trim`] keeps that message plus the most
//!   recent turns.
//! - [`instruction_for`]: a request-scoped system instruction chosen by keywords in the user's
//!   message (weather answers, list/step answers). Never stored in a window.
//!
//! ## External interactions
//!
//! - **Completion API**: messages serialize to `{"role": "...", "content": "..."}`.

mod instructions;
mod message;
mod window;

pub use instructions::{
    instruction_for, Instruction, LIST_INSTRUCTION, LIST_KEYWORDS, WEATHER_INSTRUCTION,
    WEATHER_KEYWORDS,
};
pub use message::{ChatMessage, MessageRole};
pub use window::{ConversationWindow, DEFAULT_HISTORY_CAP};

use chat_core::UserFacts;

/// System instruction every conversation starts with.
pub const DEFAULT_SYSTEM_MESSAGE: &str =
    "You are a helpful assistant that provides quick and concise responses.";

/// Builds the leading system message, appending known user facts when there are any.
///
/// Output: `"{base}\n\nKnown facts about the user: name: Alice; location: Paris"`.
pub fn system_message_with_facts(base: &str, facts: &UserFacts) -> ChatMessage {
    if facts.is_empty() {
        ChatMessage::system(base)
    } else {
        ChatMessage::system(format!(
            "{}\n\nKnown facts about the user: {}",
            base,
            facts.describe()
        ))
    }
}
