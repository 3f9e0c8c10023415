//! Wire types for `chat/completions` and the request builder.

use prompt::{instruction_for, ChatMessage, ConversationWindow};
use serde::{Deserialize, Serialize};

/// Model used when `MODEL` is not configured.
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat-v3.1";

/// Fixed sampling knobs sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: Option<f32>,
    pub frequency_penalty: Option<f32>,
    pub presence_penalty: Option<f32>,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 500,
            top_p: Some(0.9),
            frequency_penalty: Some(0.3),
            presence_penalty: Some(0.3),
        }
    }
}

/// Request body for `POST chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
    #[serde(default)]
    pub usage: Option<CompletionUsage>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Builds [`CompletionRequest`]s with one model and one set of sampling parameters.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    model: String,
    params: SamplingParams,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL, SamplingParams::default())
    }
}

impl RequestBuilder {
    pub fn new(model: impl Into<String>, params: SamplingParams) -> Self {
        Self {
            model: model.into(),
            params,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Builds the outbound request from the window.
    ///
    /// When `user_message` asks about the weather or for a list/steps/guide, the matching
    /// instruction is put first in the outbound list. `window` itself is not modified.
    pub fn build(&self, window: &ConversationWindow, user_message: &str) -> CompletionRequest {
        let instruction = instruction_for(user_message);
        let mut messages = Vec::with_capacity(window.len() + 1);
        if let Some(instruction) = instruction {
            messages.push(instruction.to_message());
        }
        messages.extend(window.messages().iter().cloned());

        CompletionRequest {
            messages,
            model: self.model.clone(),
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
            top_p: self.params.top_p,
            frequency_penalty: self.params.frequency_penalty,
            presence_penalty: self.params.presence_penalty,
        }
    }
}
