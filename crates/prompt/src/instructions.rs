//! Request-scoped system instructions picked by keywords in the user's message.
//!
//! The chosen instruction is prepended to one outbound request only; conversation windows never
//! contain it.

use crate::message::ChatMessage;

/// Keywords selecting [`Instruction::Weather`]. Checked first.
pub const WEATHER_KEYWORDS: &[&str] = &["weather"];

/// Keywords selecting [`Instruction::List`].
pub const LIST_KEYWORDS: &[&str] = &["list", "steps", "how to", "guide"];

pub const WEATHER_INSTRUCTION: &str = "When answering about the weather, start with one short \
sentence summarising conditions, then give the forecast as a bulleted list with one line per \
day or period using '- ' bullets. Include temperature and conditions on each line. Do not use \
headings or bold text.";

pub const LIST_INSTRUCTION: &str = "When the answer is a list, a set of steps, or a guide, start \
with one short introductory sentence, then use a numbered list ('1. ', '2. ', ...) for ordered \
steps or '- ' bullets for unordered items. Keep each item to one line and give at most five \
items. Do not use headings or bold text.";

/// Extra instruction attached to a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Weather,
    List,
}

impl Instruction {
    pub fn text(&self) -> &'static str {
        match self {
            Instruction::Weather => WEATHER_INSTRUCTION,
            Instruction::List => LIST_INSTRUCTION,
        }
    }

    pub fn to_message(&self) -> ChatMessage {
        ChatMessage::system(self.text())
    }
}

/// Picks the instruction for `user_message`, case-insensitively. Weather wins over list.
pub fn instruction_for(user_message: &str) -> Option<Instruction> {
    let lower = user_message.to_lowercase();
    if WEATHER_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Some(Instruction::Weather)
    } else if LIST_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Some(Instruction::List)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageRole;

    #[test]
    fn test_weather_keyword() {
        assert_eq!(
            instruction_for("What is the WEATHER in Paris"),
            Some(Instruction::Weather)
        );
    }

    #[test]
    fn test_list_keywords() {
        assert_eq!(instruction_for("give me the steps"), Some(Instruction::List));
        assert_eq!(instruction_for("How to bake bread"), Some(Instruction::List));
        assert_eq!(instruction_for("a guide to Rome"), Some(Instruction::List));
    }

    #[test]
    fn test_weather_precedes_list() {
        assert_eq!(
            instruction_for("list the weather for this week"),
            Some(Instruction::Weather)
        );
    }

    #[test]
    fn test_no_keyword() {
        assert_eq!(instruction_for("hello there"), None);
    }

    #[test]
    fn test_to_message_is_system() {
        let msg = Instruction::List.to_message();
        assert_eq!(msg.role, MessageRole::System);
        assert_eq!(msg.content, LIST_INSTRUCTION);
    }
}
