//! Conversation window: ordered messages, one leading system message, bounded by count.

use crate::message::ChatMessage;

/// One system message plus the ten most recent turns.
pub const DEFAULT_HISTORY_CAP: usize = 11;

/// The ordered message list of one conversation.
///
/// Element 0 is the system message the window was created with. [`trim`](Self::trim) drops the
/// oldest messages after it. Each request or user owns its own window; nothing here is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationWindow {
    messages: Vec<ChatMessage>,
}

impl ConversationWindow {
    /// Starts a conversation with the given system message.
    pub fn new(system: ChatMessage) -> Self {
        Self {
            messages: vec![system],
        }
    }

    /// Rebuilds a window from stored turns (oldest first) behind a fresh system message.
    pub fn from_history<I>(system: ChatMessage, history: I) -> Self
    where
        I: IntoIterator<Item = ChatMessage>,
    {
        let mut window = Self::new(system);
        window.messages.extend(history);
        window
    }

    /// Adds a message at the end.
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Keeps the first message and the last `cap - 1` when longer than `cap`.
    ///
    /// Count-based only: message sizes are not considered. A `cap` below 1 behaves like 1.
    pub fn trim(&mut self, cap: usize) {
        let cap = cap.max(1);
        if self.messages.len() <= cap {
            return;
        }
        let keep_tail = cap - 1;
        let drop_end = self.messages.len() - keep_tail;
        self.messages.drain(1..drop_end);
    }

    /// Appends then trims; the common "record a turn" step.
    pub fn push_trimmed(&mut self, message: ChatMessage, cap: usize) {
        self.append(message);
        self.trim(cap);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn system(&self) -> &ChatMessage {
        &self.messages[0]
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: a window holds at least its system message.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_messages(self) -> Vec<ChatMessage> {
        self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageRole;

    fn window_with_turns(n: usize) -> ConversationWindow {
        let mut w = ConversationWindow::new(ChatMessage::system("sys"));
        for i in 0..n {
            if i % 2 == 0 {
                w.append(ChatMessage::user(format!("u{}", i)));
            } else {
                w.append(ChatMessage::assistant(format!("a{}", i)));
            }
        }
        w
    }

    #[test]
    fn test_append_preserves_order() {
        let w = window_with_turns(3);
        let contents: Vec<&str> = w.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["sys", "u0", "a1", "u2"]);
    }

    #[test]
    fn test_trim_noop_at_or_under_cap() {
        let mut w = window_with_turns(10);
        assert_eq!(w.len(), 11);
        let before = w.clone();
        w.trim(DEFAULT_HISTORY_CAP);
        assert_eq!(w, before);
    }

    #[test]
    fn test_trim_keeps_system_and_tail() {
        let original = window_with_turns(15);
        let mut w = original.clone();
        w.trim(DEFAULT_HISTORY_CAP);

        assert_eq!(w.len(), DEFAULT_HISTORY_CAP);
        assert_eq!(w.system(), original.system());
        assert_eq!(w.system().role, MessageRole::System);
        assert_eq!(
            &w.messages()[1..],
            &original.messages()[original.len() - (DEFAULT_HISTORY_CAP - 1)..]
        );
    }

    #[test]
    fn test_trim_cap_one_leaves_only_system() {
        let mut w = window_with_turns(4);
        w.trim(1);
        assert_eq!(w.len(), 1);
        w.trim(0);
        assert_eq!(w.len(), 1);
        assert_eq!(w.system().content, "sys");
    }

    #[test]
    fn test_push_trimmed() {
        let mut w = window_with_turns(10);
        w.push_trimmed(ChatMessage::assistant("latest"), DEFAULT_HISTORY_CAP);
        assert_eq!(w.len(), DEFAULT_HISTORY_CAP);
        assert_eq!(w.last().unwrap().content, "latest");
        assert_eq!(w.messages()[1].content, "a1");
    }
}
