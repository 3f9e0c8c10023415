//! Integration tests for [`prompt::ConversationWindow`].
//!
//! Checks the sliding-window shape for many window sizes and the history rebuild used by
//! accounts mode. External interactions: none (pure data tests).

use prompt::{system_message_with_facts, ChatMessage, ConversationWindow, MessageRole};

fn build(k: usize) -> ConversationWindow {
    let mut w = ConversationWindow::new(ChatMessage::system("system prompt"));
    for i in 1..k {
        w.append(ChatMessage::user(format!("turn {}", i)));
    }
    w
}

/// **Test: For every k > cap the trimmed window has exactly cap messages.**
///
/// **Expected:** first element unchanged, last cap-1 equal to the original's last cap-1.
#[test]
fn trim_shape_holds_for_many_sizes() {
    for cap in 2..=12 {
        for k in (cap + 1)..(cap + 20) {
            let original = build(k);
            assert_eq!(original.len(), k);

            let mut trimmed = original.clone();
            trimmed.trim(cap);

            assert_eq!(trimmed.len(), cap, "cap={} k={}", cap, k);
            assert_eq!(trimmed.messages()[0], original.messages()[0]);
            assert_eq!(
                &trimmed.messages()[1..],
                &original.messages()[k - (cap - 1)..],
                "cap={} k={}",
                cap,
                k
            );
        }
    }
}

/// **Test: Windows at or under the cap are untouched.**
#[test]
fn trim_leaves_short_windows_alone() {
    for k in 1..=11 {
        let original = build(k);
        let mut trimmed = original.clone();
        trimmed.trim(11);
        assert_eq!(trimmed, original);
    }
}

/// **Test: from_history puts the system message first and keeps stored order.**
#[test]
fn from_history_keeps_order() {
    let history = vec![
        ChatMessage::user("hi"),
        ChatMessage::assistant("hello"),
        ChatMessage::user("how are you"),
    ];
    let system = system_message_with_facts("be nice", &Default::default());
    let w = ConversationWindow::from_history(system, history.clone());

    assert_eq!(w.len(), 4);
    assert_eq!(w.system().role, MessageRole::System);
    assert_eq!(&w.messages()[1..], history.as_slice());
}
