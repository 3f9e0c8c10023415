//! Integration tests for [`storage::SqliteChatStore`].
//!
//! Each test opens a fresh database file in a temp directory.

use chat_core::UserFacts;
use storage::{ChatStore, SqliteChatStore, StorageError};
use tempfile::TempDir;

async fn open_store() -> (TempDir, SqliteChatStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("chat.db");
    let store = SqliteChatStore::new(path.to_str().unwrap())
        .await
        .expect("Failed to create store");
    (dir, store)
}

fn facts(pairs: &[(&str, &str)]) -> UserFacts {
    let mut f = UserFacts::new();
    for (k, v) in pairs {
        f.insert(*k, *v);
    }
    f
}

/// **Test: Create a user and look it up by name and id.**
///
/// **Expected:** Same id and hash both ways; unknown names give `None`.
#[tokio::test]
async fn test_create_and_find_user() {
    let (_dir, store) = open_store().await;

    let user = store
        .create_user("alice", "$argon2id$fake")
        .await
        .expect("Failed to create user");

    let by_name = store.find_user_by_username("alice").await.unwrap().unwrap();
    assert_eq!(by_name.id, user.id);
    assert_eq!(by_name.password_hash, "$argon2id$fake");

    let by_id = store.find_user_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(by_id.username, "alice");

    assert!(store.find_user_by_username("bob").await.unwrap().is_none());
}

/// **Test: A second registration with the same username.**
///
/// **Expected:** `StorageError::AlreadyExists`.
#[tokio::test]
async fn test_duplicate_username() {
    let (_dir, store) = open_store().await;

    store.create_user("alice", "h1").await.unwrap();
    let err = store.create_user("alice", "h2").await.unwrap_err();

    assert!(matches!(err, StorageError::AlreadyExists(_)));
}

/// **Test: Fact merge is shallow and never removes keys.**
///
/// **Setup:** Merge `{name: Alice}`, then `{location: Paris}`, then `{name: Ally}`.
/// **Expected:** `{location: Paris, name: Ally}`.
#[tokio::test]
async fn test_merge_user_info() {
    let (_dir, store) = open_store().await;
    let user = store.create_user("alice", "h").await.unwrap();

    assert!(store.get_user_info(user.id).await.unwrap().is_empty());

    store
        .merge_user_info(user.id, &facts(&[("name", "Alice")]))
        .await
        .unwrap();
    store
        .merge_user_info(user.id, &facts(&[("location", "Paris")]))
        .await
        .unwrap();
    let merged = store
        .merge_user_info(user.id, &facts(&[("name", "Ally")]))
        .await
        .unwrap();

    assert_eq!(merged, facts(&[("name", "Ally"), ("location", "Paris")]));
    assert_eq!(store.get_user_info(user.id).await.unwrap(), merged);
}

/// **Test: Recent turns come back oldest first, limited, and scoped to the user.**
///
/// **Setup:** 6 exchanges for alice (12 turns), 1 turn for bob.
/// **Action:** `recent_turns(alice, 4)`.
/// **Expected:** The last two exchanges in chronological order.
#[tokio::test]
async fn test_recent_turns_order_and_limit() {
    let (_dir, store) = open_store().await;
    let alice = store.create_user("alice", "h").await.unwrap();
    let bob = store.create_user("bob", "h").await.unwrap();

    for i in 0..6 {
        store
            .record_exchange(
                alice.id,
                &format!("q{}", i),
                &format!("a{}", i),
                &UserFacts::new(),
            )
            .await
            .unwrap();
    }
    store.append_turn(bob.id, "user", "hi from bob").await.unwrap();

    let turns = store.recent_turns(alice.id, 4).await.unwrap();
    let got: Vec<(&str, &str)> = turns
        .iter()
        .map(|t| (t.role.as_str(), t.content.as_str()))
        .collect();

    assert_eq!(
        got,
        vec![
            ("user", "q4"),
            ("assistant", "a4"),
            ("user", "q5"),
            ("assistant", "a5")
        ]
    );
    assert!(turns.iter().all(|t| t.user_id == alice.id));
}

/// **Test: `record_exchange` writes both turns and merges non-empty facts.**
#[tokio::test]
async fn test_record_exchange_with_facts() {
    let (_dir, store) = open_store().await;
    let user = store.create_user("carol", "h").await.unwrap();

    store
        .record_exchange(
            user.id,
            "my name is Carol",
            "Nice to meet you, Carol.",
            &facts(&[("name", "Carol")]),
        )
        .await
        .unwrap();

    let turns = store.recent_turns(user.id, 10).await.unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].role, "user");
    assert_eq!(turns[1].content, "Nice to meet you, Carol.");
    assert_eq!(
        store.get_user_info(user.id).await.unwrap().get("name"),
        Some("Carol")
    );
}

/// **Test: Data survives reopening the same database file.**
#[tokio::test]
async fn test_reopen_keeps_data() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chat.db");
    let path = path.to_str().unwrap();

    {
        let store = SqliteChatStore::new(path).await.unwrap();
        let user = store.create_user("dave", "h").await.unwrap();
        store.append_turn(user.id, "user", "remember me").await.unwrap();
    }

    let store = SqliteChatStore::new(path).await.unwrap();
    let user = store.find_user_by_username("dave").await.unwrap().unwrap();
    let turns = store.recent_turns(user.id, 10).await.unwrap();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].content, "remember me");
}
