// StoreManager Tests - Testing the thread-safe manager and auto-persistence

use crate::store::{MessageType, StoreManager, Theme};
use tempfile::TempDir;

/// A manager backed by a fresh temp directory; the dir must outlive the test
async fn temp_manager() -> (TempDir, StoreManager, String) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("chatxa-storage.json");
    let path_str = path.to_string_lossy().to_string();
    let manager = StoreManager::new(&path).await;
    (dir, manager, path_str)
}

#[tokio::test]
async fn test_new_manager_starts_empty() {
    let (_dir, manager, _path) = temp_manager().await;

    assert!(manager.users().await.is_empty());
    assert!(manager.current_user().await.is_none());
    assert_eq!(manager.theme().await, Theme::Light);
}

#[tokio::test]
async fn test_register_persists_across_instances() {
    let (_dir, manager, path) = temp_manager().await;

    let alice = manager
        .register_user("alice", Some("hunter2"))
        .await
        .expect("register");

    // A second manager on the same path sees the saved state.
    let reopened = StoreManager::new(&path).await;
    let users = reopened.users().await;
    assert!(users.iter().any(|u| u.id == alice.id));
    assert_eq!(
        reopened.current_user().await.map(|u| u.id),
        Some(alice.id)
    );
}

#[tokio::test]
async fn test_send_message_auto_saves() {
    let (_dir, manager, path) = temp_manager().await;

    let alice = manager.register_user("alice", None).await.expect("register");
    let chats = manager.chats_for(&alice.id).await;
    assert_eq!(chats.len(), 1);

    manager
        .send_message(&chats[0].id, "hello", MessageType::Text, None)
        .await
        .expect("send");

    let reopened = StoreManager::new(&path).await;
    let messages = reopened.messages_for(&chats[0].id).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "hello");
}

#[tokio::test]
async fn test_assistant_partner_resolution() {
    let (_dir, manager, _path) = temp_manager().await;

    let alice = manager.register_user("alice", None).await.expect("register alice");
    let assistant_chat = manager.chats_for(&alice.id).await[0].id.clone();

    // The bootstrap chat resolves to the assistant.
    let partner = manager.assistant_partner(&assistant_chat).await;
    assert!(partner.is_some());

    // A chat with a human counterpart does not.
    let bob = manager.register_user("bob", None).await.expect("register bob");
    manager
        .set_current_user(Some(alice.id.clone()))
        .await
        .expect("switch session");
    let human_chat = manager
        .create_chat(&[alice.id.clone(), bob.id.clone()], false, None)
        .await
        .expect("create chat");
    assert!(manager.assistant_partner(&human_chat).await.is_none());

    // Signed out, nothing resolves.
    manager.set_current_user(None).await.expect("sign out");
    assert!(manager.assistant_partner(&assistant_chat).await.is_none());
}

#[tokio::test]
async fn test_contact_request_flow_through_manager() {
    let (_dir, manager, _path) = temp_manager().await;

    let alice = manager.register_user("alice", None).await.expect("register alice");
    let bob = manager.register_user("bob", None).await.expect("register bob");

    manager
        .set_current_user(Some(alice.id.clone()))
        .await
        .expect("switch session");
    assert!(manager.send_contact_request("bob").await.expect("request"));

    let pending = manager.pending_requests_for(&bob.id).await;
    assert_eq!(pending.len(), 1);

    let chat_id = manager
        .accept_contact_request(&pending[0].id)
        .await
        .expect("accept")
        .expect("chat created");
    assert!(manager.chat(&chat_id).await.is_some());
    assert!(manager.pending_requests_for(&bob.id).await.is_empty());
}

#[tokio::test]
async fn test_update_and_snapshot() {
    let (_dir, manager, _path) = temp_manager().await;

    manager
        .update(|state| state.set_theme(Theme::Dark))
        .await
        .expect("update");

    let snapshot = manager.snapshot().await;
    assert_eq!(snapshot.theme, Theme::Dark);
}

#[tokio::test]
async fn test_reload_syncs_external_changes() {
    let (_dir, manager, path) = temp_manager().await;

    // Another handle on the same blob writes a user.
    let writer = StoreManager::new(&path).await;
    writer.register_user("alice", None).await.expect("register");

    assert!(manager.users().await.is_empty());
    manager.reload().await.expect("reload");
    assert!(manager
        .users()
        .await
        .iter()
        .any(|u| u.name == "alice"));
}

#[tokio::test]
async fn test_status_feed_through_manager() {
    let (_dir, manager, _path) = temp_manager().await;

    manager.register_user("alice", None).await.expect("register");
    manager
        .add_status("first", MessageType::Image)
        .await
        .expect("post");
    manager
        .add_status("second", MessageType::Video)
        .await
        .expect("post");

    let feed = manager.status_feed().await;
    assert_eq!(feed[0].content, "second");
    assert_eq!(feed[1].content, "first");
}
