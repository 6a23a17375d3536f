// Chat Tests - Testing the Chat struct

use crate::store::{Chat, Message, MessageType};

#[test]
fn test_direct_chat_creation() {
    let chat = Chat::new_direct("uid_a", "uid_b");

    assert!(!chat.id.is_empty());
    assert_eq!(chat.participants, vec!["uid_a", "uid_b"]);
    assert!(!chat.is_group);
    assert!(chat.group_name.is_none());
    assert!(chat.group_avatar.is_none());
    assert!(chat.last_message.is_none());
    assert_eq!(chat.unread_count, 0);
}

#[test]
fn test_group_chat_creation() {
    let participants = vec![
        "uid_a".to_string(),
        "uid_b".to_string(),
        "uid_c".to_string(),
    ];
    let chat = Chat::new_group(participants.clone(), Some("Weekend Plans".to_string()));

    assert!(chat.is_group);
    assert_eq!(chat.participants, participants);
    assert_eq!(chat.group_name.as_deref(), Some("Weekend Plans"));

    let avatar = chat.group_avatar.expect("Named groups get a default avatar");
    assert!(avatar.contains("name=Weekend Plans"));
    assert!(avatar.contains("background=6c7d36"));
}

#[test]
fn test_group_chat_without_name_has_no_avatar() {
    let chat = Chat::new_group(vec!["uid_a".to_string(), "uid_b".to_string()], None);

    assert!(chat.is_group);
    assert!(chat.group_name.is_none());
    assert!(chat.group_avatar.is_none());
}

#[test]
fn test_is_direct_between_either_order() {
    let chat = Chat::new_direct("uid_a", "uid_b");

    assert!(chat.is_direct_between("uid_a", "uid_b"));
    assert!(chat.is_direct_between("uid_b", "uid_a"));
    assert!(!chat.is_direct_between("uid_a", "uid_c"));
}

#[test]
fn test_group_never_matches_direct_pair() {
    let chat = Chat::new_group(vec!["uid_a".to_string(), "uid_b".to_string()], None);

    assert!(!chat.is_direct_between("uid_a", "uid_b"));
}

#[test]
fn test_partner_of() {
    let chat = Chat::new_direct("uid_a", "uid_b");

    assert_eq!(chat.partner_of("uid_a"), Some("uid_b"));
    assert_eq!(chat.partner_of("uid_b"), Some("uid_a"));
    assert_eq!(chat.partner_of("uid_c"), None);

    let group = Chat::new_group(vec!["uid_a".to_string(), "uid_b".to_string()], None);
    assert_eq!(group.partner_of("uid_a"), None);
}

#[test]
fn test_last_message_projection() {
    let mut chat = Chat::new_direct("uid_a", "uid_b");
    assert_eq!(chat.last_activity(), None);

    let msg = Message::new(
        "msg_1".to_string(),
        chat.id.clone(),
        "uid_a".to_string(),
        "hello".to_string(),
        MessageType::Text,
        1000,
    );
    chat.set_last_message(msg);

    assert_eq!(chat.last_activity(), Some(1000));
    assert_eq!(chat.last_message.as_ref().map(|m| m.id.as_str()), Some("msg_1"));
}

#[test]
fn test_chat_serialization() {
    let mut chat = Chat::new_direct("uid_a", "uid_b");
    let msg = Message::new(
        "msg_1".to_string(),
        chat.id.clone(),
        "uid_a".to_string(),
        "hello".to_string(),
        MessageType::Text,
        2000,
    );
    chat.set_last_message(msg);

    let json = serde_json::to_string(&chat).expect("Failed to serialize chat");
    let loaded: Chat = serde_json::from_str(&json).expect("Failed to deserialize chat");

    assert_eq!(loaded.id, chat.id);
    assert_eq!(loaded.participants, chat.participants);
    assert!(!loaded.is_group);
    assert_eq!(loaded.last_activity(), Some(2000));
    assert_eq!(loaded.unread_count, 0);
}
