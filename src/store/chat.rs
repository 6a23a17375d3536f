//! Chat conversation management

use crate::store::message::Message;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Background color used for generated group avatars
const GROUP_AVATAR_BACKGROUND: &str = "6c7d36";

/// Represents a chat conversation
///
/// Direct chats have exactly two participants and are unique per unordered
/// participant pair. Group chats carry a display name and are never
/// deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    /// Unique identifier
    pub id: String,
    /// Participant user IDs (exactly 2 for direct chats)
    pub participants: Vec<String>,
    /// Whether this is a group chat
    pub is_group: bool,
    /// Group display name (group chats only)
    pub group_name: Option<String>,
    /// Group avatar URL (group chats only)
    pub group_avatar: Option<String>,
    /// Cached projection of the most recent message in this chat
    pub last_message: Option<Message>,
    /// Unread counter (modeled for the UI layer, never maintained by the engine)
    #[serde(default)]
    pub unread_count: u32,
}

impl Chat {
    /// Create a new direct chat between two users
    pub fn new_direct(a: &str, b: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            participants: vec![a.to_string(), b.to_string()],
            is_group: false,
            group_name: None,
            group_avatar: None,
            last_message: None,
            unread_count: 0,
        }
    }

    /// Create a new group chat with a display name
    pub fn new_group(participants: Vec<String>, group_name: Option<String>) -> Self {
        let group_avatar = group_name.as_deref().map(|name| {
            format!(
                "https://ui-avatars.com/api/?name={}&background={}&color=fff",
                name, GROUP_AVATAR_BACKGROUND
            )
        });

        Self {
            id: Uuid::new_v4().to_string(),
            participants,
            is_group: true,
            group_name,
            group_avatar,
            last_message: None,
            unread_count: 0,
        }
    }

    /// Check whether this is the direct chat for the given unordered user pair
    pub fn is_direct_between(&self, a: &str, b: &str) -> bool {
        !self.is_group
            && self.participants.iter().any(|p| p == a)
            && self.participants.iter().any(|p| p == b)
    }

    /// Check whether the given user participates in this chat
    pub fn has_participant(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p == user_id)
    }

    /// Get the counterpart of the given user in a direct chat
    ///
    /// Returns `None` for group chats or when the user is not a participant.
    pub fn partner_of(&self, user_id: &str) -> Option<&str> {
        if self.is_group || !self.has_participant(user_id) {
            return None;
        }
        self.participants
            .iter()
            .map(String::as_str)
            .find(|p| *p != user_id)
    }

    /// Update the cached last-message projection
    pub fn set_last_message(&mut self, message: Message) {
        self.last_message = Some(message);
    }

    /// Timestamp of the most recent activity, if any message was sent
    pub fn last_activity(&self) -> Option<i64> {
        self.last_message.as_ref().map(|m| m.timestamp)
    }
}
