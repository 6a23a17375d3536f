//! Message structures and content types

use serde::{Deserialize, Serialize};

/// Kind of content carried by a message or status post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Plain text
    Text,
    /// Embedded image payload (data URL or remote URL)
    Image,
    /// Embedded video payload
    Video,
    /// Recorded audio payload
    Audio,
    /// System-generated notice
    System,
}

impl Default for MessageType {
    fn default() -> Self {
        Self::Text
    }
}

/// Represents a message in the ledger
///
/// Messages are created on send, appended to the global ledger, and never
/// edited or deleted afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message ID
    pub id: String,
    /// Chat this message belongs to
    pub chat_id: String,
    /// Sender user ID
    pub sender_id: String,
    /// Message content (text, or a self-describing media payload)
    pub content: String,
    /// Content kind
    pub kind: MessageType,
    /// Timestamp (Unix milliseconds, non-decreasing per chat)
    pub timestamp: i64,
    /// Recorded duration in seconds (audio/video only)
    #[serde(default)]
    pub duration: Option<u32>,
    /// Read flag (modeled for the UI layer, never consumed by the engine)
    #[serde(default)]
    pub read: bool,
}

impl Message {
    /// Create a new message
    pub fn new(
        id: String,
        chat_id: String,
        sender_id: String,
        content: String,
        kind: MessageType,
        timestamp: i64,
    ) -> Self {
        Self {
            id,
            chat_id,
            sender_id,
            content,
            kind,
            timestamp,
            duration: None,
            read: false,
        }
    }

    /// Attach a recording duration (audio/video messages)
    pub fn with_duration(mut self, duration: Option<u32>) -> Self {
        self.duration = duration;
        self
    }
}
