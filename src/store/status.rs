//! Ephemeral status posts

use crate::store::message::MessageType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a status post on the status board
///
/// Statuses are prepended to a most-recent-first feed. They carry a viewer
/// set for read tracking, which no current flow populates. There is no
/// expiry: entries are permanent despite the ephemeral framing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    /// Unique identifier
    pub id: String,
    /// Authoring user ID
    pub user_id: String,
    /// Status content (text or media payload)
    pub content: String,
    /// Content kind
    pub kind: MessageType,
    /// Timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// IDs of users who viewed this status (modeled, never populated)
    #[serde(default)]
    pub viewers: Vec<String>,
}

impl Status {
    /// Create a new status post
    pub fn new(user_id: String, content: String, kind: MessageType, timestamp: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            content,
            kind,
            timestamp,
            viewers: Vec::new(),
        }
    }
}
