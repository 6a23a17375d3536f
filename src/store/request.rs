//! Contact request lifecycle
//!
//! A contact request moves a (requester, target) pair from `none` to
//! `pending`; acceptance consumes the request and creates the direct chat
//! between the two parties. The `Rejected` state exists in the model but no
//! exposed operation reaches it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// State of a contact request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Waiting for the target to act
    Pending,
    /// Accepted by the target (requests are removed on acceptance, so this
    /// state is transient)
    Accepted,
    /// Rejected by the target (modeled, unreachable through current flows)
    Rejected,
}

impl Default for RequestStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Represents a pending contact request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    /// Unique identifier
    pub id: String,
    /// Requesting user ID
    pub from_user_id: String,
    /// Target user ID
    pub to_user_id: String,
    /// Request state
    #[serde(default)]
    pub status: RequestStatus,
}

impl ContactRequest {
    /// Create a new pending request for an ordered (requester, target) pair
    pub fn new(from_user_id: String, to_user_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            from_user_id,
            to_user_id,
            status: RequestStatus::Pending,
        }
    }

    /// Check whether this request is for the given ordered pair
    pub fn is_between(&self, from_user_id: &str, to_user_id: &str) -> bool {
        self.from_user_id == from_user_id && self.to_user_id == to_user_id
    }
}
