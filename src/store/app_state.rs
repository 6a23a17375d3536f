//! Application state persistence and management

use crate::{
    assistant::{ASSISTANT_NAME, ASSISTANT_SECRET},
    store::{
        chat::Chat,
        message::{Message, MessageType},
        request::ContactRequest,
        status::Status,
        user::{User, ADMIN_NAME, ADMIN_SECRET},
    },
    Error, Result,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Default file name for the persisted state blob
pub const STORAGE_FILE: &str = "chatxa-storage.json";

/// UI theme preference, persisted with the state container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme
    Light,
    /// Dark theme
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Self::Light
    }
}

/// Persistent application state
///
/// The single process-wide container owning every entity collection. All
/// mutations go through the operations below and are atomic with respect to
/// each other; presentation layers only observe snapshots and never mutate
/// entity fields directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    /// ID of the signed-in user, if any
    pub current_user: Option<String>,
    /// Registered users
    pub users: Vec<User>,
    /// Chat conversations
    pub chats: Vec<Chat>,
    /// Append-only message ledger, partitioned by chat on read
    pub messages: Vec<Message>,
    /// Status feed, most recent first
    pub statuses: Vec<Status>,
    /// Pending contact requests
    pub contact_requests: Vec<ContactRequest>,
    /// UI theme preference
    pub theme: Theme,
}

impl AppState {
    /// Create a new empty application state
    pub fn new() -> Self {
        Self {
            current_user: None,
            users: Vec::new(),
            chats: Vec::new(),
            messages: Vec::new(),
            statuses: Vec::new(),
            contact_requests: Vec::new(),
            theme: Theme::default(),
        }
    }

    // ========== Identity directory ==========

    /// Register a new user and sign them in
    ///
    /// Display names are unique: registering an already-taken name fails with
    /// [`Error::Identity`]. On success the new user becomes the current
    /// session identity, the reserved assistant identity is created if it
    /// does not exist yet, and the direct chat with the assistant is created
    /// through the dedup-aware path.
    ///
    /// # Errors
    /// Returns an error if the display name is already registered
    pub fn register_user(&mut self, name: &str, secret: Option<&str>) -> Result<User> {
        if self.find_user_by_name(name).is_some() {
            return Err(Error::Identity(format!(
                "display name already taken: {}",
                name
            )));
        }

        let user = User::new(name, secret);
        self.users.push(user.clone());
        self.current_user = Some(user.id.clone());

        // Every human sign-up gets an assistant thread. The assistant
        // identity is inserted directly so the session pointer stays on the
        // user who just registered.
        if name != ASSISTANT_NAME {
            let assistant_id = self.ensure_assistant_user();
            self.create_chat(&[user.id.clone(), assistant_id], false, None);
        }

        tracing::info!("Registered user {} ({})", user.name, user.id);
        Ok(user)
    }

    /// Look up a user whose name and secret both match
    ///
    /// Pure credential check with no side effects. Does not distinguish an
    /// unknown name from a wrong secret.
    pub fn login_user(&self, name: &str, secret: Option<&str>) -> Option<&User> {
        self.users.iter().find(|u| u.matches_credentials(name, secret))
    }

    /// Authenticate and sign in
    ///
    /// The reserved administrative name/secret pair bypasses normal
    /// registration and is auto-registered on first use. For everyone else
    /// this is a credential lookup; on a failed match nothing changes.
    pub fn authenticate(&mut self, name: &str, secret: Option<&str>) -> Option<User> {
        if name == ADMIN_NAME && secret == Some(ADMIN_SECRET) {
            let admin = match self.find_user_by_name(ADMIN_NAME) {
                Some(user) => user.clone(),
                None => {
                    let user = User::new(ADMIN_NAME, Some(ADMIN_SECRET));
                    self.users.push(user.clone());
                    tracing::info!("Auto-registered administrative account");
                    user
                }
            };
            self.current_user = Some(admin.id.clone());
            return Some(admin);
        }

        let user = self.login_user(name, secret)?.clone();
        self.current_user = Some(user.id.clone());
        Some(user)
    }

    /// Set or clear the current session identity
    pub fn set_current_user(&mut self, user_id: Option<String>) {
        self.current_user = user_id;
    }

    /// Resolve the current session identity to its user record
    pub fn current_user(&self) -> Option<&User> {
        let id = self.current_user.as_deref()?;
        self.users.iter().find(|u| u.id == id)
    }

    /// Set the UI theme preference
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Find a user by display name (case-sensitive)
    pub fn find_user_by_name(&self, name: &str) -> Option<&User> {
        self.users.iter().find(|u| u.name == name)
    }

    /// Find a user by ID
    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    /// The reserved assistant identity, if it has been created
    pub fn assistant_user(&self) -> Option<&User> {
        self.find_user_by_name(ASSISTANT_NAME)
    }

    /// Insert the reserved assistant identity if absent, without touching the
    /// session pointer
    fn ensure_assistant_user(&mut self) -> String {
        if let Some(user) = self.assistant_user() {
            return user.id.clone();
        }
        let user = User::new(ASSISTANT_NAME, Some(ASSISTANT_SECRET));
        let id = user.id.clone();
        self.users.push(user);
        id
    }

    // ========== Conversation registry ==========

    /// Create a chat, or return the existing direct chat for the pair
    ///
    /// Direct chats are unique per unordered participant pair: when a direct
    /// chat for the two ids already exists (in either argument order) its id
    /// is returned unchanged. Group chats are always created fresh.
    ///
    /// # Arguments
    /// * `participant_ids` - Participant user IDs (exactly 2 for direct chats)
    /// * `is_group` - Whether to create a group chat
    /// * `group_name` - Group display name (group chats only)
    ///
    /// # Returns
    /// The chat id (existing or newly created)
    pub fn create_chat(
        &mut self,
        participant_ids: &[String],
        is_group: bool,
        group_name: Option<&str>,
    ) -> String {
        if !is_group {
            if let Some(existing) = self
                .chats
                .iter()
                .find(|c| c.is_direct_between(&participant_ids[0], &participant_ids[1]))
            {
                return existing.id.clone();
            }

            let chat = Chat::new_direct(&participant_ids[0], &participant_ids[1]);
            let id = chat.id.clone();
            self.chats.push(chat);
            return id;
        }

        let chat = Chat::new_group(
            participant_ids.to_vec(),
            group_name.map(|n| n.to_string()),
        );
        let id = chat.id.clone();
        self.chats.push(chat);
        id
    }

    /// Get a chat by ID
    pub fn chat(&self, chat_id: &str) -> Option<&Chat> {
        self.chats.iter().find(|c| c.id == chat_id)
    }

    /// Chats the given user participates in, most recent activity first
    ///
    /// Chats without any message sort last.
    pub fn chats_for(&self, user_id: &str) -> Vec<&Chat> {
        let mut chats: Vec<&Chat> = self
            .chats
            .iter()
            .filter(|c| c.has_participant(user_id))
            .collect();
        chats.sort_by(|a, b| b.last_activity().cmp(&a.last_activity()));
        chats
    }

    // ========== Message ledger ==========

    /// Send a message as the current user
    ///
    /// Requires a signed-in session. This is the sole user-facing mutation
    /// path for messages; there is no edit or delete.
    ///
    /// # Errors
    /// Returns [`Error::NotAuthenticated`] if no session is set, or
    /// [`Error::Storage`] if the chat does not exist
    pub fn send_message(
        &mut self,
        chat_id: &str,
        content: &str,
        kind: MessageType,
        duration: Option<u32>,
    ) -> Result<Message> {
        let sender_id = self
            .current_user
            .clone()
            .ok_or(Error::NotAuthenticated)?;
        self.append_message(chat_id, &sender_id, content, kind, duration)
    }

    /// Append a message from an explicit sender
    ///
    /// Shared append path for user sends and assistant replies: stamps a
    /// fresh id and a per-chat non-decreasing timestamp, appends the message
    /// to the ledger, and updates the owning chat's last-message projection.
    ///
    /// # Errors
    /// Returns [`Error::Storage`] if the chat does not exist
    pub fn append_message(
        &mut self,
        chat_id: &str,
        sender_id: &str,
        content: &str,
        kind: MessageType,
        duration: Option<u32>,
    ) -> Result<Message> {
        let chat = self
            .chats
            .iter_mut()
            .find(|c| c.id == chat_id)
            .ok_or_else(|| Error::Storage(format!("unknown chat: {}", chat_id)))?;

        // Keep per-chat timestamps non-decreasing even if the clock steps back.
        let timestamp = Utc::now()
            .timestamp_millis()
            .max(chat.last_activity().unwrap_or(i64::MIN));

        let message = Message::new(
            Uuid::new_v4().to_string(),
            chat_id.to_string(),
            sender_id.to_string(),
            content.to_string(),
            kind,
            timestamp,
        )
        .with_duration(duration);

        chat.set_last_message(message.clone());
        self.messages.push(message.clone());

        tracing::debug!("Appended message {} to chat {}", message.id, chat_id);
        Ok(message)
    }

    /// Messages of a chat, in insertion order
    pub fn messages_for(&self, chat_id: &str) -> Vec<&Message> {
        self.messages.iter().filter(|m| m.chat_id == chat_id).collect()
    }

    /// The full message ledger (administrative read)
    pub fn all_messages(&self) -> &[Message] {
        &self.messages
    }

    /// All registered users (administrative read)
    pub fn all_users(&self) -> &[User] {
        &self.users
    }

    // ========== Status board ==========

    /// Post a status as the current user
    ///
    /// The new entry is prepended, so the feed stays most-recent-first by
    /// construction.
    ///
    /// # Errors
    /// Returns [`Error::NotAuthenticated`] if no session is set
    pub fn add_status(&mut self, content: &str, kind: MessageType) -> Result<Status> {
        let user_id = self
            .current_user
            .clone()
            .ok_or(Error::NotAuthenticated)?;

        let status = Status::new(
            user_id,
            content.to_string(),
            kind,
            Utc::now().timestamp_millis(),
        );
        self.statuses.insert(0, status.clone());
        Ok(status)
    }

    /// The status feed, most recent first
    pub fn status_feed(&self) -> &[Status] {
        &self.statuses
    }

    // ========== Contact request workflow ==========

    /// Send a contact request to a user by display name
    ///
    /// # Returns
    /// * `Ok(true)` - Request is pending (newly created, or already was)
    /// * `Ok(false)` - No such user, or the target is the requester
    ///
    /// # Errors
    /// Returns [`Error::NotAuthenticated`] if no session is set
    pub fn send_contact_request(&mut self, target_name: &str) -> Result<bool> {
        let requester_id = self
            .current_user
            .clone()
            .ok_or(Error::NotAuthenticated)?;

        let target_id = match self
            .users
            .iter()
            .find(|u| u.name == target_name && u.id != requester_id)
        {
            Some(user) => user.id.clone(),
            None => return Ok(false),
        };

        // At most one pending request per ordered pair.
        if self
            .contact_requests
            .iter()
            .any(|r| r.is_between(&requester_id, &target_id))
        {
            tracing::debug!("Contact request to {} already pending", target_name);
            return Ok(true);
        }

        self.contact_requests
            .push(ContactRequest::new(requester_id, target_id));
        Ok(true)
    }

    /// Accept a pending contact request
    ///
    /// Removes the request from the pending set and creates the direct chat
    /// between the two parties through the dedup-aware create, so accepting
    /// twice (or accepting when a chat already exists through another path)
    /// never produces a duplicate chat.
    ///
    /// # Returns
    /// The id of the direct chat, or `None` if no such request is pending
    pub fn accept_contact_request(&mut self, request_id: &str) -> Option<String> {
        let index = self
            .contact_requests
            .iter()
            .position(|r| r.id == request_id)?;
        let request = self.contact_requests.remove(index);

        let chat_id = self.create_chat(
            &[request.from_user_id.clone(), request.to_user_id.clone()],
            false,
            None,
        );

        tracing::info!(
            "Contact request {} accepted, chat {}",
            request_id,
            chat_id
        );
        Some(chat_id)
    }

    /// Pending contact requests addressed to the given user
    pub fn pending_requests_for(&self, user_id: &str) -> Vec<&ContactRequest> {
        self.contact_requests
            .iter()
            .filter(|r| r.to_user_id == user_id)
            .collect()
    }

    // ========== Persistence ==========

    /// Save the application state to a file
    ///
    /// # Arguments
    /// * `path` - Path to the state file (e.g., "chatxa-storage.json")
    ///
    /// # Errors
    /// Returns an error if file operations or serialization fail
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .map_err(|e| Error::Storage(format!("Failed to write state file: {}", e)))?;
        Ok(())
    }

    /// Load the application state from a file
    ///
    /// # Returns
    /// A loaded `AppState` or a new empty state if the file doesn't exist
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or deserialized
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        // If file doesn't exist, return a new empty state
        if !path_ref.exists() {
            return Ok(Self::new());
        }

        let json = std::fs::read_to_string(path_ref)
            .map_err(|e| Error::Storage(format!("Failed to read state file: {}", e)))?;

        let state: AppState = serde_json::from_str(&json)?;
        Ok(state)
    }

    /// Save state using CBOR format (more compact)
    pub fn save_cbor<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let cbor = serde_cbor::to_vec(self)
            .map_err(|e| Error::CborSerialization(format!("Failed to serialize state: {}", e)))?;
        std::fs::write(path, cbor)
            .map_err(|e| Error::Storage(format!("Failed to write state file: {}", e)))?;
        Ok(())
    }

    /// Load state from CBOR format
    pub fn load_cbor<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Ok(Self::new());
        }

        let cbor = std::fs::read(path_ref)
            .map_err(|e| Error::Storage(format!("Failed to read state file: {}", e)))?;

        let state: AppState = serde_cbor::from_slice(&cbor)
            .map_err(|e| Error::CborSerialization(format!("Failed to deserialize state: {}", e)))?;
        Ok(state)
    }

    /// Load the state, falling back to empty defaults on a corrupt blob
    ///
    /// A corrupt state file is sidelined with a `.corrupt` suffix so the next
    /// save starts clean.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path_ref = path.as_ref();
        match Self::load(path_ref) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Corrupt state store, starting fresh: {}", e);
                let backup_path = path_ref.with_extension("json.corrupt");
                let _ = std::fs::rename(path_ref, &backup_path);
                Self::new()
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
