//! Thread-safe state manager for concurrent access

use crate::{
    store::{
        app_state::{AppState, Theme},
        chat::Chat,
        message::{Message, MessageType},
        request::ContactRequest,
        status::Status,
        user::User,
    },
    Result,
};

/// Thread-safe state manager for UI layer access
///
/// Provides shared access to the application state with automatic
/// persistence after every mutation. Designed for use with UI layers that
/// need concurrent access, and for background tasks (assistant replies) that
/// re-enter the append path after the caller has moved on.
///
/// # Example
/// ```rust,no_run
/// use chatxa::store::{MessageType, StoreManager};
///
/// # async fn example() -> chatxa::Result<()> {
/// // Open the shared store (loads the blob, or starts empty)
/// let store = StoreManager::new("chatxa-storage.json").await;
///
/// // Sign up and message the assistant thread
/// let user = store.register_user("alice", Some("hunter2")).await?;
/// let chats = store.chats_for(&user.id).await;
/// store
///     .send_message(&chats[0].id, "hello", MessageType::Text, None)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// Shared application state
    state: std::sync::Arc<tokio::sync::RwLock<AppState>>,
    /// Path to the state blob for auto-save
    store_path: std::sync::Arc<String>,
}

impl StoreManager {
    /// Create a new state manager
    ///
    /// Loads the state blob from the specified path. A missing file starts
    /// empty; a corrupt file is sidelined and also starts empty.
    pub async fn new<P: AsRef<std::path::Path>>(path: P) -> Self {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let state = AppState::load_or_default(&path);

        Self {
            state: std::sync::Arc::new(tokio::sync::RwLock::new(state)),
            store_path: std::sync::Arc::new(path_str),
        }
    }

    /// Persist the given state to the store path
    fn persist(&self, state: &AppState) -> Result<()> {
        state.save(self.store_path.as_str())
    }

    // ========== Identity ==========

    /// Register a new user and sign them in (auto-saves)
    pub async fn register_user(&self, name: &str, secret: Option<&str>) -> Result<User> {
        let mut state = self.state.write().await;
        let user = state.register_user(name, secret)?;
        self.persist(&state)?;
        Ok(user)
    }

    /// Authenticate and sign in (auto-saves on success)
    pub async fn authenticate(&self, name: &str, secret: Option<&str>) -> Result<Option<User>> {
        let mut state = self.state.write().await;
        match state.authenticate(name, secret) {
            Some(user) => {
                self.persist(&state)?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Set or clear the current session identity (auto-saves)
    pub async fn set_current_user(&self, user_id: Option<String>) -> Result<()> {
        let mut state = self.state.write().await;
        state.set_current_user(user_id);
        self.persist(&state)
    }

    /// Get the current session user, if signed in
    pub async fn current_user(&self) -> Option<User> {
        let state = self.state.read().await;
        state.current_user().cloned()
    }

    /// Set the UI theme preference (auto-saves)
    pub async fn set_theme(&self, theme: Theme) -> Result<()> {
        let mut state = self.state.write().await;
        state.set_theme(theme);
        self.persist(&state)
    }

    /// Get the UI theme preference
    pub async fn theme(&self) -> Theme {
        let state = self.state.read().await;
        state.theme
    }

    /// All registered users (administrative read)
    pub async fn users(&self) -> Vec<User> {
        let state = self.state.read().await;
        state.users.clone()
    }

    // ========== Chats and messages ==========

    /// Create a chat, or return the existing direct chat id (auto-saves)
    pub async fn create_chat(
        &self,
        participant_ids: &[String],
        is_group: bool,
        group_name: Option<&str>,
    ) -> Result<String> {
        let mut state = self.state.write().await;
        let chat_id = state.create_chat(participant_ids, is_group, group_name);
        self.persist(&state)?;
        Ok(chat_id)
    }

    /// Get a chat by ID
    pub async fn chat(&self, chat_id: &str) -> Option<Chat> {
        let state = self.state.read().await;
        state.chat(chat_id).cloned()
    }

    /// Chats for a user, most recent activity first
    pub async fn chats_for(&self, user_id: &str) -> Vec<Chat> {
        let state = self.state.read().await;
        state.chats_for(user_id).into_iter().cloned().collect()
    }

    /// Send a message as the current user (auto-saves)
    pub async fn send_message(
        &self,
        chat_id: &str,
        content: &str,
        kind: MessageType,
        duration: Option<u32>,
    ) -> Result<Message> {
        let mut state = self.state.write().await;
        let message = state.send_message(chat_id, content, kind, duration)?;
        self.persist(&state)?;
        Ok(message)
    }

    /// Append a message from an explicit sender (auto-saves)
    ///
    /// Used by the assistant reply task; shares the user-send append path.
    pub async fn append_message(
        &self,
        chat_id: &str,
        sender_id: &str,
        content: &str,
        kind: MessageType,
    ) -> Result<Message> {
        let mut state = self.state.write().await;
        let message = state.append_message(chat_id, sender_id, content, kind, None)?;
        self.persist(&state)?;
        Ok(message)
    }

    /// Messages of a chat, in insertion order
    pub async fn messages_for(&self, chat_id: &str) -> Vec<Message> {
        let state = self.state.read().await;
        state.messages_for(chat_id).into_iter().cloned().collect()
    }

    /// The full message ledger (administrative read)
    pub async fn all_messages(&self) -> Vec<Message> {
        let state = self.state.read().await;
        state.messages.clone()
    }

    /// Resolve the assistant counterpart of a direct chat
    ///
    /// Returns the assistant's user id when the chat is direct, the current
    /// user participates, and the other participant is the reserved
    /// assistant identity.
    pub async fn assistant_partner(&self, chat_id: &str) -> Option<String> {
        let state = self.state.read().await;
        let assistant = state.assistant_user()?;
        let current_id = state.current_user.as_deref()?;
        let chat = state.chat(chat_id)?;
        let partner = chat.partner_of(current_id)?;
        (partner == assistant.id).then(|| assistant.id.clone())
    }

    // ========== Status board ==========

    /// Post a status as the current user (auto-saves)
    pub async fn add_status(&self, content: &str, kind: MessageType) -> Result<Status> {
        let mut state = self.state.write().await;
        let status = state.add_status(content, kind)?;
        self.persist(&state)?;
        Ok(status)
    }

    /// The status feed, most recent first
    pub async fn status_feed(&self) -> Vec<Status> {
        let state = self.state.read().await;
        state.statuses.clone()
    }

    // ========== Contact requests ==========

    /// Send a contact request to a user by display name (auto-saves)
    pub async fn send_contact_request(&self, target_name: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        let sent = state.send_contact_request(target_name)?;
        self.persist(&state)?;
        Ok(sent)
    }

    /// Accept a pending contact request (auto-saves)
    pub async fn accept_contact_request(&self, request_id: &str) -> Result<Option<String>> {
        let mut state = self.state.write().await;
        let chat_id = state.accept_contact_request(request_id);
        self.persist(&state)?;
        Ok(chat_id)
    }

    /// Pending contact requests addressed to a user
    pub async fn pending_requests_for(&self, user_id: &str) -> Vec<ContactRequest> {
        let state = self.state.read().await;
        state
            .pending_requests_for(user_id)
            .into_iter()
            .cloned()
            .collect()
    }

    // ========== Snapshots and persistence ==========

    /// Get a clone of the full state (for reading multiple values at once)
    pub async fn snapshot(&self) -> AppState {
        let state = self.state.read().await;
        state.clone()
    }

    /// Apply an arbitrary mutation and auto-save
    ///
    /// # Arguments
    /// * `update_fn` - Function that modifies the state
    pub async fn update<F>(&self, update_fn: F) -> Result<()>
    where
        F: FnOnce(&mut AppState),
    {
        let mut state = self.state.write().await;
        update_fn(&mut state);
        self.persist(&state)
    }

    /// Reload state from disk
    ///
    /// Useful for syncing with external changes to the state blob.
    pub async fn reload(&self) -> Result<()> {
        let loaded = AppState::load(self.store_path.as_str())?;
        let mut state = self.state.write().await;
        *state = loaded;
        Ok(())
    }

    /// Save current state to disk
    pub async fn save(&self) -> Result<()> {
        let state = self.state.read().await;
        self.persist(&state)
    }
}
