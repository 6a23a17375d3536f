//! Conversation state module
//!
//! This module owns all persistent engine state:
//! - Registered users and the current session
//! - Direct and group chats
//! - The append-only message ledger
//! - Status posts
//! - Contact requests
//!
//! The module is organized into submodules for better maintainability:
//! - `user` - User identities and the reserved admin account
//! - `chat` - Chat conversations (direct and group)
//! - `message` - Message structures and content types
//! - `status` - Ephemeral status posts
//! - `request` - Contact request lifecycle
//! - `app_state` - The single process-wide state container and persistence
//! - `store_manager` - Thread-safe state management for UI layers

// Submodules
pub mod app_state;
pub mod chat;
pub mod message;
pub mod request;
pub mod status;
pub mod store_manager;
pub mod user;

// Re-export commonly used types
pub use app_state::{AppState, Theme, STORAGE_FILE};
pub use chat::Chat;
pub use message::{Message, MessageType};
pub use request::{ContactRequest, RequestStatus};
pub use status::Status;
pub use store_manager::StoreManager;
pub use user::{User, ADMIN_NAME, ADMIN_SECRET};
