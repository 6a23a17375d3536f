//! ChatXA - a local-first messaging engine
//!
//! This library provides the conversation state engine for ChatXA: users,
//! direct and group chats, a global message ledger, ephemeral status posts,
//! contact requests, and the assistant gateway that answers messages sent to
//! the reserved AI identity. Presentation layers (web, desktop) drive the
//! engine exclusively through the operations exposed here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assistant;
pub mod messaging;
pub mod store;

/// Result type alias for ChatXA operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ChatXA operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Identity directory error (e.g. registering an already-taken name)
    #[error("Identity error: {0}")]
    Identity(String),

    /// Operation requires a signed-in user but no session is set
    #[error("Not authenticated: no current user")]
    NotAuthenticated,

    /// Storage operation error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Assistant gateway error
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// CBOR serialization error
    #[error("CBOR serialization error: {0}")]
    CborSerialization(String),

    /// HTTP error from the assistant gateway
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Initialize the ChatXA library with logging
pub fn init() {
    tracing_subscriber::fmt::init();
}

#[cfg(test)]
mod tests;
