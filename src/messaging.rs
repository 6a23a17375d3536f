//! High-level messaging module
//!
//! This module provides user-facing flows that combine the shared store with
//! the assistant gateway: the sign-up and log-in workflows, and message
//! delivery that triggers a best-effort reply when the chat's counterpart is
//! the reserved AI identity.

use crate::{
    assistant::{AssistantGateway, REPLY_FALLBACK},
    store::{Message, MessageType, StoreManager, User},
    Result,
};
use std::sync::Arc;

/// Number of prior messages included in the assistant transcript
const HISTORY_TURNS: usize = 5;

/// Sign up a new user
///
/// Registers the user (rejecting an already-taken display name), signs them
/// in, and bootstraps their direct chat with the reserved AI identity.
///
/// # Errors
/// Returns an error if the display name is taken or the store cannot be
/// persisted
pub async fn sign_up(store: &StoreManager, name: &str, secret: Option<&str>) -> Result<User> {
    let user = store.register_user(name, secret).await?;
    tracing::info!("User {} signed up", user.name);
    Ok(user)
}

/// Log in an existing user
///
/// The reserved administrative name/secret pair bypasses registration and is
/// auto-registered on first use. Invalid credentials yield `Ok(None)` with
/// no session change.
pub async fn log_in(
    store: &StoreManager,
    name: &str,
    secret: Option<&str>,
) -> Result<Option<User>> {
    let user = store.authenticate(name, secret).await?;
    match &user {
        Some(user) => tracing::info!("User {} logged in", user.name),
        None => tracing::debug!("Rejected login for {}", name),
    }
    Ok(user)
}

/// Send a message, requesting an assistant reply when applicable
///
/// The user's message is appended to the ledger first. If the chat's
/// counterpart is the reserved AI identity and the message is text, a reply
/// task is spawned with the just-sent text and the prior-turn transcript;
/// the task appends its result as a normal assistant-authored message. The
/// reply is fire-and-forget: it lands in the ledger even if the caller has
/// navigated away, and a gateway failure degrades to the fixed fallback
/// string instead of surfacing here.
///
/// # Arguments
/// * `store` - The shared state manager
/// * `gateway` - The assistant gateway
/// * `chat_id` - Chat to send into
/// * `content` - Message content
/// * `kind` - Content kind
/// * `duration` - Recording duration in seconds (audio/video only)
///
/// # Returns
/// The user's appended message
///
/// # Example
/// ```rust,no_run
/// use chatxa::assistant::{AssistantGateway, GeminiClient};
/// use chatxa::messaging::{send_chat_message, sign_up};
/// use chatxa::store::{MessageType, StoreManager};
/// use std::sync::Arc;
///
/// # async fn example() -> chatxa::Result<()> {
/// let store = StoreManager::new("chatxa-storage.json").await;
/// let gateway: Arc<dyn AssistantGateway> = Arc::new(GeminiClient::from_env());
///
/// let user = sign_up(&store, "alice", Some("hunter2")).await?;
/// let chats = store.chats_for(&user.id).await;
///
/// // The assistant thread answers asynchronously.
/// send_chat_message(&store, &gateway, &chats[0].id, "hello", MessageType::Text, None).await?;
/// # Ok(())
/// # }
/// ```
pub async fn send_chat_message(
    store: &StoreManager,
    gateway: &Arc<dyn AssistantGateway>,
    chat_id: &str,
    content: &str,
    kind: MessageType,
    duration: Option<u32>,
) -> Result<Message> {
    // Capture the assistant counterpart and transcript before the send so
    // the transcript reflects the thread as it was when the user typed.
    let assistant_id = if kind == MessageType::Text {
        store.assistant_partner(chat_id).await
    } else {
        None
    };
    let history = match assistant_id {
        Some(_) => assistant_transcript(store, chat_id, HISTORY_TURNS).await,
        None => Vec::new(),
    };

    let message = store.send_message(chat_id, content, kind, duration).await?;

    if let Some(assistant_id) = assistant_id {
        let store = store.clone();
        let gateway = Arc::clone(gateway);
        let chat_id = chat_id.to_string();
        let prompt = content.to_string();

        tokio::spawn(async move {
            if let Err(e) = request_assistant_reply(
                &store,
                gateway.as_ref(),
                &chat_id,
                &assistant_id,
                &prompt,
                &history,
            )
            .await
            {
                tracing::error!("Failed to append assistant reply to {}: {}", chat_id, e);
            }
        });
    }

    Ok(message)
}

/// Request a single assistant reply and append it to the chat
///
/// Awaits the gateway and appends its text as an assistant-authored message
/// through the same append path user sends use. A gateway failure degrades
/// to the fixed fallback string, so the thread always gains exactly one
/// reply message per AI-directed send.
///
/// # Errors
/// Returns an error only if the append itself fails (unknown chat, or the
/// store cannot be persisted) - never for gateway failures
pub async fn request_assistant_reply(
    store: &StoreManager,
    gateway: &dyn AssistantGateway,
    chat_id: &str,
    assistant_id: &str,
    prompt: &str,
    history: &[String],
) -> Result<Message> {
    let reply = match gateway.reply(prompt, history).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Assistant gateway failed: {}. Using fallback reply.", e);
            REPLY_FALLBACK.to_string()
        }
    };

    store
        .append_message(chat_id, assistant_id, &reply, MessageType::Text)
        .await
}

/// Render the most recent messages of a chat as a labeled transcript
///
/// Messages authored by the reserved AI identity are labeled `AI`, all
/// others `User`, matching the turn labels the gateway persona expects.
pub async fn assistant_transcript(
    store: &StoreManager,
    chat_id: &str,
    turns: usize,
) -> Vec<String> {
    let snapshot = store.snapshot().await;
    let assistant_id = snapshot
        .assistant_user()
        .map(|u| u.id.clone())
        .unwrap_or_default();

    let messages = snapshot.messages_for(chat_id);
    messages
        .iter()
        .skip(messages.len().saturating_sub(turns))
        .map(|m| {
            let label = if m.sender_id == assistant_id { "AI" } else { "User" };
            format!("{}: {}", label, m.content)
        })
        .collect()
}
