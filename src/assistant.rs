//! Assistant gateway module
//!
//! This module handles the one external capability of the engine: turning a
//! user utterance plus a short prior-turn transcript into a single reply
//! from the reserved AI identity. It covers:
//! - The `AssistantGateway` trait consumed by the messaging layer
//! - A Gemini-backed implementation over HTTPS
//! - Persona/prompt composition and the fixed fallback replies
//!
//! The gateway keeps no state across calls beyond the transcript supplied by
//! the caller; it is a stateless request/response turn generator.

use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Display name of the reserved AI identity
pub const ASSISTANT_NAME: &str = "ChatXA AI";

/// Secret stored on the reserved AI identity
pub const ASSISTANT_SECRET: &str = "ai-secure-pass";

/// Model identifier sent to the Gemini API
pub const GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "API_KEY";

/// Base URL of the Gemini generateContent endpoint
const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Reply returned when no API key is configured
pub const MISSING_KEY_REPLY: &str =
    "Please configure the API_KEY in your environment to use ChatXA Intelligence.";

/// Reply returned when the model produced no usable text
pub const EMPTY_REPLY: &str = "I'm having trouble processing that right now.";

/// Fallback appended to the chat when the gateway call fails outright
pub const REPLY_FALLBACK: &str =
    "Connection to ChatXA Brain failed. Please try again later.";

/// Fixed system instruction for every request
const SYSTEM_INSTRUCTION: &str =
    "You are a highly advanced AI assistant named ChatXA built by Company XA.";

/// Persona preamble prepended to the prompt
const PERSONA_PREAMBLE: &str = "You are ChatXA, a helpful, intelligent assistant developed by Company XA. \
Your name is ChatXA. You are polite, concise, and helpful. \
You can help with drafting messages, translation, and general knowledge.";

/// Compose the full prompt from the persona preamble, the prior-turn
/// transcript, and the current user utterance
pub fn compose_prompt(prompt: &str, history: &[String]) -> String {
    format!(
        "{}\nPrevious conversation context: {}\nUser: {}",
        PERSONA_PREAMBLE,
        history.join("\n"),
        prompt
    )
}

/// A stateless reply generator for the reserved AI identity
///
/// Implementations may fail; the messaging layer degrades any error to
/// [`REPLY_FALLBACK`] so a gateway failure never propagates to the sender.
#[async_trait]
pub trait AssistantGateway: Send + Sync {
    /// Generate a single reply for the prompt and prior-turn transcript
    async fn reply(&self, prompt: &str, history: &[String]) -> Result<String>;
}

// ===== Gemini wire format =====

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: ContentPayload,
    contents: Vec<ContentPayload>,
}

#[derive(Debug, Serialize)]
struct ContentPayload {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Gemini-backed assistant gateway
///
/// # Example
/// ```rust,no_run
/// use chatxa::assistant::{AssistantGateway, GeminiClient};
///
/// # async fn example() -> chatxa::Result<()> {
/// let client = GeminiClient::from_env();
/// let reply = client.reply("Translate 'hello' to Arabic", &[]).await?;
/// println!("{}", reply);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GeminiClient {
    /// HTTP client for gateway calls
    http: reqwest::Client,
    /// API key; requests without one short-circuit to [`MISSING_KEY_REPLY`]
    api_key: Option<String>,
    /// Model identifier
    model: String,
}

impl GeminiClient {
    /// Create a new client with an explicit API key
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()),
            model: GEMINI_MODEL.to_string(),
        }
    }

    /// Create a client from the `API_KEY` environment variable
    pub fn from_env() -> Self {
        Self::new(std::env::var(API_KEY_ENV).ok())
    }

    /// Override the model identifier
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Extract the first candidate's text from a response
    fn first_candidate_text(response: &GenerateContentResponse) -> Option<String> {
        let text = response
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<String>();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::from_env()
    }
}

#[async_trait]
impl AssistantGateway for GeminiClient {
    async fn reply(&self, prompt: &str, history: &[String]) -> Result<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(MISSING_KEY_REPLY.to_string());
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_ENDPOINT, self.model, api_key
        );

        let request = GenerateContentRequest {
            system_instruction: ContentPayload {
                parts: vec![TextPart {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            contents: vec![ContentPayload {
                parts: vec![TextPart {
                    text: compose_prompt(prompt, history),
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Gateway(format!("Invalid gateway response: {}", e)))?;

        match Self::first_candidate_text(&body) {
            Some(text) => Ok(text),
            None => {
                tracing::debug!("Gateway returned no candidate text");
                Ok(EMPTY_REPLY.to_string())
            }
        }
    }
}
