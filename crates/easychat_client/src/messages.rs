//! Chat-completions wire types (OpenAI-compatible JSON). Client ↔ server.

use serde::{Deserialize, Serialize};

/// Sampling temperature sent with every conversation request.
pub const TEMPERATURE: f32 = 0.7;
/// Completion budget sent with every conversation request.
pub const MAX_TOKENS: u32 = 2000;
/// Completion budget for the connection probe.
pub const PROBE_MAX_TOKENS: u32 = 10;

/// Message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One role-tagged message in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Client → server: chat-completions request body.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Request carrying the full conversation history.
    pub fn conversation(model: &str, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.to_string(),
            messages,
            temperature: Some(TEMPERATURE),
            max_tokens: MAX_TOKENS,
        }
    }

    /// Minimal request used by the connection test (no temperature, tiny budget).
    pub fn probe(model: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage::user("Hello")],
            temperature: None,
            max_tokens: PROBE_MAX_TOKENS,
        }
    }
}

/// Server → client: successful completion body.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: String,
}

/// Server → client: conventional error body `{"error":{"message":...}}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}
