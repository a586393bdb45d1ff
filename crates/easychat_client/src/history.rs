//! Conversation history: append-only during a session, cleared wholesale.

use crate::messages::ChatMessage;

/// Ordered role-tagged messages exchanged with the remote assistant.
/// The full list is resent with every request to preserve context.
#[derive(Debug, Default)]
pub struct ConversationHistory {
    messages: Vec<ChatMessage>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }

    /// Drop every message. Idempotent.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Owned copy for request bodies, rendering, and export.
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.clone()
    }
}
