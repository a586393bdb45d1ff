//! Plain-text transcript export: localized header, then `Role: content`
//! lines, blank-line separated.

use std::path::Path;

use crate::i18n::{self, Language, TextKey};
use crate::messages::{ChatMessage, Role};

/// Transcript export error.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Nothing to export; no file is created.
    #[error("no conversation to export")]
    Empty,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the transcript text for `messages`.
pub fn render_transcript(messages: &[ChatMessage], language: Language) -> String {
    let mut out = String::new();
    out.push_str(i18n::text(language, TextKey::ConversationHeader));
    out.push('\n');
    out.push_str(&"=".repeat(50));
    out.push_str("\n\n");

    for message in messages {
        let label = match message.role {
            Role::User => i18n::text(language, TextKey::User),
            Role::Assistant => i18n::text(language, TextKey::Assistant),
        };
        out.push_str(label);
        out.push_str(": ");
        out.push_str(&message.content);
        out.push_str("\n\n");
    }
    out
}

/// Write the transcript to `path`. Creates parent directories if missing.
/// Returns [`ExportError::Empty`] without touching the filesystem when there
/// is no conversation.
pub fn write_transcript(
    path: &Path,
    messages: &[ChatMessage],
    language: Language,
) -> Result<(), ExportError> {
    if messages.is_empty() {
        return Err(ExportError::Empty);
    }
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, render_transcript(messages, language))?;
    log::info!("exported {} messages to {}", messages.len(), path.display());
    Ok(())
}
