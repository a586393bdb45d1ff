//! Shared EasyChat client library: config, chat-completions dispatch with
//! client-side throttling, transcript export, and localized string tables.
//! Used by the Tauri desktop GUI.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod export;
pub mod history;
pub mod i18n;
pub mod messages;
pub mod rate_limit;

pub use config::{default_config_path, ApiSection, Config, ConfigError, UiSection};
pub use dispatcher::Dispatcher;
pub use error::ChatError;
pub use export::ExportError;
pub use history::ConversationHistory;
pub use i18n::{Language, TextKey};
pub use messages::{ChatMessage, ChatRequest, ChatResponse, Role};
pub use rate_limit::RateLimiter;
