//! Localized string tables (Chinese / English), keyed by stable identifiers.
//! The GUI never recovers a key from displayed text; it renders from the map
//! returned by [`label_map`] and re-fetches it after a settings change.

use std::collections::BTreeMap;

use crate::error::ChatError;

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Chinese,
    English,
}

impl Language {
    /// Parse the value stored in config (`中文` / `English`, case-insensitive
    /// English aliases accepted). Unknown values fall back to Chinese.
    pub fn from_config(value: &str) -> Self {
        match value.trim() {
            "English" | "english" | "en" => Language::English,
            _ => Language::Chinese,
        }
    }

    /// Value written back to config.
    pub fn as_config_str(&self) -> &'static str {
        match self {
            Language::Chinese => "中文",
            Language::English => "English",
        }
    }
}

/// Stable identifier for one UI string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    WindowTitle,
    Settings,
    ApiSettings,
    ApiKey,
    ApiUrl,
    ModelName,
    UiSettings,
    LanguageLabel,
    FontSettings,
    ChatFontSize,
    InputFontSize,
    Send,
    Clear,
    Export,
    TestConnection,
    Save,
    Cancel,
    User,
    Assistant,
    System,
    Ready,
    Sending,
    SendSuccess,
    SendFail,
    NoApiKey,
    ConfirmClear,
    Cleared,
    NoConversation,
    ExportTitle,
    ExportSuccess,
    ExportFail,
    SettingsSaved,
    ConnectionSuccess,
    ConnectionFail,
    ConnectionError,
    RateLimit,
    WaitTime,
    NotConnected,
    Connected,
    ConnectionLost,
    ConversationHeader,
    ErrorLabel,
    ApiErrorStatus,
    ApiErrorDetails,
    RequestTimeout,
    ConnectionFailed,
    ErrorOccurred,
}

impl TextKey {
    pub const ALL: [TextKey; 47] = [
        TextKey::WindowTitle,
        TextKey::Settings,
        TextKey::ApiSettings,
        TextKey::ApiKey,
        TextKey::ApiUrl,
        TextKey::ModelName,
        TextKey::UiSettings,
        TextKey::LanguageLabel,
        TextKey::FontSettings,
        TextKey::ChatFontSize,
        TextKey::InputFontSize,
        TextKey::Send,
        TextKey::Clear,
        TextKey::Export,
        TextKey::TestConnection,
        TextKey::Save,
        TextKey::Cancel,
        TextKey::User,
        TextKey::Assistant,
        TextKey::System,
        TextKey::Ready,
        TextKey::Sending,
        TextKey::SendSuccess,
        TextKey::SendFail,
        TextKey::NoApiKey,
        TextKey::ConfirmClear,
        TextKey::Cleared,
        TextKey::NoConversation,
        TextKey::ExportTitle,
        TextKey::ExportSuccess,
        TextKey::ExportFail,
        TextKey::SettingsSaved,
        TextKey::ConnectionSuccess,
        TextKey::ConnectionFail,
        TextKey::ConnectionError,
        TextKey::RateLimit,
        TextKey::WaitTime,
        TextKey::NotConnected,
        TextKey::Connected,
        TextKey::ConnectionLost,
        TextKey::ConversationHeader,
        TextKey::ErrorLabel,
        TextKey::ApiErrorStatus,
        TextKey::ApiErrorDetails,
        TextKey::RequestTimeout,
        TextKey::ConnectionFailed,
        TextKey::ErrorOccurred,
    ];

    /// Snake-case identifier used as the map key sent to the frontend.
    pub fn id(self) -> &'static str {
        match self {
            TextKey::WindowTitle => "window_title",
            TextKey::Settings => "settings",
            TextKey::ApiSettings => "api_settings",
            TextKey::ApiKey => "api_key",
            TextKey::ApiUrl => "api_url",
            TextKey::ModelName => "model_name",
            TextKey::UiSettings => "ui_settings",
            TextKey::LanguageLabel => "language",
            TextKey::FontSettings => "font_settings",
            TextKey::ChatFontSize => "chat_font_size",
            TextKey::InputFontSize => "input_font_size",
            TextKey::Send => "send",
            TextKey::Clear => "clear",
            TextKey::Export => "export",
            TextKey::TestConnection => "test_connection",
            TextKey::Save => "save",
            TextKey::Cancel => "cancel",
            TextKey::User => "user",
            TextKey::Assistant => "assistant",
            TextKey::System => "system",
            TextKey::Ready => "ready",
            TextKey::Sending => "sending",
            TextKey::SendSuccess => "send_success",
            TextKey::SendFail => "send_fail",
            TextKey::NoApiKey => "no_api_key",
            TextKey::ConfirmClear => "confirm_clear",
            TextKey::Cleared => "cleared",
            TextKey::NoConversation => "no_conversation",
            TextKey::ExportTitle => "export_title",
            TextKey::ExportSuccess => "export_success",
            TextKey::ExportFail => "export_fail",
            TextKey::SettingsSaved => "settings_saved",
            TextKey::ConnectionSuccess => "connection_success",
            TextKey::ConnectionFail => "connection_fail",
            TextKey::ConnectionError => "connection_error",
            TextKey::RateLimit => "rate_limit",
            TextKey::WaitTime => "wait_time",
            TextKey::NotConnected => "not_connected",
            TextKey::Connected => "connected",
            TextKey::ConnectionLost => "connection_lost",
            TextKey::ConversationHeader => "conversation_header",
            TextKey::ErrorLabel => "error",
            TextKey::ApiErrorStatus => "api_error_status",
            TextKey::ApiErrorDetails => "api_error_details",
            TextKey::RequestTimeout => "request_timeout",
            TextKey::ConnectionFailed => "connection_failed",
            TextKey::ErrorOccurred => "error_occurred",
        }
    }
}

/// Localized string for `key`.
pub fn text(language: Language, key: TextKey) -> &'static str {
    match language {
        Language::Chinese => chinese(key),
        Language::English => english(key),
    }
}

fn chinese(key: TextKey) -> &'static str {
    match key {
        TextKey::WindowTitle => "EasyChat - AI智能对话助手",
        TextKey::Settings => "设置",
        TextKey::ApiSettings => "API 设置",
        TextKey::ApiKey => "API 密钥:",
        TextKey::ApiUrl => "API 地址:",
        TextKey::ModelName => "模型名称:",
        TextKey::UiSettings => "界面设置",
        TextKey::LanguageLabel => "界面语言:",
        TextKey::FontSettings => "字体设置",
        TextKey::ChatFontSize => "对话框字体大小:",
        TextKey::InputFontSize => "输入框字体大小:",
        TextKey::Send => "发送消息",
        TextKey::Clear => "清空",
        TextKey::Export => "导出",
        TextKey::TestConnection => "测试连接",
        TextKey::Save => "保存",
        TextKey::Cancel => "取消",
        TextKey::User => "用户",
        TextKey::Assistant => "助手",
        TextKey::System => "系统",
        TextKey::Ready => "就绪",
        TextKey::Sending => "正在发送消息...",
        TextKey::SendSuccess => "消息发送成功",
        TextKey::SendFail => "发送失败",
        TextKey::NoApiKey => "请先在设置中配置API密钥",
        TextKey::ConfirmClear => "确定要清空所有对话记录吗？",
        TextKey::Cleared => "对话已清空",
        TextKey::NoConversation => "没有对话记录可导出",
        TextKey::ExportTitle => "导出对话记录",
        TextKey::ExportSuccess => "对话记录已导出到: ",
        TextKey::ExportFail => "导出失败: ",
        TextKey::SettingsSaved => "设置已保存",
        TextKey::ConnectionSuccess => "API连接测试成功！",
        TextKey::ConnectionFail => "连接失败: ",
        TextKey::ConnectionError => "连接测试失败: ",
        TextKey::RateLimit => "请求频率超限，请等待{seconds}秒后重试。",
        TextKey::WaitTime => "请求过于频繁，请等待 {seconds} 秒...",
        TextKey::NotConnected => "未连接",
        TextKey::Connected => "已连接",
        TextKey::ConnectionLost => "连接失败",
        TextKey::ConversationHeader => "EasyChat 对话记录",
        TextKey::ErrorLabel => "错误",
        TextKey::ApiErrorStatus => "API请求失败 (状态码: {status_code})",
        TextKey::ApiErrorDetails => "详细信息：{message}",
        TextKey::RequestTimeout => "请求超时，请检查网络连接",
        TextKey::ConnectionFailed => "连接失败，请检查网络或API地址",
        TextKey::ErrorOccurred => "发生错误: {error}",
    }
}

fn english(key: TextKey) -> &'static str {
    match key {
        TextKey::WindowTitle => "EasyChat - AI Conversation Assistant",
        TextKey::Settings => "Settings",
        TextKey::ApiSettings => "API Settings",
        TextKey::ApiKey => "API Key:",
        TextKey::ApiUrl => "API URL:",
        TextKey::ModelName => "Model Name:",
        TextKey::UiSettings => "UI Settings",
        TextKey::LanguageLabel => "Interface Language:",
        TextKey::FontSettings => "Font Settings",
        TextKey::ChatFontSize => "Chat Font Size:",
        TextKey::InputFontSize => "Input Font Size:",
        TextKey::Send => "Send",
        TextKey::Clear => "Clear",
        TextKey::Export => "Export",
        TextKey::TestConnection => "Test Connection",
        TextKey::Save => "Save",
        TextKey::Cancel => "Cancel",
        TextKey::User => "User",
        TextKey::Assistant => "Assistant",
        TextKey::System => "System",
        TextKey::Ready => "Ready",
        TextKey::Sending => "Sending message...",
        TextKey::SendSuccess => "Message sent successfully",
        TextKey::SendFail => "Send failed",
        TextKey::NoApiKey => "Please configure API key in settings first",
        TextKey::ConfirmClear => "Are you sure you want to clear all conversations?",
        TextKey::Cleared => "Conversation cleared",
        TextKey::NoConversation => "No conversation to export",
        TextKey::ExportTitle => "Export Conversation",
        TextKey::ExportSuccess => "Conversation exported to: ",
        TextKey::ExportFail => "Export failed: ",
        TextKey::SettingsSaved => "Settings saved",
        TextKey::ConnectionSuccess => "API connection test successful!",
        TextKey::ConnectionFail => "Connection failed: ",
        TextKey::ConnectionError => "Connection test failed: ",
        TextKey::RateLimit => "Rate limit exceeded, please wait {seconds} seconds.",
        TextKey::WaitTime => "Too many requests, please wait {seconds} seconds...",
        TextKey::NotConnected => "Not Connected",
        TextKey::Connected => "Connected",
        TextKey::ConnectionLost => "Connection Lost",
        TextKey::ConversationHeader => "EasyChat Conversation Log",
        TextKey::ErrorLabel => "Error",
        TextKey::ApiErrorStatus => "API request failed (status code: {status_code})",
        TextKey::ApiErrorDetails => "Details: {message}",
        TextKey::RequestTimeout => "Request timeout, please check your network connection",
        TextKey::ConnectionFailed => "Connection failed, please check your network or API URL",
        TextKey::ErrorOccurred => "An error occurred: {error}",
    }
}

/// Full label table for `language`, keyed by [`TextKey::id`]. Sent to the
/// frontend in one piece so a language switch is a single re-render.
pub fn label_map(language: Language) -> BTreeMap<&'static str, &'static str> {
    TextKey::ALL
        .iter()
        .map(|&key| (key.id(), text(language, key)))
        .collect()
}

/// Render a [`ChatError`] as the user-facing message for `language`.
pub fn describe_error(language: Language, error: &ChatError) -> String {
    match error {
        ChatError::MissingApiKey => text(language, TextKey::NoApiKey).to_string(),
        ChatError::RateLimited {
            retry_after_secs,
            message,
        } => {
            let mut out = text(language, TextKey::RateLimit)
                .replace("{seconds}", &retry_after_secs.to_string());
            if let Some(detail) = message {
                out.push('\n');
                out.push_str(&text(language, TextKey::ApiErrorDetails).replace("{message}", detail));
            }
            out
        }
        ChatError::Status { code, message } => {
            let mut out = text(language, TextKey::ApiErrorStatus)
                .replace("{status_code}", &code.to_string());
            if let Some(detail) = message {
                out.push('\n');
                out.push_str(&text(language, TextKey::ApiErrorDetails).replace("{message}", detail));
            }
            out
        }
        ChatError::Timeout => text(language, TextKey::RequestTimeout).to_string(),
        ChatError::Connect => text(language, TextKey::ConnectionFailed).to_string(),
        ChatError::EmptyMessage | ChatError::SendInFlight | ChatError::Other(_) => {
            text(language, TextKey::ErrorOccurred).replace("{error}", &error.to_string())
        }
    }
}
