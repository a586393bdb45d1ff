//! Tauri commands for config load/save, chat send, connection test, transcript
//! export, and localized labels. The Tauri `#[command]` wrappers delegate to
//! testable plain functions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use easychat_client::{
    config, export, i18n, ChatError, ChatMessage, Config, Dispatcher, ExportError, Language,
    TextKey,
};
use serde::{Deserialize, Serialize};

// ── Global runtime and session state (one conversation for the GUI) ─────

use std::sync::OnceLock;

fn global_runtime() -> &'static tokio::runtime::Runtime {
    static RT: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
    RT.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("failed to create tokio runtime")
    })
}

fn dispatcher() -> &'static Dispatcher {
    static DISPATCHER: OnceLock<Dispatcher> = OnceLock::new();
    DISPATCHER.get_or_init(Dispatcher::new)
}

/// Last loaded or saved config and its path. Written back at app exit.
static CURRENT: Mutex<Option<(PathBuf, Config)>> = Mutex::new(None);

fn current_config() -> Config {
    CURRENT
        .lock()
        .ok()
        .and_then(|guard| guard.as_ref().map(|(_, cfg)| cfg.clone()))
        .unwrap_or_default()
}

/// Save the loaded config back to its path. Called on shutdown; best effort.
pub fn persist_current_config() {
    if let Ok(guard) = CURRENT.lock() {
        if let Some((path, cfg)) = guard.as_ref() {
            if let Err(e) = config::save(path, cfg) {
                log::warn!("failed to persist config to {}: {}", path.display(), e);
            }
        }
    }
}

/// JSON-friendly config form values sent to/from the frontend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigForm {
    pub api_key: String,
    pub api_url: String,
    pub model_name: String,
    pub language: String,
    pub chat_font_size: u32,
    pub input_font_size: u32,
}

impl Default for ConfigForm {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: config::DEFAULT_API_URL.into(),
            model_name: config::DEFAULT_MODEL.into(),
            language: Language::default().as_config_str().into(),
            chat_font_size: config::DEFAULT_FONT_SIZE,
            input_font_size: config::DEFAULT_FONT_SIZE,
        }
    }
}

impl From<Config> for ConfigForm {
    fn from(c: Config) -> Self {
        Self {
            api_key: c.api_key().unwrap_or_default().into(),
            api_url: c.api_url().into(),
            model_name: c.model().into(),
            language: c.language().as_config_str().into(),
            chat_font_size: c.chat_font_size(),
            input_font_size: c.input_font_size(),
        }
    }
}

impl From<ConfigForm> for Config {
    fn from(f: ConfigForm) -> Self {
        Config {
            api: config::ApiSection {
                key: Some(f.api_key),
                url: Some(f.api_url),
                model: Some(f.model_name),
            },
            ui: config::UiSection {
                language: Some(f.language),
                chat_font_size: Some(f.chat_font_size),
                input_font_size: Some(f.input_font_size),
            },
        }
    }
}

/// Resolve config path from optional override, env, or default.
pub fn resolve_config_path(override_path: Option<&str>) -> Result<PathBuf, String> {
    if let Some(p) = override_path {
        return Ok(PathBuf::from(p));
    }
    if let Ok(val) = std::env::var("EASYCHAT_CONFIG") {
        return Ok(PathBuf::from(val));
    }
    config::default_config_path().ok_or_else(|| "Cannot determine config path".into())
}

// ── Testable backend functions ──────────────────────────────────────────

/// Load config from `path` and return form values. A missing file is not an
/// error: the form comes back with defaults, matching first-run behavior.
pub fn do_load_config(path: &str) -> Result<ConfigForm, String> {
    let path_ref = Path::new(path);
    let cfg = if path_ref.exists() {
        config::load(path_ref).map_err(|e| e.to_string())?
    } else {
        Config::default()
    };
    if let Ok(mut guard) = CURRENT.lock() {
        *guard = Some((path_ref.to_path_buf(), cfg.clone()));
    }
    Ok(ConfigForm::from(cfg))
}

/// Save form values to `path` as YAML. Creates parent dirs if needed.
pub fn do_save_config(path: &str, form: &ConfigForm) -> Result<(), String> {
    let cfg: Config = form.clone().into();
    config::save(Path::new(path), &cfg).map_err(|e| e.to_string())?;
    if let Ok(mut guard) = CURRENT.lock() {
        *guard = Some((PathBuf::from(path), cfg));
    }
    Ok(())
}

/// Outcome of one send, returned to the frontend. A failed send is still an
/// `Ok` reply with the error embedded; the user message stays in the history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SendReply {
    /// Assistant reply content on success.
    pub content: Option<String>,
    /// Localized error message on failure.
    pub error: Option<String>,
    /// Machine-readable error tag ("rate_limited", "timeout", ...).
    pub error_kind: Option<String>,
    /// Wait hint in seconds when `error_kind` is "rate_limited".
    pub retry_after: Option<u64>,
    /// "connected" or "connection_lost", for the status display.
    pub status: String,
}

/// Send one user message through the dispatcher with the current config.
pub fn do_send_message(message: &str) -> SendReply {
    let cfg = current_config();
    let language = cfg.language();
    let rt = global_runtime();
    match rt.block_on(dispatcher().send(&cfg, message)) {
        Ok(content) => SendReply {
            content: Some(content),
            error: None,
            error_kind: None,
            retry_after: None,
            status: "connected".into(),
        },
        Err(e) => {
            let retry_after = match &e {
                ChatError::RateLimited {
                    retry_after_secs, ..
                } => Some(*retry_after_secs),
                _ => None,
            };
            SendReply {
                content: None,
                error: Some(i18n::describe_error(language, &e)),
                error_kind: Some(e.kind().into()),
                retry_after,
                status: "connection_lost".into(),
            }
        }
    }
}

/// Connection status returned to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionStatus {
    /// "connected" or "error".
    pub state: String,
    /// Localized error message when state is "error".
    pub message: Option<String>,
}

/// Probe the configured endpoint. Never an `Err` — failure is reported in
/// the status.
pub fn do_test_connection() -> ConnectionStatus {
    let cfg = current_config();
    let language = cfg.language();
    let rt = global_runtime();
    match rt.block_on(dispatcher().test_connection(&cfg)) {
        Ok(()) => ConnectionStatus {
            state: "connected".into(),
            message: None,
        },
        Err(e) => ConnectionStatus {
            state: "error".into(),
            message: Some(i18n::describe_error(language, &e)),
        },
    }
}

/// Reset the conversation. Idempotent.
pub fn do_clear_conversation() {
    dispatcher().clear_history();
}

/// Owned copy of the conversation for rendering.
pub fn do_conversation_snapshot() -> Vec<ChatMessage> {
    dispatcher().history_snapshot()
}

/// Export the transcript. With no path, writes a timestamped file next to
/// the config. Returns a localized status line for the status bar.
pub fn do_export_conversation(path: Option<&str>) -> Result<String, String> {
    let cfg = current_config();
    let language = cfg.language();

    let target = match path {
        Some(p) => PathBuf::from(p),
        None => default_export_path()?,
    };
    let messages = dispatcher().history_snapshot();
    match export::write_transcript(&target, &messages, language) {
        Ok(()) => Ok(format!(
            "{}{}",
            i18n::text(language, TextKey::ExportSuccess),
            target.display()
        )),
        Err(ExportError::Empty) => Err(i18n::text(language, TextKey::NoConversation).into()),
        Err(e) => Err(format!(
            "{}{}",
            i18n::text(language, TextKey::ExportFail),
            e
        )),
    }
}

fn default_export_path() -> Result<PathBuf, String> {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let dir = config::default_config_path()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .ok_or_else(|| "Cannot determine export path".to_string())?;
    Ok(dir.join(format!("transcript_{}.txt", stamp)))
}

/// Label table for the given (or current) language, keyed by stable ids.
pub fn do_ui_texts(language: Option<&str>) -> BTreeMap<&'static str, &'static str> {
    let lang = match language {
        Some(value) => Language::from_config(value),
        None => current_config().language(),
    };
    i18n::label_map(lang)
}

// ── Tauri command wrappers ──────────────────────────────────────────────

#[tauri::command]
pub fn get_config_path() -> Result<String, String> {
    let p = resolve_config_path(None)?;
    p.to_str()
        .map(|s| s.to_string())
        .ok_or_else(|| "Config path is not valid UTF-8".into())
}

#[tauri::command]
pub fn load_config(path: String) -> Result<ConfigForm, String> {
    do_load_config(&path)
}

#[tauri::command]
pub fn save_config(
    app: tauri::AppHandle,
    path: String,
    form: ConfigForm,
) -> Result<(), String> {
    use tauri::Emitter;
    do_save_config(&path, &form)?;
    // The frontend re-fetches ui_texts and re-renders labels on this event.
    let _ = app.emit("settings-changed", form);
    Ok(())
}

#[tauri::command]
pub fn send_message(message: String) -> SendReply {
    do_send_message(&message)
}

#[tauri::command]
pub fn test_connection() -> ConnectionStatus {
    do_test_connection()
}

#[tauri::command]
pub fn clear_conversation() {
    do_clear_conversation();
}

#[tauri::command]
pub fn export_conversation(path: Option<String>) -> Result<String, String> {
    do_export_conversation(path.as_deref())
}

#[tauri::command]
pub fn conversation_snapshot() -> Vec<ChatMessage> {
    do_conversation_snapshot()
}

#[tauri::command]
pub fn ui_texts(language: Option<String>) -> BTreeMap<&'static str, &'static str> {
    do_ui_texts(language.as_deref())
}
