//! Outbound-message pipeline: throttle, append, POST, classify.
//!
//! One [`Dispatcher`] lives for the whole session. It owns the conversation
//! history and the rate limiter; the GUI only reads snapshots. `send` is
//! single-flight: a second call while one is in progress is rejected instead
//! of queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;

use crate::config::Config;
use crate::error::ChatError;
use crate::history::ConversationHistory;
use crate::messages::{ApiErrorBody, ChatMessage, ChatRequest, ChatResponse};
use crate::rate_limit::RateLimiter;

/// Read timeout for a conversation send.
pub const SEND_TIMEOUT: Duration = Duration::from_secs(30);
/// Read timeout for the connection test.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Fallback wait hint when a 429 carries no `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

pub struct Dispatcher {
    http: reqwest::Client,
    history: Mutex<ConversationHistory>,
    limiter: Mutex<RateLimiter>,
    sending: AtomicBool,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            history: Mutex::new(ConversationHistory::new()),
            limiter: Mutex::new(RateLimiter::new()),
            sending: AtomicBool::new(false),
        }
    }

    /// Owned copy of the conversation for rendering and export.
    pub fn history_snapshot(&self) -> Vec<ChatMessage> {
        self.history
            .lock()
            .map(|h| h.snapshot())
            .unwrap_or_default()
    }

    /// Reset the conversation. Safe to call repeatedly.
    pub fn clear_history(&self) {
        if let Ok(mut history) = self.history.lock() {
            history.clear();
        }
    }

    /// Send one user message and return the assistant's reply content.
    ///
    /// Validates first (empty message, missing key: no network call, no
    /// history mutation), then records the send with the rate limiter and
    /// sleeps out any indicated delay before the single POST. The user
    /// message stays in the history even when the request fails.
    pub async fn send(&self, config: &Config, message: &str) -> Result<String, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let api_key = config.api_key().ok_or(ChatError::MissingApiKey)?.to_string();

        if self
            .sending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ChatError::SendInFlight);
        }
        let result = self.send_inner(config, &api_key, message).await;
        self.sending.store(false, Ordering::SeqCst);
        result
    }

    async fn send_inner(
        &self,
        config: &Config,
        api_key: &str,
        message: &str,
    ) -> Result<String, ChatError> {
        let delay = {
            let mut limiter = self
                .limiter
                .lock()
                .map_err(|e| ChatError::Other(e.to_string()))?;
            limiter.should_delay(Instant::now())
        };
        if !delay.is_zero() {
            log::info!("throttling send for {:.1}s", delay.as_secs_f64());
            tokio::time::sleep(delay).await;
        }

        let messages = {
            let mut history = self
                .history
                .lock()
                .map_err(|e| ChatError::Other(e.to_string()))?;
            history.push_user(message);
            history.snapshot()
        };
        let request = ChatRequest::conversation(config.model(), messages);

        log::debug!(
            "POST {} ({} messages, model {})",
            config.api_url(),
            request.messages.len(),
            request.model
        );
        let response = self
            .http
            .post(config.api_url())
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .timeout(SEND_TIMEOUT)
            .send()
            .await
            .map_err(classify_transport)?;

        if response.status() != StatusCode::OK {
            let error = classify_failure(response).await;
            log::warn!("send failed: {}", error);
            return Err(error);
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Other(e.to_string()))?;
        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ChatError::Other("response contained no choices".into()))?;

        let mut history = self
            .history
            .lock()
            .map_err(|e| ChatError::Other(e.to_string()))?;
        history.push_assistant(content.clone());
        Ok(content)
    }

    /// Probe the endpoint with a minimal request (10s timeout). Does not
    /// touch the history or the rate limiter.
    pub async fn test_connection(&self, config: &Config) -> Result<(), ChatError> {
        let api_key = config.api_key().ok_or(ChatError::MissingApiKey)?;
        let request = ChatRequest::probe(config.model());

        let response = self
            .http
            .post(config.api_url())
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map_err(classify_transport)?;

        if response.status() == StatusCode::OK {
            Ok(())
        } else {
            Err(classify_failure(response).await)
        }
    }
}

fn classify_transport(error: reqwest::Error) -> ChatError {
    if error.is_timeout() {
        ChatError::Timeout
    } else if error.is_connect() {
        ChatError::Connect
    } else {
        ChatError::Other(error.to_string())
    }
}

/// Map a non-200 response to [`ChatError`], draining the body for the
/// conventional `{"error":{"message":...}}` detail when it parses.
async fn classify_failure(response: reqwest::Response) -> ChatError {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        ChatError::RateLimited {
            retry_after_secs,
            message: error_body_message(response).await,
        }
    } else {
        ChatError::Status {
            code: status.as_u16(),
            message: error_body_message(response).await,
        }
    }
}

async fn error_body_message(response: reqwest::Response) -> Option<String> {
    let text = response.text().await.ok()?;
    let body: ApiErrorBody = serde_json::from_str(&text).ok()?;
    body.error.and_then(|e| e.message)
}
