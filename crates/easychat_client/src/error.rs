//! Error taxonomy for the send pipeline. Every variant is recoverable: the
//! application stays usable after any single failed send.

/// Outcome classification for a chat send or connection test.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// No API key configured; no network call was made.
    #[error("no API key configured")]
    MissingApiKey,

    /// Message was empty after trimming; no network call was made.
    #[error("message is empty")]
    EmptyMessage,

    /// Another send is already in flight (single-flight guard).
    #[error("a send is already in progress")]
    SendInFlight,

    /// HTTP 429. `retry_after_secs` comes from the `Retry-After` header
    /// (default 60) and is informational only; there is no automatic retry.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        retry_after_secs: u64,
        message: Option<String>,
    },

    /// Any other non-200 status, with the server's error message when the
    /// body was parseable JSON.
    #[error("API request failed (status {code})")]
    Status { code: u16, message: Option<String> },

    /// The HTTP client's read timeout elapsed.
    #[error("request timed out")]
    Timeout,

    /// TCP/TLS connection could not be established.
    #[error("connection failed")]
    Connect,

    /// Anything else, carrying the stringified cause (including a 200
    /// response whose body was not the expected JSON shape).
    #[error("{0}")]
    Other(String),
}

impl ChatError {
    /// Stable machine-readable tag, used by the GUI layer.
    pub fn kind(&self) -> &'static str {
        match self {
            ChatError::MissingApiKey => "missing_api_key",
            ChatError::EmptyMessage => "empty_message",
            ChatError::SendInFlight => "send_in_flight",
            ChatError::RateLimited { .. } => "rate_limited",
            ChatError::Status { .. } => "status",
            ChatError::Timeout => "timeout",
            ChatError::Connect => "connect",
            ChatError::Other(_) => "other",
        }
    }
}
