// ── Core error types ──
//
// User-facing errors from parkly-core. The `From<parkly_api::Error>` impl
// translates transport-layer errors into domain variants while keeping the
// backend's own reason as the message.

use thiserror::Error;

/// Unified error type for the core crate.
///
/// `Display` is the human-readable message the controller publishes on
/// its error channel.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach parkly backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to the backend timed out")]
    Timeout,

    // ── Backend rejections ───────────────────────────────────────────
    #[error("{message}")]
    AuthenticationFailed { message: String },

    #[error("{message}")]
    Forbidden { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Api { status: Option<u16>, message: String },

    // ── Client-side errors ───────────────────────────────────────────
    #[error("Unexpected response from backend: {message}")]
    InvalidResponse { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// HTTP status behind this error, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationFailed { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<parkly_api::Error> for CoreError {
    fn from(err: parkly_api::Error) -> Self {
        match err {
            parkly_api::Error::Transport(ref e) if e.is_timeout() => CoreError::Timeout,
            parkly_api::Error::Transport(ref e) if e.is_connect() => CoreError::ConnectionFailed {
                url: e.url().map_or_else(
                    || "<unknown>".into(),
                    |u| u.origin().ascii_serialization(),
                ),
                reason: e.to_string(),
            },
            parkly_api::Error::Transport(e) => CoreError::Api {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            },
            parkly_api::Error::Api { status, message } => match status {
                401 => CoreError::AuthenticationFailed { message },
                403 => CoreError::Forbidden { message },
                404 => CoreError::NotFound { message },
                _ => CoreError::Api {
                    status: Some(status),
                    message,
                },
            },
            parkly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            parkly_api::Error::Tls(reason) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {reason}"),
            },
            parkly_api::Error::Serialization(e) => CoreError::InvalidResponse {
                message: e.to_string(),
            },
            parkly_api::Error::Deserialization { message, .. } => {
                CoreError::InvalidResponse { message }
            }
        }
    }
}
