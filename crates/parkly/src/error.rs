//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use parkly_config::ConfigError;
use parkly_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the parkly backend at {url}")]
    #[diagnostic(
        code(parkly::connection_failed),
        help(
            "Check that the backend is running and accessible.\n\
             URL: {url}\n\
             Try: parkly --server http://localhost:5000 me"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(parkly::timeout),
        help("Increase the timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(
        code(parkly::auth_failed),
        help(
            "Log in first with: parkly login\n\
             Or store a password with: parkly config set-password"
        )
    )]
    AuthFailed { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(parkly::forbidden),
        help("This page or action belongs to another role. Check: parkly me")
    )]
    Forbidden { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(parkly::no_credentials),
        help(
            "Pass --email and --password, set PARKLY_EMAIL and PARKLY_PASSWORD,\n\
             or configure the profile with: parkly config init"
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(parkly::not_found),
        help("Run: parkly {list_command} to see what is available")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(parkly::api_error))]
    ApiError { status: Option<u16>, message: String },

    #[error("Unexpected response from backend: {message}")]
    #[diagnostic(
        code(parkly::invalid_response),
        help("Run with -vv to see the raw request log.")
    )]
    InvalidResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(parkly::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(parkly::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: parkly config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No backend configured")]
    #[diagnostic(
        code(parkly::no_config),
        help(
            "Create a profile with: parkly config init\n\
             Or pass --server. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(parkly::config))]
    Config(Box<figment::Error>),

    #[error("Keyring error: {0}")]
    #[diagnostic(
        code(parkly::keyring),
        help("Use password_env or PARKLY_PASSWORD when no system keyring is available.")
    )]
    Keyring(String),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(parkly::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    #[diagnostic(code(parkly::serialization))]
    Serialization(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Forbidden { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::ApiError {
                status: Some(404), ..
            } => exit_code::NOT_FOUND,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Forbidden { message } => CliError::Forbidden { message },

            CoreError::NotFound { message } => CliError::ApiError {
                status: Some(404),
                message,
            },

            CoreError::Api { status, message } => CliError::ApiError { status, message },

            CoreError::InvalidResponse { message } => CliError::InvalidResponse { message },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Serialization(e) => CliError::Serialization(e.to_string()),
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Keyring(e) => CliError::Keyring(e.to_string()),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_rejections_keep_their_message() {
        let err = CliError::from(CoreError::Api {
            status: Some(400),
            message: "No spots available".into(),
        });
        assert_eq!(err.to_string(), "No spots available");
        assert_eq!(err.exit_code(), exit_code::GENERAL);

        let err = CliError::from(CoreError::AuthenticationFailed {
            message: "Invalid credentials".into(),
        });
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn exit_codes_follow_error_kind() {
        let forbidden = CliError::from(CoreError::Forbidden {
            message: "Forbidden".into(),
        });
        assert_eq!(forbidden.exit_code(), exit_code::PERMISSION);

        let missing = CliError::from(CoreError::NotFound {
            message: "Lot not found".into(),
        });
        assert_eq!(missing.exit_code(), exit_code::NOT_FOUND);

        assert_eq!(CliError::from(CoreError::Timeout).exit_code(), exit_code::TIMEOUT);

        let refused = CliError::from(CoreError::ConnectionFailed {
            url: "http://127.0.0.1:9".into(),
            reason: "connection refused".into(),
        });
        assert_eq!(refused.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn config_validation_is_a_usage_error() {
        let err = CliError::from(ConfigError::Validation {
            field: "server".into(),
            reason: "invalid URL: nope".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
