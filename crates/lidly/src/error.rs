//! CLI error types with miette diagnostics.
//!
//! Maps `lidly_api::Error` and `lidly_config::ConfigError` into
//! user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(lidly::auth_failed),
        help(
            "The backend rejected the refresh token ({message}).\n\
             Extract a fresh token from the Lidl Plus app and store it with:\n\
             lidly config set-token"
        )
    )]
    AuthFailed { message: String },

    #[error("No refresh token configured for profile '{profile}'")]
    #[diagnostic(
        code(lidly::no_credentials),
        help(
            "Configure credentials with: lidly config init\n\
             Or set the LIDLY_REFRESH_TOKEN environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the loyalty backend")]
    #[diagnostic(
        code(lidly::connection_failed),
        help("Check your network connection and try again.")
    )]
    ConnectionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(lidly::timeout),
        help(
            "Increase the timeout with --timeout (or the profile's `timeout` key)\n\
             or check backend responsiveness."
        )
    )]
    Timeout,

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(lidly::api_error))]
    ApiError { status: u16, message: String },

    #[error("Unexpected response from the backend: {message}")]
    #[diagnostic(
        code(lidly::unexpected_response),
        help("The backend contract may have changed; re-run with -vv for the raw body.")
    )]
    UnexpectedResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(lidly::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(lidly::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: lidly config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(lidly::no_config),
        help(
            "Create one with: lidly config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(lidly::config))]
    Config(Box<figment::Error>),

    #[error("Keyring access failed: {message}")]
    #[diagnostic(
        code(lidly::keyring),
        help(
            "The system keyring is unavailable. Store the token inline in the\n\
             config file or use the LIDLY_REFRESH_TOKEN environment variable."
        )
    )]
    Keyring { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(lidly::json))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_names_no_fixed_duration() {
        // The actual budget comes from --timeout or the profile; the
        // message must not claim one.
        let err = CliError::Timeout;
        assert_eq!(err.to_string(), "Request timed out");
        assert_eq!(err.exit_code(), exit_code::TIMEOUT);
    }

    #[test]
    fn auth_errors_map_to_auth_exit_code() {
        let err = CliError::AuthFailed {
            message: "invalid_grant".into(),
        };
        assert_eq!(err.exit_code(), exit_code::AUTH);
        let err = CliError::NoCredentials {
            profile: "default".into(),
        };
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }
}

// ── lidly_api::Error → CliError ──────────────────────────────────────

impl From<lidly_api::Error> for CliError {
    fn from(err: lidly_api::Error) -> Self {
        match err {
            lidly_api::Error::Authentication { message } => Self::AuthFailed { message },

            lidly_api::Error::Transport(e) => {
                if e.is_timeout() {
                    Self::Timeout
                } else {
                    Self::ConnectionFailed { source: e.into() }
                }
            }

            lidly_api::Error::Http { status, body } => Self::ApiError {
                status,
                message: body,
            },

            lidly_api::Error::Deserialization { message, .. } => {
                Self::UnexpectedResponse { message }
            }
        }
    }
}

// ── lidly_config::ConfigError → CliError ─────────────────────────────

impl From<lidly_config::ConfigError> for CliError {
    fn from(err: lidly_config::ConfigError) -> Self {
        match err {
            lidly_config::ConfigError::NoRefreshToken { profile } => {
                Self::NoCredentials { profile }
            }
            lidly_config::ConfigError::Keyring { message } => Self::Keyring { message },
            lidly_config::ConfigError::Figment(e) => Self::Config(e),
            lidly_config::ConfigError::Io(e) => Self::Io(e),
            lidly_config::ConfigError::Toml(e) => Self::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
        }
    }
}
