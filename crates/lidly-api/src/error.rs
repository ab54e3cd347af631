use thiserror::Error;

/// Top-level error type for the `lidly-api` crate.
///
/// Covers every failure mode across both API generations: token exchange,
/// transport, HTTP-level rejections, and response decoding. The CLI maps
/// these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The token endpoint rejected the refresh token. Carries the backend
    /// error string (e.g. `invalid_grant`).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // ── API ─────────────────────────────────────────────────────────
    /// The backend answered with a failing status code.
    ///
    /// Activation endpoints never produce this for HTTP 409 — an
    /// already-activated conflict is treated as success.
    #[error("API error (HTTP {status}): {body}")]
    Http { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    /// Also raised for malformed validity timestamps — those indicate an
    /// upstream contract violation and are never silently skipped.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error means the stored refresh token is no
    /// longer accepted and the user must log in again.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying on a
    /// future scheduled run.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
