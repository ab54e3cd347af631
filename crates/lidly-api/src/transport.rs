// Shared transport configuration for building reqwest::Client instances.
//
// The backend expects a fixed browser-style user agent and enforces no
// server-side keepalive guarantees, so every client gets the same UA and
// a short per-request timeout. A hung backend call blocks the run until
// this timeout fires; there is no retry.

use std::time::Duration;

/// User agent the mobile app presents; the coupon endpoints reject
/// obviously non-browser agents.
pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 15) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/133.0.6943.89 Mobile Safari/537.36";

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` with additional default headers.
    ///
    /// Used by [`ApiClient`](crate::ApiClient) to inject the
    /// `Accept-Language` header on every request.
    pub fn build_client_with_headers(
        &self,
        headers: reqwest::header::HeaderMap,
    ) -> Result<reqwest::Client, crate::error::Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(crate::error::Error::Transport)
    }
}
