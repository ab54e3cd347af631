// Loyalty API HTTP client
//
// Wraps `reqwest::Client` with backend-specific URL construction and the
// response policies the two coupon API generations share. All endpoint
// groups (auth, coupons, promotions) are implemented as inherent methods
// via separate files to keep this module focused on transport mechanics.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::AccessToken;

/// Account credentials supplied at configuration time.
///
/// Immutable for the life of a client instance. The refresh token is the
/// only secret; `country` scopes the coupon endpoints and `language` is
/// sent as `Accept-Language` on every data call.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub refresh_token: SecretString,
    pub country: String,
    pub language: String,
}

/// Base URLs for the three backend surfaces.
///
/// Production hosts by default; tests point all of them at a mock server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Token issuance (`/connect/token`).
    pub auth: Url,
    /// Coupon listing (v2) and per-coupon activation.
    pub coupons: Url,
    /// Legacy promotion listing (v1) and per-promotion activation.
    pub coupons_v1: Url,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            auth: Url::parse("https://accounts.lidl.com").expect("valid auth URL"),
            coupons: Url::parse("https://coupons.lidlplus.com/api").expect("valid coupons URL"),
            coupons_v1: Url::parse("https://coupons.lidlplus.com/app/api")
                .expect("valid coupons v1 URL"),
        }
    }
}

impl Endpoints {
    /// Point every surface at a single base URL (for wiremock tests).
    pub fn with_base(base: &Url) -> Self {
        Self {
            auth: base.clone(),
            coupons: base.clone(),
            coupons_v1: base.clone(),
        }
    }
}

/// Stateless client for the loyalty backend.
///
/// Holds no mutable session state besides the fixed credentials: the
/// access token is acquired per activation pass and passed explicitly
/// into every data call.
pub struct ApiClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    credentials: Credentials,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client against the production hosts.
    pub fn new(credentials: Credentials, transport: &TransportConfig) -> Result<Self, Error> {
        Self::with_endpoints(credentials, Endpoints::default(), transport)
    }

    /// Build a client against explicit endpoints (used by tests).
    ///
    /// Injects `Accept-Language` as a default header on every request.
    pub fn with_endpoints(
        credentials: Credentials,
        endpoints: Endpoints,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let language = HeaderValue::from_str(&credentials.language).map_err(|e| {
            Error::Deserialization {
                message: format!("invalid Accept-Language value: {e}"),
                body: credentials.language.clone(),
            }
        })?;
        headers.insert(reqwest::header::ACCEPT_LANGUAGE, language);

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self {
            http,
            endpoints,
            credentials,
        })
    }

    // ── Accessors for endpoint modules ───────────────────────────────

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The country this client is scoped to.
    pub fn country(&self) -> &str {
        &self.credentials.country
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{auth}/{path}`
    pub(crate) fn auth_url(&self, path: &str) -> Url {
        Self::join(&self.endpoints.auth, path)
    }

    /// `{coupons}/{path}` — the v2 surface.
    pub(crate) fn coupons_url(&self, path: &str) -> Url {
        Self::join(&self.endpoints.coupons, path)
    }

    /// `{coupons_v1}/{path}` — the legacy v1 surface.
    pub(crate) fn coupons_v1_url(&self, path: &str) -> Url {
        Self::join(&self.endpoints.coupons_v1, path)
    }

    fn join(base: &Url, path: &str) -> Url {
        let base = base.as_str().trim_end_matches('/');
        let full = format!("{base}/{path}");
        Url::parse(&full).expect("endpoint paths are valid relative URLs")
    }

    // ── Body previews ────────────────────────────────────────────────

    /// At most the first 200 bytes of `body`, cut back to a char boundary
    /// so multibyte text never splits.
    pub(crate) fn preview(body: &str) -> &str {
        let mut end = body.len().min(200);
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        &body[..end]
    }

    // ── Response handling ────────────────────────────────────────────

    /// Send a GET with bearer auth and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        token: &AccessToken,
        country_header: bool,
    ) -> Result<T, Error> {
        debug!("GET {url}");

        let mut req = self.http.get(url).bearer_auth(token.as_str());
        if country_header {
            req = req.header("Country", &self.credentials.country);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                body: Self::preview(&body).to_owned(),
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = Self::preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    /// Send a POST to an activation endpoint and apply the 409-tolerant
    /// status policy.
    ///
    /// HTTP 409 means a concurrent run (or an earlier call) already
    /// activated the offer — that race is the success case, which is what
    /// makes activation idempotent. Only statuses strictly greater than
    /// 400 (other than 409) fail; no response body is required.
    pub(crate) async fn post_activation(
        &self,
        url: Url,
        token: &AccessToken,
        country_header: bool,
    ) -> Result<(), Error> {
        debug!("POST {url}");

        let mut req = self.http.post(url).bearer_auth(token.as_str());
        if country_header {
            req = req.header("Country", &self.credentials.country);
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        if status != 409 && status > 400 {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status,
                body: Self::preview(&body).to_owned(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ApiClient;

    #[test]
    fn preview_respects_char_boundaries() {
        // 100 three-byte chars: byte 200 lands mid-char, so the cut
        // retreats to 198.
        let body = "€".repeat(100);
        let preview = ApiClient::preview(&body);
        assert_eq!(preview.len(), 198);
        assert_eq!(preview.chars().count(), 66);
    }

    #[test]
    fn preview_passes_short_bodies_through() {
        assert_eq!(ApiClient::preview("short"), "short");
        assert_eq!(ApiClient::preview(""), "");
    }
}
