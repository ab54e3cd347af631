// Token exchange
//
// The backend issues short-lived access tokens via the OAuth2
// refresh-token grant. The client id is a fixed app identifier with a
// literal "secret" as its basic-auth password — the refresh token itself
// is the credential that matters.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::AccessToken;

const CLIENT_ID: &str = "LidlPlusNativeClient";
const CLIENT_SECRET: &str = "secret";

/// Token endpoint response. On failure the backend returns HTTP 400 with
/// an `error` field instead of a token, so both fields are optional and
/// `error` is checked first.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

impl ApiClient {
    /// Exchange the stored refresh token for a short-lived access token.
    ///
    /// `POST {auth}/connect/token` with a form-encoded refresh-token grant
    /// and `Authorization: Basic base64(client_id:secret)`. One network
    /// round trip, no retry. A JSON response carrying an `error` field
    /// fails with [`Error::Authentication`] before any coupon endpoint is
    /// contacted.
    pub async fn get_access_token(&self) -> Result<AccessToken, Error> {
        let url = self.auth_url("connect/token");
        debug!("POST {url}");

        let basic = BASE64.encode(format!("{CLIENT_ID}:{CLIENT_SECRET}"));
        let resp = self
            .http()
            .post(url)
            .header(reqwest::header::AUTHORIZATION, format!("Basic {basic}"))
            .form(&[
                (
                    "refresh_token",
                    self.credentials().refresh_token.expose_secret(),
                ),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        // The error field is authoritative; the backend reports grant
        // failures in the body regardless of status code.
        let body = resp.text().await?;
        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            let preview = ApiClient::preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        if let Some(error) = token.error {
            return Err(Error::Authentication { message: error });
        }

        token
            .access_token
            .map(AccessToken::new)
            .ok_or(Error::Deserialization {
                message: "token response carries neither access_token nor error".into(),
                body,
            })
    }
}
