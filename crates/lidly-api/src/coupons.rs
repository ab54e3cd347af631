// Coupons v2 endpoints
//
// The current API generation: country-scoped listing plus per-coupon
// activation. Activation still lives under a v1-style path on the same
// host (`/v1/{country}/{id}/activation`) — the backend never moved it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{AccessToken, Validity};

// ── Models ───────────────────────────────────────────────────────────

/// One fetch batch of v2 coupons. Absent `sections` decodes as an empty
/// list — a defined no-coupons case, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponBatch {
    #[serde(default)]
    pub sections: Vec<CouponSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponSection {
    #[serde(default)]
    pub coupons: Vec<Coupon>,
}

/// A v2 discount coupon. Timestamps decode strictly — a malformed
/// validity date is an upstream contract violation and fails the fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: String,
    pub title: String,
    pub is_activated: bool,
    pub start_validity_date: DateTime<Utc>,
    pub end_validity_date: DateTime<Utc>,
}

impl Coupon {
    /// The activation window, in the generation-agnostic shape the
    /// eligibility logic works with.
    pub fn validity(&self) -> Validity {
        Validity {
            start: self.start_validity_date,
            end: self.end_validity_date,
        }
    }
}

// ── Endpoints ────────────────────────────────────────────────────────

impl ApiClient {
    /// Fetch the full v2 coupon batch for this client's country.
    ///
    /// `GET {coupons}/v2/{country}` with bearer auth.
    pub async fn coupons(&self, token: &AccessToken) -> Result<CouponBatch, Error> {
        let url = self.coupons_url(&format!("v2/{}", self.country()));
        self.get_json(url, token, false).await
    }

    /// Activate a single coupon by id.
    ///
    /// `POST {coupons}/v1/{country}/{id}/activation`. HTTP 409
    /// (already activated by a racing run) is success.
    pub async fn activate_coupon(&self, token: &AccessToken, coupon_id: &str) -> Result<(), Error> {
        debug!(coupon_id, "activating coupon");
        let url = self.coupons_url(&format!("v1/{}/{coupon_id}/activation", self.country()));
        self.post_activation(url, token, false).await
    }
}
