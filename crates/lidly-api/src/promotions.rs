// Promotions v1 endpoints
//
// The legacy API generation. Some offers are only published here and
// never appear in the v2 coupon batch, so a complete activation pass
// covers both. Every v1 call carries an explicit `Country` header on top
// of the shared bearer/language headers.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{AccessToken, Validity};

// ── Models ───────────────────────────────────────────────────────────

/// One fetch batch of v1 promotions; absent `sections` decodes as empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionBatch {
    #[serde(default)]
    pub sections: Vec<PromotionSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionSection {
    #[serde(default)]
    pub promotions: Vec<Promotion>,
}

/// A legacy promotion. Unlike v2 coupons the validity window is already
/// nested; a promotion without one fails decoding loudly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: String,
    pub title: String,
    pub is_activated: bool,
    pub validity: Validity,
}

// ── Endpoints ────────────────────────────────────────────────────────

impl ApiClient {
    /// Fetch the legacy v1 promotion batch.
    ///
    /// `GET {coupons_v1}/v1/promotionslist` with bearer auth and the
    /// `Country` header.
    pub async fn coupon_promotions_v1(
        &self,
        token: &AccessToken,
    ) -> Result<PromotionBatch, Error> {
        let url = self.coupons_v1_url("v1/promotionslist");
        self.get_json(url, token, true).await
    }

    /// Activate a single legacy promotion by id.
    ///
    /// `POST {coupons_v1}/v1/promotions/{id}/activation` with the
    /// `Country` header; same 409-tolerant policy as v2 activation.
    pub async fn activate_coupon_promotion_v1(
        &self,
        token: &AccessToken,
        promotion_id: &str,
    ) -> Result<(), Error> {
        debug!(promotion_id, "activating promotion");
        let url = self.coupons_v1_url(&format!("v1/promotions/{promotion_id}/activation"));
        self.post_activation(url, token, true).await
    }
}
