//! The coupon activation pass.
//!
//! One pass: authenticate once, sweep the v2 coupon batch, then the v1
//! promotion batch (some offers are only published through v1), activating
//! every eligible offer sequentially. Any failure aborts the whole run —
//! there is no per-item recovery and no partial-progress checkpoint; the
//! next triggered run starts fresh.

use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use lidly_api::{ApiClient, Error};

use crate::eligibility::is_eligible;

/// Aggregate count of offers activated by one pass.
///
/// The counters increment after every non-erroring activation call, HTTP
/// 409 included — the backend's "already active" answer is not
/// distinguished from a fresh activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActivationReport {
    pub coupons: u32,
    pub promotions: u32,
}

impl ActivationReport {
    /// Total offers activated across both API generations.
    pub fn total(&self) -> u32 {
        self.coupons + self.promotions
    }
}

/// Run one full activation pass and report the count.
///
/// The access token is acquired once and reused for every call — a pass
/// completes well inside the token's validity window, so there is no
/// mid-pass re-authentication. Passes are strictly sequential: v2 before
/// v1, one activation await at a time. Concurrently triggered passes are
/// not coordinated; overlapping activations are safe only because the
/// client treats HTTP 409 as success.
pub async fn activate_all(client: &ApiClient) -> Result<ActivationReport, Error> {
    info!("activating all available coupons");
    let token = client.get_access_token().await?;
    let now = Utc::now();

    let mut report = ActivationReport::default();

    let batch = client.coupons(&token).await?;
    for section in &batch.sections {
        for coupon in &section.coupons {
            if !is_eligible(coupon, now) {
                continue;
            }
            debug!(id = %coupon.id, title = %coupon.title, "activating coupon");
            client.activate_coupon(&token, &coupon.id).await?;
            report.coupons += 1;
        }
    }

    let batch = client.coupon_promotions_v1(&token).await?;
    for section in &batch.sections {
        for promotion in &section.promotions {
            if !is_eligible(promotion, now) {
                continue;
            }
            debug!(id = %promotion.id, title = %promotion.title, "activating promotion");
            client
                .activate_coupon_promotion_v1(&token, &promotion.id)
                .await?;
            report.promotions += 1;
        }
    }

    info!(
        coupons = report.coupons,
        promotions = report.promotions,
        total = report.total(),
        "activation pass complete"
    );
    Ok(report)
}

/// Scheduler entry point: run an activation pass immediately, then once
/// per `interval`, forever.
///
/// A failed pass is logged and dropped — the next tick starts fresh with
/// a new authentication, which is the whole retry policy (the core never
/// retries within a run).
pub async fn run_scheduled(client: &ApiClient, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match activate_all(client).await {
            Ok(report) => {
                info!(total = report.total(), "scheduled pass finished");
            }
            Err(error) => {
                warn!(%error, transient = error.is_transient(), "scheduled pass failed");
            }
        }
    }
}
