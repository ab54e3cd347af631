#![allow(clippy::unwrap_used)]
// End-to-end tests for the activation workflow against a wiremock backend.

use chrono::{Duration, Utc};
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lidly_api::{ApiClient, Credentials, Endpoints, Error, TransportConfig};
use lidly_core::activate_all;

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_endpoints(
        Credentials {
            refresh_token: "test-refresh-token".to_string().into(),
            country: "ES".into(),
            language: "es-ES".into(),
        },
        Endpoints::with_base(&base_url),
        &TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "bearer-token"
        })))
        .mount(server)
        .await;
}

fn coupon_json(id: &str, activated: bool, start_offset_days: i64, end_offset_days: i64) -> serde_json::Value {
    let now = Utc::now();
    json!({
        "id": id,
        "title": format!("coupon {id}"),
        "isActivated": activated,
        "startValidityDate": (now + Duration::days(start_offset_days)).to_rfc3339(),
        "endValidityDate": (now + Duration::days(end_offset_days)).to_rfc3339(),
    })
}

fn promotion_json(id: &str, activated: bool, start_offset_days: i64, end_offset_days: i64) -> serde_json::Value {
    let now = Utc::now();
    json!({
        "id": id,
        "title": format!("promotion {id}"),
        "isActivated": activated,
        "validity": {
            "start": (now + Duration::days(start_offset_days)).to_rfc3339(),
            "end": (now + Duration::days(end_offset_days)).to_rfc3339(),
        },
    })
}

async fn mount_coupons(server: &MockServer, coupons: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/v2/ES"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "sections": [{ "coupons": coupons }] })),
        )
        .mount(server)
        .await;
}

async fn mount_promotions(server: &MockServer, promotions: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/v1/promotionslist"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "sections": [{ "promotions": promotions }] })),
        )
        .mount(server)
        .await;
}

// ── Scenario 1: one eligible v2 coupon, empty v1 ────────────────────

#[tokio::test]
async fn test_single_eligible_coupon_is_activated_once() {
    let (server, client) = setup().await;
    mount_token(&server).await;
    mount_coupons(&server, vec![coupon_json("c-1", false, -1, 1)]).await;
    mount_promotions(&server, vec![]).await;

    Mock::given(method("POST"))
        .and(path("/v1/ES/c-1/activation"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let report = activate_all(&client).await.unwrap();
    assert_eq!(report.coupons, 1);
    assert_eq!(report.promotions, 0);
    assert_eq!(report.total(), 1);
}

// ── Scenario 2: v2 batch empty (`sections` missing), v1 eligible ────

#[tokio::test]
async fn test_missing_sections_falls_through_to_v1() {
    let (server, client) = setup().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/ES"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    mount_promotions(&server, vec![promotion_json("p-1", false, -1, 1)]).await;

    Mock::given(method("POST"))
        .and(path("/v1/promotions/p-1/activation"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let report = activate_all(&client).await.unwrap();
    assert_eq!(report.coupons, 0);
    assert_eq!(report.promotions, 1);
}

// ── Scenario 3: auth failure aborts before any fetch ────────────────

#[tokio::test]
async fn test_auth_failure_aborts_before_any_fetch() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_grant" })),
        )
        .mount(&server)
        .await;

    // Zero calls may reach the coupon endpoints.
    Mock::given(method("GET"))
        .and(path("/v2/ES"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/promotionslist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let result = activate_all(&client).await;
    match result {
        Err(Error::Authentication { ref message }) => assert_eq!(message, "invalid_grant"),
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

// ── Scenario 4: out-of-window offers are skipped ────────────────────

#[tokio::test]
async fn test_out_of_window_offers_are_skipped() {
    let (server, client) = setup().await;
    mount_token(&server).await;
    mount_coupons(
        &server,
        vec![
            coupon_json("starts-tomorrow", false, 1, 7),
            coupon_json("ended-yesterday", false, -7, -1),
        ],
    )
    .await;
    mount_promotions(&server, vec![promotion_json("p-future", false, 2, 9)]).await;

    // No activation endpoint may be hit at all.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let report = activate_all(&client).await.unwrap();
    assert_eq!(report.total(), 0);
}

// ── Already-activated offers are never re-activated ─────────────────

#[tokio::test]
async fn test_activated_offers_are_never_touched() {
    let (server, client) = setup().await;
    mount_token(&server).await;
    mount_coupons(&server, vec![coupon_json("c-active", true, -1, 1)]).await;
    mount_promotions(&server, vec![promotion_json("p-active", true, -1, 1)]).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let report = activate_all(&client).await.unwrap();
    assert_eq!(report.total(), 0);
}

// ── 409 counts as activated ─────────────────────────────────────────

#[tokio::test]
async fn test_conflict_counts_as_activated() {
    let (server, client) = setup().await;
    mount_token(&server).await;
    mount_coupons(&server, vec![coupon_json("c-racy", false, -1, 1)]).await;
    mount_promotions(&server, vec![promotion_json("p-racy", false, -1, 1)]).await;

    // Another run won both races; the counter must not care.
    Mock::given(method("POST"))
        .and(path("/v1/ES/c-racy/activation"))
        .respond_with(ResponseTemplate::new(409))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/promotions/p-racy/activation"))
        .respond_with(ResponseTemplate::new(409))
        .expect(1)
        .mount(&server)
        .await;

    let report = activate_all(&client).await.unwrap();
    assert_eq!(report.coupons, 1);
    assert_eq!(report.promotions, 1);
}

// ── A failing activation aborts the whole run ───────────────────────

#[tokio::test]
async fn test_activation_error_aborts_run() {
    let (server, client) = setup().await;
    mount_token(&server).await;
    mount_coupons(
        &server,
        vec![
            coupon_json("c-1", false, -1, 1),
            coupon_json("c-2", false, -1, 1),
        ],
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/v1/ES/c-1/activation"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    // The second coupon and the whole v1 pass are never reached.
    Mock::given(method("POST"))
        .and(path("/v1/ES/c-2/activation"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/promotionslist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let result = activate_all(&client).await;
    assert!(
        matches!(result, Err(Error::Http { status: 500, .. })),
        "expected Http 500, got: {result:?}"
    );
}

// ── Multiple sections accumulate into one count ─────────────────────

#[tokio::test]
async fn test_counts_accumulate_across_sections() {
    let (server, client) = setup().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/ES"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sections": [
                { "coupons": [coupon_json("c-1", false, -1, 1)] },
                { "coupons": [coupon_json("c-2", false, -1, 1), coupon_json("c-3", true, -1, 1)] }
            ]
        })))
        .mount(&server)
        .await;
    mount_promotions(&server, vec![promotion_json("p-1", false, -1, 1)]).await;

    for id in ["c-1", "c-2"] {
        Mock::given(method("POST"))
            .and(path(format!("/v1/ES/{id}/activation")))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/v1/promotions/p-1/activation"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let report = activate_all(&client).await.unwrap();
    assert_eq!(report.coupons, 2);
    assert_eq!(report.promotions, 1);
    assert_eq!(report.total(), 3);
}
