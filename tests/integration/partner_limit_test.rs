//! Setting and cancelling partner promo-code limits over HTTP.

use axum::http::StatusCode;

use promocode_database::PartnerStore;

use crate::helpers::{TestApp, active_limit_count, limit_body};

#[tokio::test]
async fn test_set_limit_unknown_partner_returns_not_found() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/partners/def47943-7aaf-44a1-ae21-05aa4948b165/limits",
            limit_body(1),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_set_limit_inactive_partner_returns_bad_request() {
    let app = TestApp::new();
    let partner = app.seed_partner(false, 5);

    let (status, body) = app
        .post(&format!("/api/partners/{}/limits", partner.id), limit_body(1))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_STATE");
    assert_eq!(body["message"], "partner is not active");
}

#[tokio::test]
async fn test_set_zero_limit_returns_bad_request() {
    let app = TestApp::new();
    let partner = app.seed_partner(true, 5);

    let (status, body) = app
        .post(&format!("/api/partners/{}/limits", partner.id), limit_body(0))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_ARGUMENT");
    assert_eq!(body["message"], "limit must be greater than 0");

    let stored = app.store.find_by_id(partner.id).await.unwrap().unwrap();
    assert_eq!(stored, partner);
}

#[tokio::test]
async fn test_set_valid_limit_resets_counter_and_keeps_one_active_limit() {
    let app = TestApp::new();
    let partner = app.seed_partner(true, 5);

    let (status, body) = app
        .post(&format!("/api/partners/{}/limits", partner.id), limit_body(1))
        .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["number_issued_promo_codes"], 0);
    assert_eq!(data["partner_limits"].as_array().unwrap().len(), 2);
    assert_eq!(active_limit_count(data), 1);
    assert_ne!(data["partner_limits"][0]["cancel_date"], "");
    assert_eq!(data["partner_limits"][1]["limit"], 1);

    let stored = app.store.find_by_id(partner.id).await.unwrap().unwrap();
    assert_eq!(stored.number_issued_promo_codes, 0);
    assert_eq!(stored.active_limits().count(), 1);
}

#[tokio::test]
async fn test_repeated_set_limit_preserves_history() {
    let app = TestApp::new();
    let partner = app.seed_partner(true, 0);
    let uri = format!("/api/partners/{}/limits", partner.id);

    for limit in 1..=3 {
        let (status, _) = app.post(&uri, limit_body(limit)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app.get(&format!("/api/partners/{}", partner.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["partner_limits"].as_array().unwrap().len(), 4);
    assert_eq!(active_limit_count(&body["data"]), 1);
}

#[tokio::test]
async fn test_malformed_body_is_rejected_before_service() {
    let app = TestApp::new();
    let partner = app.seed_partner(true, 5);

    let (status, _) = app
        .post(
            &format!("/api/partners/{}/limits", partner.id),
            serde_json::json!({ "limit": "many" }),
        )
        .await;

    assert!(status.is_client_error());
    let stored = app.store.find_by_id(partner.id).await.unwrap().unwrap();
    assert_eq!(stored, partner);
}

#[tokio::test]
async fn test_cancel_limit() {
    let app = TestApp::new();
    let partner = app.seed_partner(true, 3);

    let (status, body) = app
        .post(
            &format!("/api/partners/{}/limits/cancel", partner.id),
            serde_json::json!({}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(active_limit_count(&body["data"]), 0);
    assert_eq!(body["data"]["number_issued_promo_codes"], 3);
}
