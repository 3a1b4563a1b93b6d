// Public affiliate code check

mod common;

use axum::http::StatusCode;
use common::setup_test_app;
use serde_json::{json, Value};

#[tokio::test]
async fn test_check_active_code_case_insensitive() {
    let app = setup_test_app();
    app.store.add_affiliate("PROMO1", "Jane", true, 0, 0).await;

    let response = app.get("/api/affiliates/check?code=promo1").send().await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await;
    assert_eq!(body, json!({ "valid": true, "name": "Jane", "code": "PROMO1" }));
}

#[tokio::test]
async fn test_check_unknown_code() {
    let app = setup_test_app();
    app.store.add_affiliate("PROMO1", "Jane", true, 0, 0).await;

    let response = app.get("/api/affiliates/check?code=ZZZZ").send().await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await;
    assert_eq!(body, json!({ "valid": false }));
}

#[tokio::test]
async fn test_check_inactive_code() {
    let app = setup_test_app();
    app.store.add_affiliate("PAUSED", "Paul", false, 0, 0).await;

    let body: Value = app
        .get("/api/affiliates/check?code=PAUSED")
        .send()
        .await
        .json()
        .await;
    assert_eq!(body, json!({ "valid": false }));
}

#[tokio::test]
async fn test_check_missing_or_empty_code() {
    let app = setup_test_app();

    for uri in ["/api/affiliates/check", "/api/affiliates/check?code="] {
        let response = app.get(uri).send().await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await;
        assert_eq!(body, json!({ "valid": false }), "{}", uri);
    }
}

#[tokio::test]
async fn test_check_is_idempotent() {
    let app = setup_test_app();
    app.store.add_affiliate("PROMO1", "Jane", true, 0, 0).await;

    let first: Value = app.get("/api/affiliates/check?code=Promo1").send().await.json().await;
    let second: Value = app.get("/api/affiliates/check?code=Promo1").send().await.json().await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_check_store_outage_reports_invalid() {
    let app = setup_test_app();
    app.store.add_affiliate("PROMO1", "Jane", true, 0, 0).await;
    app.store.set_failing(true);

    let response = app.get("/api/affiliates/check?code=PROMO1").send().await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await;
    assert_eq!(body, json!({ "valid": false }));
}

#[tokio::test]
async fn test_check_repeated_code_uses_first_value() {
    let app = setup_test_app();
    app.store.add_affiliate("PROMO1", "Jane", true, 0, 0).await;

    let response = app
        .get("/api/affiliates/check?code=promo1&code=x")
        .send()
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await;
    assert_eq!(body, json!({ "valid": true, "name": "Jane", "code": "PROMO1" }));

    let body: Value = app
        .get("/api/affiliates/check?code=x&code=promo1")
        .send()
        .await
        .json()
        .await;
    assert_eq!(body, json!({ "valid": false }));
}
