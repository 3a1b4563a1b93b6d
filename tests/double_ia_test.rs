// AI-double listing and lookup

mod common;

use axum::http::StatusCode;
use common::setup_test_app;
use serde_json::{json, Value};

#[tokio::test]
async fn test_list_requires_user_id() {
    let app = setup_test_app();

    let response = app.get("/api/double-ia/list").send().await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await;
    assert_eq!(body, json!({ "error": "UserId requis" }));
}

#[tokio::test]
async fn test_list_rejects_non_numeric_user_id() {
    let app = setup_test_app();

    let response = app.get("/api/double-ia/list?userId=abc").send().await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await;
    assert_eq!(body, json!({ "error": "UserId invalide" }));
}

#[tokio::test]
async fn test_list_empty_for_user_without_doubles() {
    let app = setup_test_app();

    let response = app.get("/api/double-ia/list?userId=42").send().await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await;
    assert_eq!(body, json!({ "success": true, "doubles": [] }));
}

#[tokio::test]
async fn test_list_returns_only_the_users_doubles() {
    let app = setup_test_app();
    app.store.add_double(7, json!({ "tone": "warm" }), 10).await;
    app.store.add_double(7, json!({ "tone": "dry" }), 5).await;
    app.store.add_double(8, json!({ "tone": "other" }), 1).await;

    let body: Value = app.get("/api/double-ia/list?userId=7").send().await.json().await;
    let doubles = body["doubles"].as_array().unwrap();
    assert_eq!(doubles.len(), 2);
    assert!(doubles.iter().all(|d| d["userId"] == 7));
    assert_eq!(doubles[0]["personality"]["tone"], "warm");
}

#[tokio::test]
async fn test_list_store_failure() {
    let app = setup_test_app();
    app.store.set_failing(true);

    let response = app.get("/api/double-ia/list?userId=7").send().await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json().await;
    assert_eq!(body, json!({ "error": "Erreur lors du chargement des doubles IA" }));
}

#[tokio::test]
async fn test_get_by_id_takes_precedence() {
    let app = setup_test_app();
    let first = app.store.add_double(7, json!({}), 10).await;
    let other = app.store.add_double(9, json!({}), 1).await;

    let body: Value = app
        .get(&format!("/api/double-ia/get?id={}&userId=7", other.id))
        .send()
        .await
        .json()
        .await;
    assert_eq!(body["success"], true);
    assert_eq!(body["double"]["id"], other.id);
    assert_ne!(body["double"]["id"], first.id);
}

#[tokio::test]
async fn test_get_by_user_returns_oldest() {
    let app = setup_test_app();
    let oldest = app.store.add_double(7, json!({}), 60).await;
    app.store.add_double(7, json!({}), 5).await;

    let body: Value = app.get("/api/double-ia/get?userId=7").send().await.json().await;
    assert_eq!(body["double"]["id"], oldest.id);
}

#[tokio::test]
async fn test_get_validation_and_not_found() {
    let app = setup_test_app();

    let response = app.get("/api/double-ia/get").send().await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await;
    assert_eq!(body, json!({ "error": "UserId ou id requis" }));

    let response = app.get("/api/double-ia/get?id=999").send().await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await;
    assert_eq!(body, json!({ "error": "Double IA non trouvé" }));

    let response = app.get("/api/double-ia/get?userId=999").send().await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_repeated_user_id_uses_first_value() {
    let app = setup_test_app();
    app.store.add_double(1, json!({ "tone": "warm" }), 1).await;
    app.store.add_double(2, json!({ "tone": "dry" }), 1).await;

    let response = app.get("/api/double-ia/list?userId=1&userId=2").send().await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await;
    let doubles = body["doubles"].as_array().unwrap();
    assert_eq!(doubles.len(), 1);
    assert_eq!(doubles[0]["userId"], 1);
}
