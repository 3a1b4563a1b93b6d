// affiliate_ref cookie attribution across page requests

mod common;

use axum::http::StatusCode;
use common::setup_test_app;

#[tokio::test]
async fn test_ref_query_sets_cookie_on_pages() {
    let app = setup_test_app();

    let response = app.get("/home?ref=AFF9").send().await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookies = response.set_cookies();
    assert_eq!(cookies.len(), 1);
    let cookie = &cookies[0];
    assert!(cookie.starts_with("affiliate_ref=AFF9"), "{}", cookie);
    assert!(cookie.contains("Max-Age=2592000"), "{}", cookie);
    assert!(cookie.contains("Path=/"), "{}", cookie);
    assert!(cookie.contains("SameSite=Lax"), "{}", cookie);
    assert!(!cookie.contains("HttpOnly"), "{}", cookie);
}

#[tokio::test]
async fn test_no_cookie_without_ref() {
    let app = setup_test_app();

    for uri in ["/home", "/home?ref=", "/home?other=1"] {
        let response = app.get(uri).send().await;
        assert!(response.set_cookies().is_empty(), "{}", uri);
    }
}

#[tokio::test]
async fn test_excluded_paths_never_get_cookie() {
    let app = setup_test_app();

    for uri in [
        "/api/anything?ref=AFF9",
        "/api/affiliates/check?code=X&ref=AFF9",
        "/_next/static/app.js?ref=AFF9",
        "/favicon.ico?ref=AFF9",
    ] {
        let response = app.get(uri).send().await;
        assert!(response.set_cookies().is_empty(), "{}", uri);
    }
}

#[tokio::test]
async fn test_latest_ref_overwrites() {
    let app = setup_test_app();

    let first = app.get("/?ref=FIRST").send().await;
    assert!(first.set_cookies()[0].starts_with("affiliate_ref=FIRST"));

    let second = app.get("/pricing?ref=SECOND").send().await;
    assert!(second.set_cookies()[0].starts_with("affiliate_ref=SECOND"));
}
