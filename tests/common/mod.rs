// Common test utilities and helper structs
// Shared across all test files to avoid duplication

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, Response, StatusCode},
    Router,
};
use mydouble_backend::{
    app::AppState, app_config::AppConfig, build_router, db::MemoryStore,
    services::CharacterCatalog,
};
use serde::Serialize;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_ADMIN_PASSWORD: &str = "test-admin-password";

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn get(&self, uri: &str) -> TestRequest {
        TestRequest::new(self, "GET", uri)
    }

    pub fn post(&self, uri: &str) -> TestRequest {
        TestRequest::new(self, "POST", uri)
    }

    pub fn put(&self, uri: &str) -> TestRequest {
        TestRequest::new(self, "PUT", uri)
    }
}

/// Test request builder
pub struct TestRequest<'a> {
    app: &'a TestApp,
    method: &'static str,
    uri: String,
    headers: Vec<(String, String)>,
    body: Body,
}

impl<'a> TestRequest<'a> {
    fn new(app: &'a TestApp, method: &'static str, uri: &str) -> Self {
        Self {
            app,
            method,
            uri: uri.to_string(),
            headers: Vec::new(),
            body: Body::empty(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Adds the admin password header
    pub fn as_admin(self) -> Self {
        self.header("x-admin-password", TEST_ADMIN_PASSWORD)
    }

    /// Add JSON body to request
    pub fn json<T: Serialize>(mut self, body: &T) -> Self {
        self.body = Body::from(serde_json::to_vec(body).unwrap());
        self.header("content-type", "application/json")
    }

    /// Send the request
    pub async fn send(self) -> TestResponse {
        let mut builder = Request::builder().method(self.method).uri(&self.uri);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let request = builder.body(self.body).unwrap();

        let response = self.app.app.clone().oneshot(request).await.unwrap();

        TestResponse { response }
    }
}

/// Test response wrapper
pub struct TestResponse {
    response: Response<Body>,
}

impl TestResponse {
    /// Get status code
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.response.headers()
    }

    /// All Set-Cookie header values
    pub fn set_cookies(&self) -> Vec<String> {
        self.response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(str::to_string))
            .collect()
    }

    /// Parse JSON response
    pub async fn json<T: serde::de::DeserializeOwned>(self) -> T {
        let body = axum::body::to_bytes(self.response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    /// Get response body as text
    pub async fn text(self) -> String {
        let body = axum::body::to_bytes(self.response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }
}

/// Configuration used by every integration test
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::for_tests();
    config.security.admin_password = Some(TEST_ADMIN_PASSWORD.to_string());
    config
}

/// Setup test application over an in-memory store
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(test_config(), CharacterCatalog::builtin())
}

pub fn setup_test_app_with(config: AppConfig, catalog: CharacterCatalog) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(config, store.clone(), catalog);

    TestApp {
        app: build_router(state),
        store,
    }
}
