// HTTP handlers and route builders

pub mod affiliates;
pub mod chat_video;
pub mod docs;
pub mod double_ia;
pub mod messages;

use crate::{app::AppState, middleware::require_admin, ui, utils::ServiceError};
use axum::{
    extract::rejection::JsonRejection,
    http::{StatusCode, Uri},
    middleware::from_fn_with_state,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

/// 400 for bodies that are not the expected JSON.
pub(crate) fn invalid_body(rejection: JsonRejection) -> Response {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    ServiceError::validation("Corps de requête JSON invalide").into_response()
}

// Affiliate routes: the public check plus the password-guarded admin routes
pub fn affiliate_routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/api/affiliates", get(affiliates::list_affiliates))
        .route("/api/affiliates/create", post(affiliates::create_affiliate))
        .route("/api/affiliates/sales", get(affiliates::list_sales))
        .route("/api/affiliates/mark-paid", post(affiliates::mark_paid))
        .route_layer(from_fn_with_state(state, require_admin));

    Router::new()
        .route("/api/affiliates/check", get(affiliates::check_affiliate))
        .merge(admin)
}

// Chat-video media routes
pub fn chat_video_routes() -> Router<AppState> {
    Router::new()
        .route("/api/chat-video/image", get(chat_video::character_image))
        .route("/api/chat-video/video", get(chat_video::character_video))
}

// AI-double routes
pub fn double_ia_routes() -> Router<AppState> {
    Router::new()
        .route("/api/double-ia/list", get(double_ia::list_doubles))
        .route("/api/double-ia/get", get(double_ia::get_double))
}

// Message routes
pub fn message_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/messages",
            get(messages::list_messages)
                .post(messages::save_message)
                .put(messages::update_message_video),
        )
        .route("/api/messages/bulk", post(messages::sync_conversations))
}

// Documentation routes, mounted only when enabled
pub fn docs_routes() -> Router<AppState> {
    Router::new()
        .route("/swagger-ui", get(docs::serve_swagger_ui))
        .route("/api-docs/openapi.json", get(docs::serve_openapi_spec))
}

/// Fallback: unknown API and asset paths get a JSON 404, every other path is
/// a page and gets the HTML shell with its route-specific chrome.
pub async fn page_shell(uri: Uri) -> Response {
    let path = uri.path();

    if path == "/api" || crate::middleware::is_excluded_path(path) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Route introuvable" })),
        )
            .into_response();
    }

    (StatusCode::OK, Html(ui::render_shell(path))).into_response()
}
