// API documentation: OpenAPI document and Swagger UI page

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

use crate::models::{
    affiliate::{
        Affiliate, AffiliateCheckResponse, AffiliateWithStats, CreateAffiliateRequest,
        MarkPaidRequest, MarkPaidResponse, ReferralSaleView,
    },
    ai_double::{AiDouble, DoubleListResponse, DoubleResponse},
    message::{
        BulkSyncRequest, BulkSyncResponse, ConversationSync, Message, MessageListResponse,
        MessageResponse, SaveMessageRequest, SyncedMessage, UpdateMessageVideoRequest,
    },
};

use super::{affiliates, chat_video, double_ia, messages};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MyDouble API",
        version = "1.0.0",
        description = "Affiliate attribution, AI doubles, chat-video media and message history"
    ),
    paths(
        affiliates::check_affiliate,
        affiliates::list_affiliates,
        affiliates::create_affiliate,
        affiliates::list_sales,
        affiliates::mark_paid,
        chat_video::character_image,
        chat_video::character_video,
        double_ia::list_doubles,
        double_ia::get_double,
        messages::save_message,
        messages::list_messages,
        messages::update_message_video,
        messages::sync_conversations,
        crate::health_check,
    ),
    components(schemas(
        Affiliate,
        AffiliateCheckResponse,
        AffiliateWithStats,
        CreateAffiliateRequest,
        MarkPaidRequest,
        MarkPaidResponse,
        ReferralSaleView,
        AiDouble,
        DoubleListResponse,
        DoubleResponse,
        Message,
        MessageListResponse,
        MessageResponse,
        SaveMessageRequest,
        UpdateMessageVideoRequest,
        BulkSyncRequest,
        ConversationSync,
        SyncedMessage,
        BulkSyncResponse,
    )),
    modifiers(&AdminPasswordSecurity),
    tags(
        (name = "Affiliates", description = "Referral codes and affiliate payouts"),
        (name = "AI doubles", description = "User-owned AI personas"),
        (name = "Chat video", description = "Static character media"),
        (name = "Messages", description = "Conversation history"),
        (name = "Health", description = "Service health checks")
    )
)]
pub struct ApiDoc;

struct AdminPasswordSecurity;

impl Modify for AdminPasswordSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "adminPassword",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(
                    crate::middleware::ADMIN_PASSWORD_HEADER,
                ))),
            );
        }
    }
}

/// Serve OpenAPI JSON specification at /api-docs/openapi.json
pub async fn serve_openapi_spec() -> Response {
    match ApiDoc::openapi().to_json() {
        Ok(spec) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            spec,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to serialize OpenAPI document: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        },
    }
}

/// Serve Swagger UI HTML at /swagger-ui
pub async fn serve_swagger_ui() -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>MyDouble API Documentation</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui.css" />
    <style>
        body {
            margin: 0;
            padding: 0;
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
        }
        #swagger-ui {
            max-width: 1460px;
            margin: 0 auto;
            padding: 20px;
        }
        .topbar {
            display: none;
        }
        .header {
            background: linear-gradient(90deg, #e31fc1 0%, #ff6b9d 50%, #ffc0cb 100%);
            color: white;
            padding: 2rem;
            text-align: center;
        }
        .header h1 {
            margin: 0;
            font-size: 2.2rem;
            font-weight: 600;
        }
    </style>
</head>
<body>
    <div class="header">
        <h1>MyDouble API</h1>
    </div>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {
            window.ui = SwaggerUIBundle({
                url: '/api-docs/openapi.json',
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [SwaggerUIBundle.presets.apis],
                docExpansion: "list",
                filter: true,
                tryItOutEnabled: true,
                supportedSubmitMethods: ['get', 'post', 'put'],
                validatorUrl: null
            });
        }
    </script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/affiliates/check",
            "/api/affiliates",
            "/api/affiliates/create",
            "/api/affiliates/sales",
            "/api/affiliates/mark-paid",
            "/api/chat-video/image",
            "/api/chat-video/video",
            "/api/double-ia/list",
            "/api/double-ia/get",
            "/api/messages",
            "/api/messages/bulk",
            "/api/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_admin_security_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("adminPassword"));
    }
}
