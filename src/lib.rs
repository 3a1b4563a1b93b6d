// Library exports for the MyDouble backend
// This file exposes modules and functions for the server and maintenance binaries

pub mod app;
pub mod app_config;
pub mod db;
pub mod handlers;
pub mod middleware;
pub mod migrations;
pub mod models;
pub mod schema;
pub mod services;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use app::AppState;
pub use app_config::{AppConfig, CONFIG};
pub use db::{DieselPool, MemoryStore, PgStore, Store, StoreError};
pub use services::{AffiliateService, CharacterCatalog};

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Builds the production state: Postgres pool, embedded migrations, builtin
/// character catalog.
pub async fn initialize_app_state(
    config: &AppConfig,
) -> Result<AppState, Box<dyn std::error::Error + Send + Sync>> {
    info!("Initializing database pool...");
    let db_config = db::DieselDatabaseConfig::from_app_config(config);
    let diesel_pool = db::create_diesel_pool(db_config).await?;

    if migrations::should_run_migrations(config) {
        info!("Running embedded migrations...");
        migrations::run_all_migrations(config).await?;
    } else {
        match migrations::check_migration_status(&config.database.url).await {
            Ok(status) if !status.is_up_to_date() => warn!(
                "Embedded migrations disabled with {} pending: {}",
                status.pending_migrations.len(),
                status.pending_migrations.join(", ")
            ),
            Ok(_) => {},
            Err(e) => warn!("Could not check migration status: {}", e),
        }
    }

    Ok(AppState::new(
        config.clone(),
        Arc::new(PgStore::new(diesel_pool)),
        CharacterCatalog::builtin(),
    ))
}

/// Full application router: API routes, optional docs, the page fallback and
/// the attribution, CORS and trace layers.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/api/health", get(health_check))
        .merge(handlers::affiliate_routes(state.clone()))
        .merge(handlers::chat_video_routes())
        .merge(handlers::double_ia_routes())
        .merge(handlers::message_routes());

    if state.config.features.enable_swagger_ui {
        router = router.merge(handlers::docs_routes());
    }

    router
        .fallback(handlers::page_shell)
        .layer(from_fn_with_state(
            state.clone(),
            middleware::affiliate_attribution,
        ))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::dynamic_cors_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Health check handler
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    operation_id = "healthCheck",
    responses(
        (status = 200, description = "All components healthy"),
        (status = 503, description = "Store unreachable")
    )
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let timestamp = chrono::Utc::now().to_rfc3339();

    let (healthy, postgres_health) = match state.store.ping().await {
        Ok(()) => (
            true,
            serde_json::json!({
                "status": "healthy",
                "error": null
            }),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                false,
                serde_json::json!({
                    "status": "unhealthy",
                    "error": "Database connection failed"
                }),
            )
        },
    };

    let response = serde_json::json!({
        "status": if healthy { "healthy" } else { "degraded" },
        "service": "mydouble-backend",
        "timestamp": timestamp,
        "components": {
            "postgresql": postgres_health
        }
    });

    if healthy {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}
