use axum::{
    body::Body,
    extract::State,
    http::{
        header::{self, HeaderValue},
        Method, Request, Response, StatusCode,
    },
    middleware::Next,
};
use tracing::debug;

use crate::{app::AppState, app_config::AppConfig};

/// Origin to echo back in `Access-Control-Allow-Origin`, if any.
///
/// A `*` entry reflects every origin outside production so credentials keep
/// working; otherwise only whitelisted origins are echoed.
pub fn allowed_origin(config: &AppConfig, origin: Option<&str>) -> Option<String> {
    let origin = origin?;
    let origins = &config.security.cors_allowed_origins;
    let has_wildcard = origins.iter().any(|o| o == "*");

    if has_wildcard && !config.is_production() {
        debug!("CORS: Reflecting origin for staging/dev: {}", origin);
        Some(origin.to_string())
    } else if origins.iter().any(|o| o == origin) {
        debug!("CORS: Origin allowed from whitelist: {}", origin);
        Some(origin.to_string())
    } else {
        debug!("CORS: Origin not in whitelist: {}", origin);
        None
    }
}

/// Dynamic CORS middleware that handles wildcard for staging/development
/// while properly supporting credentials
pub async fn dynamic_cors_middleware(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response<Body> {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok());

    let allowed = allowed_origin(&app_state.config, origin)
        .and_then(|o| HeaderValue::from_str(&o).ok());

    // Handle preflight OPTIONS requests
    if req.method() == Method::OPTIONS {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::OK;

        if let Some(allowed) = allowed {
            let headers = response.headers_mut();
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, allowed);
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET, POST, PUT, OPTIONS"),
            );
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("content-type, accept, origin, x-requested-with, x-admin-password"),
            );
            headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("3600"));
        }

        return response;
    }

    let mut response = next.run(req).await;

    if let Some(allowed) = allowed {
        let headers = response.headers_mut();
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, allowed);
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
    }

    response
}
