// Admin guard for affiliate administration routes
// Compares the x-admin-password header against the configured secret

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::{app::AppState, utils::ServiceError};

pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// True only when a password is configured and the provided one matches it.
pub fn admin_password_matches(expected: Option<&str>, provided: Option<&str>) -> bool {
    match (expected, provided) {
        (Some(expected), Some(provided)) if !expected.is_empty() => {
            bool::from(expected.as_bytes().ct_eq(provided.as_bytes()))
        },
        _ => false,
    }
}

fn provided_password(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|value| value.to_str().ok())
}

/// Middleware rejecting requests without the admin password with 401.
pub async fn require_admin(
    State(app_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let expected = app_state.config.security.admin_password.as_deref();

    if !admin_password_matches(expected, provided_password(request.headers())) {
        tracing::warn!(
            "Rejected admin request to {} {}",
            request.method(),
            request.uri().path()
        );
        return ServiceError::Unauthorized.into_response();
    }

    next.run(request).await
}
