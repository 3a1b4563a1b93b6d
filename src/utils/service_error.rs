use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;

/// HTTP-facing error. Every variant renders as `{"error": "<message>"}`.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    /// Public message only; the underlying cause is logged where it happens.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::ValidationError(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ServiceError::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ServiceError::InternalError(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            ServiceError::ValidationError(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::InternalError(msg) => msg,
            ServiceError::Unauthorized => "Non autorisé".to_string(),
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

/// Logs the store failure under `context` and maps it to a 500 carrying
/// `public_message`.
pub fn store_failure(context: &str, public_message: &str) -> impl FnOnce(StoreError) -> ServiceError {
    let context = context.to_string();
    let public_message = public_message.to_string();
    move |error| {
        tracing::error!("{}: {}", context, error);
        ServiceError::InternalError(public_message)
    }
}
