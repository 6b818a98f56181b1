use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::outreach::directory::LookupError;
use crate::outreach::query::ValidationError;

/// Message shown when the directory has no contact for the requested company.
pub const NOT_FOUND_MESSAGE: &str = "No HR contact found for this company";

/// Message shown for any directory failure. The underlying cause is logged, never returned.
pub const LOOKUP_FAILED_MESSAGE: &str = "Failed to retrieve company information";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("No contact found for '{0}'")]
    ContactNotFound(String),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string()),
            AppError::ContactNotFound(query) => {
                tracing::info!("No contact found for '{query}'");
                (
                    StatusCode::NOT_FOUND,
                    "CONTACT_NOT_FOUND",
                    NOT_FOUND_MESSAGE.to_string(),
                )
            }
            AppError::Lookup(e) => {
                tracing::error!("Lookup error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LOOKUP_ERROR",
                    LOOKUP_FAILED_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
