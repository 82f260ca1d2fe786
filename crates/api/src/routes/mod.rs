//! HTTP Routes

pub mod estimate;
pub mod options;
pub mod schema;

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use data_validator::ValidationError;
use feature_engine::FeatureRow;
use serde::Serialize;

/// Error body shared by all routes
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: &'static str,
    /// Human-readable message
    pub message: String,
    /// Per-field validation errors
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ValidationError>,
    /// Row that was fed to the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<FeatureRow>,
}

impl ErrorResponse {
    /// Create an error body
    pub fn new(error: &'static str, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
            details: Vec::new(),
            row: None,
        }
    }

    /// Attach a response status
    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// 503 body for when the model artifact could not be loaded
pub fn model_unavailable(reason: &str) -> Response {
    ErrorResponse::new(
        "model_unavailable",
        format!("Price estimation is disabled: {}", reason),
    )
    .with_status(StatusCode::SERVICE_UNAVAILABLE)
}
