//! Error types for the yield prediction service

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// Request body could not be mapped onto the feature schema
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("unexpected field: {0}")]
    UnexpectedField(String),

    #[error("invalid request body: {0}")]
    InvalidValue(String),
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        let message = err.to_string();
        if let Some(field) = quoted_field(&message, "missing field ") {
            ValidationError::MissingField(field)
        } else if let Some(field) = quoted_field(&message, "unknown field ") {
            ValidationError::UnexpectedField(field)
        } else {
            ValidationError::InvalidValue(message)
        }
    }
}

/// Field name serde wraps in backticks after `prefix`.
fn quoted_field(message: &str, prefix: &str) -> Option<String> {
    let rest = message.strip_prefix(prefix)?.strip_prefix('`')?;
    rest.split('`').next().map(str::to_string)
}

/// Failures while fitting or running the model pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("cannot fit on an empty training set")]
    EmptyTrainingSet,

    #[error("feature rows ({rows}) and targets ({targets}) differ in length")]
    LengthMismatch { rows: usize, targets: usize },

    #[error("expected {expected} features, got {actual}")]
    FeatureWidth { expected: usize, actual: usize },

    #[error("model fitting failed: {0}")]
    Fit(String),

    #[error("invalid model parameter {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
}

/// Error surfaced by the HTTP layer
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(e) => {
                tracing::warn!(error = %e, "Rejected prediction request");
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            ApiError::Pipeline(e) => {
                tracing::error!(error = %e, "Pipeline inference failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
