//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use hfpef_risk_core::EvaluationError;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // Artifact errors
    #[error("{0}")]
    ResourcesUnavailable(String),

    // Validation errors
    #[error("{0}")]
    ValidationError(String),

    // Evaluation errors
    #[error("{0}")]
    InferenceFailed(String),
    #[error("{0}")]
    AttributionFailed(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ResourcesUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InferenceFailed(_) | AppError::AttributionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ResourcesUnavailable(_) => "resources_unavailable",
            AppError::ValidationError(_) => "invalid_input",
            AppError::InferenceFailed(_) => "inference_failed",
            AppError::AttributionFailed(_) => "attribution_failed",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::ValidationError(msg) => tracing::debug!("Rejected input: {}", msg),
            AppError::ResourcesUnavailable(msg) => tracing::warn!("Resources unavailable: {}", msg),
            AppError::InferenceFailed(msg) | AppError::AttributionFailed(msg) => {
                tracing::error!("Evaluation error: {}", msg)
            }
        }

        let body = Json(json!({
            "error": self.to_string(),
            "kind": self.kind(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<EvaluationError> for AppError {
    fn from(err: EvaluationError) -> Self {
        match err {
            EvaluationError::ResourcesUnavailable(reason) => AppError::ResourcesUnavailable(reason),
            EvaluationError::InvalidInput(errors) => errors.into(),
            EvaluationError::InferenceFailed(e) => AppError::InferenceFailed(e.to_string()),
            EvaluationError::AttributionFailed(e) => AppError::AttributionFailed(e.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::ValidationError(describe_validation(&errors))
    }
}

/// `"egfr (range), hs_crp (range)"`, sorted by field
pub fn describe_validation(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors.field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let codes: Vec<&str> = errs.iter().map(|e| e.code.as_ref()).collect();
            format!("{} ({})", field, codes.join(", "))
        })
        .collect();
    fields.sort();
    fields.join(", ")
}
