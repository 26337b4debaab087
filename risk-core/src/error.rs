//! Evaluation error taxonomy
//!
//! Every failure of a single evaluation ends up as one of these variants at
//! the boundary of the triggering action.

use thiserror::Error;
use validator::ValidationErrors;

use crate::explain::AttributionError;
use crate::model::ModelError;

#[derive(Debug, Error)]
pub enum EvaluationError {
    /// Artifacts could not be loaded; nothing can be evaluated until restart.
    #[error("resources unavailable: {0}")]
    ResourcesUnavailable(String),

    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),

    #[error("prediction failed: {0}")]
    InferenceFailed(#[from] ModelError),

    #[error("attribution failed: {0}")]
    AttributionFailed(#[from] AttributionError),
}

impl EvaluationError {
    /// Stable machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            EvaluationError::ResourcesUnavailable(_) => "resources_unavailable",
            EvaluationError::InvalidInput(_) => "invalid_input",
            EvaluationError::InferenceFailed(_) => "inference_failed",
            EvaluationError::AttributionFailed(_) => "attribution_failed",
        }
    }
}
