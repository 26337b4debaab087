//! Inference Stage
//!
//! Scores one arranged row and extracts the readmission-class probability.

use serde::Serialize;
use thiserror::Error;

use super::classifier::ProbabilisticClassifier;
use crate::constants::POSITIVE_CLASS;
use crate::features::FeatureVector;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("shape mismatch: expected {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("malformed pipeline: {0}")]
    MalformedPipeline(String),

    #[error("malformed step: {0}")]
    MalformedStep(String),

    #[error("invalid calibrator: {0}")]
    InvalidCalibrator(String),

    #[error("calibration wrapper has no calibrated classifiers")]
    EmptyCalibration,

    #[error("only binary classifiers are supported, got classes {0:?}")]
    UnsupportedClasses(Vec<i64>),

    #[error("class {class} not among model classes {classes:?}")]
    MissingClass { class: i64, classes: Vec<i64> },

    #[error("model returned no rows")]
    EmptyOutput,

    #[error("model returned an invalid probability {0}")]
    InvalidProbability(f64),
}

// ============================================================================
// PREDICTION
// ============================================================================

/// Prediction output
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    /// Probability of readmission, 0.0 - 1.0
    pub probability: f64,
    pub inference_time_us: u64,
}

/// Positive-class probability of a single row
pub fn predict<C>(classifier: &C, row: &FeatureVector) -> Result<PredictionResult, ModelError>
where
    C: ProbabilisticClassifier + ?Sized,
{
    let start_time = std::time::Instant::now();

    let x = row.to_row();
    let proba = classifier.predict_proba(x.view())?;
    let probability = proba.column(POSITIVE_CLASS)?
        .get(0)
        .copied()
        .ok_or(ModelError::EmptyOutput)?;

    if !(0.0..=1.0).contains(&probability) {
        return Err(ModelError::InvalidProbability(probability));
    }

    let inference_time_us = start_time.elapsed().as_micros() as u64;
    log::debug!("Predicted readmission probability {:.4} in {}us", probability, inference_time_us);

    Ok(PredictionResult { probability, inference_time_us })
}
