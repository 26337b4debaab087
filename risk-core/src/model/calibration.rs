//! Probability calibration wrapper
//!
//! Each member calibrates the decision function of its own base estimator;
//! the wrapper averages the members' positive-class probabilities.

use ndarray::{Array1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::classifier::{Estimator, Probabilities};
use super::inference::ModelError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Calibrator {
    /// Platt scaling: `1 / (1 + exp(a * f + b))`
    Sigmoid { a: f64, b: f64 },
    /// Piecewise-linear map, clipped at both ends
    Isotonic { x_thresholds: Vec<f64>, y_thresholds: Vec<f64> },
}

impl Calibrator {
    pub fn calibrate(&self, score: f64) -> Result<f64, ModelError> {
        match self {
            Calibrator::Sigmoid { a, b } => Ok(1.0 / (1.0 + (a * score + b).exp())),
            Calibrator::Isotonic { x_thresholds, y_thresholds } => {
                if x_thresholds.is_empty() || x_thresholds.len() != y_thresholds.len() {
                    return Err(ModelError::InvalidCalibrator(format!(
                        "isotonic calibrator has {} x and {} y thresholds",
                        x_thresholds.len(),
                        y_thresholds.len()
                    )));
                }
                Ok(interpolate(score, x_thresholds, y_thresholds).clamp(0.0, 1.0))
            }
        }
    }
}

fn interpolate(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    let last = xs.len() - 1;
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }

    let upper = xs.partition_point(|&v| v <= x);
    let (x0, x1) = (xs[upper - 1], xs[upper]);
    let (y0, y1) = (ys[upper - 1], ys[upper]);
    if x1 == x0 {
        return y1;
    }
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibratedMember {
    pub estimator: Estimator,
    pub calibrator: Calibrator,
}

impl CalibratedMember {
    pub fn predict_positive(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, ModelError> {
        let scores = self.estimator.decision_function(x)?;
        scores.iter()
            .map(|&s| self.calibrator.calibrate(s))
            .collect::<Result<Vec<f64>, ModelError>>()
            .map(Array1::from)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibratedClassifier {
    pub calibrated_classifiers: Vec<CalibratedMember>,
}

impl CalibratedClassifier {
    pub fn first(&self) -> Option<&CalibratedMember> {
        self.calibrated_classifiers.first()
    }

    pub fn classes(&self) -> Result<&[i64], ModelError> {
        self.first().ok_or(ModelError::EmptyCalibration)?.estimator.classes()
    }

    pub fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Probabilities, ModelError> {
        let classes = self.classes()?.to_vec();

        let mut total = Array1::<f64>::zeros(x.nrows());
        for member in &self.calibrated_classifiers {
            total += &member.predict_positive(x)?;
        }
        let mean = total / self.calibrated_classifiers.len() as f64;

        Probabilities::binary(classes, mean)
    }
}
