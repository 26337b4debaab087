//! Classifier capability and its serialized shapes

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::calibration::CalibratedClassifier;
use super::inference::ModelError;
use super::linear::LogisticRegression;
use super::pipeline::Pipeline;
use super::scaler::StandardScaler;
use crate::explain::AttributionError;

// ============================================================================
// CAPABILITY
// ============================================================================

/// What the rest of the engine needs from a trained model
pub trait ProbabilisticClassifier {
    /// Class probabilities for every row of `x`
    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Probabilities, ModelError>;

    /// Innermost linear scorer and the transform feeding it
    fn linear_scorer(&self) -> Result<LinearScorer<'_>, AttributionError>;
}

/// Per-class probability matrix, one column per entry of `classes`
#[derive(Debug, Clone, PartialEq)]
pub struct Probabilities {
    classes: Vec<i64>,
    matrix: Array2<f64>,
}

impl Probabilities {
    /// Two-class matrix from the probabilities of the second class
    pub fn binary(classes: Vec<i64>, second: Array1<f64>) -> Result<Self, ModelError> {
        if classes.len() != 2 {
            return Err(ModelError::UnsupportedClasses(classes));
        }
        let mut matrix = Array2::<f64>::zeros((second.len(), 2));
        matrix.column_mut(0).assign(&second.mapv(|p| 1.0 - p));
        matrix.column_mut(1).assign(&second);
        Ok(Self { classes, matrix })
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Column of the given class label
    pub fn column(&self, class: i64) -> Result<ArrayView1<'_, f64>, ModelError> {
        let index = self.classes.iter()
            .position(|&c| c == class)
            .ok_or_else(|| ModelError::MissingClass { class, classes: self.classes.clone() })?;
        Ok(self.matrix.column(index))
    }
}

/// Linear scoring function reached by unwrapping a classifier
#[derive(Debug, Clone, Copy)]
pub struct LinearScorer<'a> {
    pub transform: Option<&'a StandardScaler>,
    pub estimator: &'a LogisticRegression,
}

impl LinearScorer<'_> {
    /// Apply the transform, if any
    pub fn prepare(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, AttributionError> {
        match self.transform {
            Some(scaler) => Ok(scaler.transform(x)?),
            None => Ok(x.to_owned()),
        }
    }

    /// Linear score of already prepared rows
    pub fn score(&self, prepared: ArrayView2<'_, f64>) -> Result<Array1<f64>, AttributionError> {
        Ok(self.estimator.decision_function(prepared)?)
    }
}

// ============================================================================
// SERIALIZED SHAPES
// ============================================================================

/// Base estimator inside a calibration wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    LogisticRegression(LogisticRegression),
    Pipeline(Pipeline),
}

impl Estimator {
    pub fn decision_function(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, ModelError> {
        match self {
            Estimator::LogisticRegression(lr) => lr.decision_function(x),
            Estimator::Pipeline(pipe) => pipe.decision_function(x),
        }
    }

    pub fn classes(&self) -> Result<&[i64], ModelError> {
        match self {
            Estimator::LogisticRegression(lr) => Ok(&lr.classes),
            Estimator::Pipeline(pipe) => pipe.classes(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Estimator::LogisticRegression(_) => "logistic_regression".to_string(),
            Estimator::Pipeline(pipe) => format!("pipeline[{}]", pipe.step_names().join(", ")),
        }
    }
}

impl ProbabilisticClassifier for Estimator {
    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Probabilities, ModelError> {
        match self {
            Estimator::LogisticRegression(lr) => lr.predict_proba(x),
            Estimator::Pipeline(pipe) => pipe.predict_proba(x),
        }
    }

    fn linear_scorer(&self) -> Result<LinearScorer<'_>, AttributionError> {
        match self {
            Estimator::LogisticRegression(lr) => Ok(LinearScorer { transform: None, estimator: lr }),
            Estimator::Pipeline(pipe) => pipe.linear_scorer(),
        }
    }
}

/// Top-level classifier artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    LogisticRegression(LogisticRegression),
    Pipeline(Pipeline),
    Calibrated(CalibratedClassifier),
}

impl Classifier {
    pub fn kind(&self) -> &'static str {
        match self {
            Classifier::LogisticRegression(_) => "logistic_regression",
            Classifier::Pipeline(_) => "pipeline",
            Classifier::Calibrated(_) => "calibrated",
        }
    }

    /// Structure summary, e.g. `calibrated(3 x pipeline[scaler, clf])`
    pub fn describe(&self) -> String {
        match self {
            Classifier::LogisticRegression(_) => "logistic_regression".to_string(),
            Classifier::Pipeline(pipe) => format!("pipeline[{}]", pipe.step_names().join(", ")),
            Classifier::Calibrated(cal) => match cal.first() {
                Some(member) => format!(
                    "calibrated({} x {})",
                    cal.calibrated_classifiers.len(),
                    member.estimator.describe()
                ),
                None => "calibrated(empty)".to_string(),
            },
        }
    }
}

impl ProbabilisticClassifier for Classifier {
    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Probabilities, ModelError> {
        match self {
            Classifier::LogisticRegression(lr) => lr.predict_proba(x),
            Classifier::Pipeline(pipe) => pipe.predict_proba(x),
            Classifier::Calibrated(cal) => cal.predict_proba(x),
        }
    }

    fn linear_scorer(&self) -> Result<LinearScorer<'_>, AttributionError> {
        match self {
            Classifier::LogisticRegression(lr) => Ok(LinearScorer { transform: None, estimator: lr }),
            Classifier::Pipeline(pipe) => pipe.linear_scorer(),
            Classifier::Calibrated(cal) => cal.first()
                .ok_or(AttributionError::EmptyCalibration)?
                .estimator
                .linear_scorer(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CalibratedMember, Calibrator, Step};
    use ndarray::array;

    fn pipeline() -> Pipeline {
        Pipeline::new(vec![
            ("scaler", Step::StandardScaler(StandardScaler { mean: vec![0.0], scale: vec![2.0] })),
            ("clf", Step::LogisticRegression(LogisticRegression::new(vec![1.0], 0.0))),
        ])
    }

    #[test]
    fn test_column_lookup() {
        let proba = Probabilities::binary(vec![0, 1], array![0.8]).unwrap();
        assert_eq!(proba.column(1).unwrap()[0], 0.8);
        assert!((proba.column(0).unwrap()[0] - 0.2).abs() < 1e-12);
        assert!(matches!(proba.column(2), Err(ModelError::MissingClass { class: 2, .. })));
    }

    #[test]
    fn test_reject_multiclass() {
        assert!(matches!(
            Probabilities::binary(vec![0, 1, 2], array![0.5]),
            Err(ModelError::UnsupportedClasses(_))
        ));
    }

    #[test]
    fn test_unwrap_calibrated_pipeline() {
        let classifier = Classifier::Calibrated(CalibratedClassifier {
            calibrated_classifiers: vec![CalibratedMember {
                estimator: Estimator::Pipeline(pipeline()),
                calibrator: Calibrator::Sigmoid { a: -1.0, b: 0.0 },
            }],
        });

        let scorer = classifier.linear_scorer().unwrap();
        assert!(scorer.transform.is_some());
        assert_eq!(scorer.estimator.coef, vec![1.0]);

        let prepared = scorer.prepare(array![[4.0]].view()).unwrap();
        assert_eq!(scorer.score(prepared.view()).unwrap(), array![2.0]);
        assert_eq!(classifier.describe(), "calibrated(1 x pipeline[scaler, clf])");
    }

    #[test]
    fn test_unwrap_plain_estimator() {
        let classifier = Classifier::LogisticRegression(LogisticRegression::new(vec![0.3], 0.1));
        let scorer = classifier.linear_scorer().unwrap();
        assert!(scorer.transform.is_none());
        assert_eq!(classifier.kind(), "logistic_regression");
    }

    #[test]
    fn test_unwrap_empty_calibration() {
        let classifier = Classifier::Calibrated(CalibratedClassifier { calibrated_classifiers: vec![] });
        assert!(matches!(classifier.linear_scorer(), Err(AttributionError::EmptyCalibration)));
    }

    #[test]
    fn test_deserialize_tagged() {
        let json = r#"{
            "kind": "calibrated",
            "calibrated_classifiers": [{
                "estimator": {"kind": "logistic_regression", "coef": [1.0, -1.0], "intercept": 0.0},
                "calibrator": {"method": "isotonic", "x_thresholds": [-1.0, 1.0], "y_thresholds": [0.0, 1.0]}
            }]
        }"#;
        let classifier: Classifier = serde_json::from_str(json).unwrap();
        assert_eq!(classifier.kind(), "calibrated");

        let proba = classifier.predict_proba(array![[0.5, 0.5]].view()).unwrap();
        assert!((proba.column(1).unwrap()[0] - 0.5).abs() < 1e-12);
    }
}
