//! Binary logistic regression

use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::classifier::Probabilities;
use super::inference::ModelError;

fn binary_classes() -> Vec<i64> {
    vec![0, 1]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// One weight per input column
    pub coef: Vec<f64>,
    pub intercept: f64,
    /// Class labels; the second one is scored by `decision_function`
    #[serde(default = "binary_classes")]
    pub classes: Vec<i64>,
}

impl LogisticRegression {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        Self { coef, intercept, classes: binary_classes() }
    }

    pub fn n_features(&self) -> usize {
        self.coef.len()
    }

    pub fn weights(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(&self.coef[..])
    }

    /// Log-odds of the second class, one per row
    pub fn decision_function(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, ModelError> {
        check_width(x, self.n_features())?;
        Ok(x.dot(&self.weights()) + self.intercept)
    }

    pub fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Probabilities, ModelError> {
        let scores = self.decision_function(x)?;
        Probabilities::binary(self.classes.clone(), scores.mapv(sigmoid))
    }
}

/// Logistic function, stable for large |z|
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

pub(crate) fn check_width(x: ArrayView2<'_, f64>, expected: usize) -> Result<(), ModelError> {
    if x.ncols() != expected {
        return Err(ModelError::ShapeMismatch { expected, actual: x.ncols() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_sigmoid() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert_eq!(sigmoid(1000.0), 1.0);
    }

    #[test]
    fn test_decision_function() {
        let lr = LogisticRegression::new(vec![1.0, -2.0], 0.5);
        let x = array![[1.0, 1.0], [0.0, 0.0]];
        let scores = lr.decision_function(x.view()).unwrap();
        assert_eq!(scores, array![-0.5, 0.5]);
    }

    #[test]
    fn test_predict_proba_columns() {
        let lr = LogisticRegression::new(vec![1.0], 0.0);
        let proba = lr.predict_proba(array![[0.0], [3.0]].view()).unwrap();
        let positive = proba.column(1).unwrap();
        let negative = proba.column(0).unwrap();
        assert_eq!(positive[0], 0.5);
        assert!((positive[1] + negative[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_shape_mismatch() {
        let lr = LogisticRegression::new(vec![1.0, 2.0, 3.0], 0.0);
        let err = lr.decision_function(array![[1.0, 2.0]].view()).unwrap_err();
        assert!(matches!(err, ModelError::ShapeMismatch { expected: 3, actual: 2 }));
    }

    #[test]
    fn test_deserialize_default_classes() {
        let lr: LogisticRegression = serde_json::from_str(r#"{"coef": [0.1], "intercept": -1.0}"#).unwrap();
        assert_eq!(lr.classes, vec![0, 1]);
    }
}
