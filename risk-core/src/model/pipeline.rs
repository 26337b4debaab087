//! Two-stage pipeline: preprocessing transforms followed by an estimator

use ndarray::{Array1, Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use super::classifier::{LinearScorer, Probabilities};
use super::inference::ModelError;
use super::linear::LogisticRegression;
use super::scaler::StandardScaler;
use crate::constants::{ESTIMATOR_STEP, SCALER_STEP};
use crate::explain::AttributionError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    StandardScaler(StandardScaler),
    LogisticRegression(LogisticRegression),
}

impl Step {
    pub fn type_name(&self) -> &'static str {
        match self {
            Step::StandardScaler(_) => "standard_scaler",
            Step::LogisticRegression(_) => "logistic_regression",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedStep {
    pub name: String,
    pub step: Step,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub steps: Vec<NamedStep>,
}

impl Pipeline {
    pub fn new(steps: Vec<(&str, Step)>) -> Self {
        Self {
            steps: steps.into_iter()
                .map(|(name, step)| NamedStep { name: name.to_string(), step })
                .collect(),
        }
    }

    /// Look up a step by name
    pub fn step(&self, name: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.name == name).map(|s| &s.step)
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }

    /// Transforms in order, then the final estimator
    fn stages(&self) -> Result<(Vec<&StandardScaler>, &LogisticRegression), ModelError> {
        let (last, head) = self.steps.split_last()
            .ok_or_else(|| ModelError::MalformedPipeline("pipeline has no steps".to_string()))?;

        let estimator = match &last.step {
            Step::LogisticRegression(lr) => lr,
            other => {
                return Err(ModelError::MalformedPipeline(format!(
                    "final step '{}' is a {}, not an estimator",
                    last.name,
                    other.type_name()
                )))
            }
        };

        let mut transforms = Vec::with_capacity(head.len());
        for named in head {
            match &named.step {
                Step::StandardScaler(scaler) => transforms.push(scaler),
                other => {
                    return Err(ModelError::MalformedPipeline(format!(
                        "intermediate step '{}' is a {}, not a transform",
                        named.name,
                        other.type_name()
                    )))
                }
            }
        }

        Ok((transforms, estimator))
    }

    /// Apply every transform step
    pub fn transform(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, ModelError> {
        let (transforms, _) = self.stages()?;
        let mut data = x.to_owned();
        for scaler in transforms {
            data = scaler.transform(data.view())?;
        }
        Ok(data)
    }

    pub fn decision_function(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, ModelError> {
        let (_, estimator) = self.stages()?;
        let data = self.transform(x)?;
        estimator.decision_function(data.view())
    }

    pub fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Probabilities, ModelError> {
        let (_, estimator) = self.stages()?;
        let data = self.transform(x)?;
        estimator.predict_proba(data.view())
    }

    pub fn classes(&self) -> Result<&[i64], ModelError> {
        let (_, estimator) = self.stages()?;
        Ok(&estimator.classes)
    }

    /// Split into the `scaler` and `clf` steps
    pub fn linear_scorer(&self) -> Result<LinearScorer<'_>, AttributionError> {
        let transform = match self.step(SCALER_STEP) {
            Some(Step::StandardScaler(scaler)) => scaler,
            Some(other) => {
                return Err(AttributionError::UnexpectedStep {
                    name: SCALER_STEP.to_string(),
                    found: other.type_name(),
                })
            }
            None => return Err(AttributionError::MissingStep(SCALER_STEP.to_string())),
        };

        let estimator = match self.step(ESTIMATOR_STEP) {
            Some(Step::LogisticRegression(lr)) => lr,
            Some(other) => {
                return Err(AttributionError::UnexpectedStep {
                    name: ESTIMATOR_STEP.to_string(),
                    found: other.type_name(),
                })
            }
            None => return Err(AttributionError::MissingStep(ESTIMATOR_STEP.to_string())),
        };

        Ok(LinearScorer { transform: Some(transform), estimator })
    }
}
