use serde::Serialize;
use thiserror::Error;

use crate::features::FeatureId;
use crate::model::ModelError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributionError {
    #[error("pipeline has no '{0}' step")]
    MissingStep(String),

    #[error("pipeline step '{name}' is a {found}")]
    UnexpectedStep { name: String, found: &'static str },

    #[error("calibration wrapper has no base estimator")]
    EmptyCalibration,

    #[error("background sample is empty")]
    EmptyBackground,

    #[error("background sample has {actual} columns, model expects {expected}")]
    BackgroundShape { expected: usize, actual: usize },

    #[error("input row has {actual} columns, model expects {expected}")]
    RowShape { expected: usize, actual: usize },

    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureContribution {
    pub feature: FeatureId,
    /// Raw input value, before any transform
    pub value: f64,
    /// Signed contribution in log-odds units
    pub contribution: f64,
}

/// Additive decomposition: `baseline + Σ contribution = linear score`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribution {
    /// Expected linear score over the background sample
    pub baseline: f64,
    /// One entry per feature, in model column order
    pub contributions: Vec<FeatureContribution>,
}

impl Attribution {
    /// Linear score of the explained row
    pub fn output(&self) -> f64 {
        self.baseline + self.contributions.iter().map(|c| c.contribution).sum::<f64>()
    }

    /// Feature with the largest |contribution|; the first one wins ties
    pub fn top(&self) -> Option<&FeatureContribution> {
        let mut best: Option<&FeatureContribution> = None;
        for c in &self.contributions {
            match best {
                Some(b) if c.contribution.abs() <= b.contribution.abs() => {}
                _ => best = Some(c),
            }
        }
        best
    }

    /// Contributions by descending |contribution|, stable on ties
    pub fn by_magnitude(&self) -> Vec<&FeatureContribution> {
        let mut sorted: Vec<&FeatureContribution> = self.contributions.iter().collect();
        sorted.sort_by(|a, b| {
            b.contribution.abs()
                .partial_cmp(&a.contribution.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted
    }

    pub fn get(&self, feature: FeatureId) -> Option<&FeatureContribution> {
        self.contributions.iter().find(|c| c.feature == feature)
    }
}
