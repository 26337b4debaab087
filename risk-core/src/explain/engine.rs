//! Interventional linear attribution
//!
//! For a scorer `f(x) = w·x + b` and background mean `μ` (taken after the
//! scorer's transform), feature `i` contributes `w_i (x_i - μ_i)` and the
//! baseline is `f(μ)`. Features are perturbed independently of each other.

use ndarray::{Array1, ArrayView2, Axis};

use super::types::{Attribution, AttributionError, FeatureContribution};
use crate::features::FeatureVector;
use crate::model::{LinearScorer, ProbabilisticClassifier};

pub struct LinearExplainer<'a> {
    scorer: LinearScorer<'a>,
    mean: Array1<f64>,
    expected_value: f64,
}

impl<'a> LinearExplainer<'a> {
    /// Fit the reference distribution from raw background rows
    pub fn new(scorer: LinearScorer<'a>, background: ArrayView2<'_, f64>) -> Result<Self, AttributionError> {
        if background.nrows() == 0 {
            return Err(AttributionError::EmptyBackground);
        }

        let expected = scorer.estimator.n_features();
        if background.ncols() != expected {
            return Err(AttributionError::BackgroundShape { expected, actual: background.ncols() });
        }

        let prepared = scorer.prepare(background)?;
        let mean = prepared.mean_axis(Axis(0)).ok_or(AttributionError::EmptyBackground)?;
        let expected_value = scorer.estimator.weights().dot(&mean) + scorer.estimator.intercept;

        Ok(Self { scorer, mean, expected_value })
    }

    /// Baseline `E[f(X)]`
    pub fn expected_value(&self) -> f64 {
        self.expected_value
    }

    pub fn explain_row(&self, row: &FeatureVector) -> Result<Attribution, AttributionError> {
        let expected = self.scorer.estimator.n_features();
        if row.len() != expected {
            return Err(AttributionError::RowShape { expected, actual: row.len() });
        }

        let prepared = self.scorer.prepare(row.to_row().view())?;
        let x = prepared.row(0);
        let weights = self.scorer.estimator.weights();

        let contributions = row.ids().iter()
            .zip(row.values())
            .enumerate()
            .map(|(i, (&feature, &value))| FeatureContribution {
                feature,
                value,
                contribution: weights[i] * (x[i] - self.mean[i]),
            })
            .collect();

        Ok(Attribution { baseline: self.expected_value, contributions })
    }
}

/// Unwrap `classifier` and attribute `row` against `background`
pub fn explain<C>(
    classifier: &C,
    background: ArrayView2<'_, f64>,
    row: &FeatureVector,
) -> Result<Attribution, AttributionError>
where
    C: ProbabilisticClassifier + ?Sized,
{
    let scorer = classifier.linear_scorer()?;
    let explainer = LinearExplainer::new(scorer, background)?;
    let attribution = explainer.explain_row(row)?;

    log::debug!(
        "Attribution baseline {:.4}, output {:.4}",
        attribution.baseline,
        attribution.output()
    );

    Ok(attribution)
}
