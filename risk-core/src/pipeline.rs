//! Evaluation Pipeline
//!
//! validate -> arrange -> predict -> explain. Attribution failures are kept
//! inside the result so the probability still reaches the operator.

use serde::Serialize;
use validator::Validate;

use crate::artifacts::Resources;
use crate::error::EvaluationError;
use crate::explain::{self, Attribution, AttributionError};
use crate::features::{FeatureVector, PatientInput};
use crate::model;
use crate::report::RiskTier;

#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub features: FeatureVector,
    /// Positive-class probability, 0.0 - 1.0
    pub probability: f64,
    pub inference_time_us: u64,
    #[serde(skip)]
    pub attribution: Result<Attribution, AttributionError>,
}

impl Evaluation {
    pub fn percentage(&self) -> f64 {
        self.probability * 100.0
    }

    pub fn tier(&self) -> RiskTier {
        RiskTier::from_percentage(self.percentage())
    }

    /// Attribution failure as a boundary error, if any
    pub fn attribution_error(&self) -> Option<EvaluationError> {
        self.attribution.as_ref()
            .err()
            .map(|e| EvaluationError::AttributionFailed(e.clone()))
    }
}

/// Score one patient against loaded resources
pub fn evaluate(resources: &Resources, input: &PatientInput) -> Result<Evaluation, EvaluationError> {
    input.validate()?;

    let features = FeatureVector::arrange(input, &resources.layout);
    let prediction = model::predict(&resources.classifier, &features).map_err(|e| {
        log::warn!("Inference failed: {}", e);
        EvaluationError::InferenceFailed(e)
    })?;

    let attribution = explain::explain(&resources.classifier, resources.background.view(), &features);

    let tier = RiskTier::from_percentage(prediction.probability * 100.0);
    match &attribution {
        Ok(a) => log::info!(
            "Evaluated probability {:.4} ({:?}), top feature {}",
            prediction.probability,
            tier,
            a.top().map(|c| c.feature.as_str()).unwrap_or("-")
        ),
        Err(e) => log::warn!(
            "Evaluated probability {:.4} ({:?}), attribution failed: {}",
            prediction.probability,
            tier,
            e
        ),
    }
    log::debug!("Input row {}", features.to_log_entry());

    Ok(Evaluation {
        features,
        probability: prediction.probability,
        inference_time_us: prediction.inference_time_us,
        attribution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{load_resources, ArtifactPaths, ResourceCache};
    use crate::constants::DEFAULT_MODEL_FILE;
    use crate::features::{catalog, Control, FeatureId, FeatureLayout};
    use crate::model::{Classifier, ProbabilisticClassifier};
    use crate::testing;

    fn resources_for(
        layout: &FeatureLayout,
        make: impl Fn(&FeatureLayout, &ndarray::Array2<f64>) -> Classifier,
    ) -> (tempfile::TempDir, Resources) {
        let dir = tempfile::tempdir().unwrap();
        let data = testing::background(layout, 32);
        testing::write_artifacts(dir.path(), &make(layout, &data), layout, &data);
        let resources = load_resources(&ArtifactPaths::in_dir(dir.path())).unwrap();
        (dir, resources)
    }

    #[test]
    fn test_defaults_scenario() {
        let layout = testing::training_layout();
        let (_dir, resources) = resources_for(&layout, testing::calibrated_classifier);

        let evaluation = evaluate(&resources, &PatientInput::default()).unwrap();
        assert!((0.0..=1.0).contains(&evaluation.probability));

        let attribution = evaluation.attribution.as_ref().unwrap();
        assert_eq!(attribution.contributions.len(), 10);

        let max = attribution.contributions.iter()
            .map(|c| c.contribution.abs())
            .fold(0.0, f64::max);
        assert_eq!(attribution.top().unwrap().contribution.abs(), max);
    }

    fn corner(pick_max: bool) -> PatientInput {
        catalog().iter().fold(PatientInput::default(), |input, spec| {
            let (lo, hi) = match spec.control {
                Control::Number { min, max, .. } => (min, max),
                Control::Choice { options } => (
                    f64::from(options[0]),
                    f64::from(options[options.len() - 1]),
                ),
            };
            input.with(spec.id, if pick_max { hi } else { lo })
        })
    }

    #[test]
    fn test_range_corners_stay_probabilities() {
        let layout = testing::training_layout();
        let (_dir, resources) = resources_for(&layout, testing::calibrated_classifier);

        let high = corner(true);
        assert_eq!(high.nt_probnp, 35000.0);
        assert_eq!(high.nyha_class, 4);

        for input in [corner(false), high] {
            let evaluation = evaluate(&resources, &input).unwrap();
            assert!((0.0..=1.0).contains(&evaluation.probability), "{}", evaluation.probability);
            assert!(evaluation.attribution.is_ok());
        }
    }

    #[test]
    fn test_additivity_against_inner_score() {
        let layout = testing::training_layout();
        let (_dir, resources) = resources_for(&layout, testing::pipeline_classifier);
        let input = PatientInput::default().with(FeatureId::NtProbnp, 12000.0);

        let evaluation = evaluate(&resources, &input).unwrap();
        let attribution = evaluation.attribution.unwrap();

        let scorer = resources.classifier.linear_scorer().unwrap();
        let prepared = scorer.prepare(evaluation.features.to_row().view()).unwrap();
        let expected = scorer.score(prepared.view()).unwrap()[0];
        assert!((attribution.output() - expected).abs() <= 1e-6 * expected.abs().max(1.0));
    }

    #[test]
    fn test_malformed_pipeline_keeps_probability() {
        let layout = testing::training_layout();
        let (_dir, resources) = resources_for(&layout, testing::unnamed_pipeline_classifier);

        let evaluation = evaluate(&resources, &PatientInput::default()).unwrap();
        assert!((0.0..=1.0).contains(&evaluation.probability));
        assert_eq!(
            evaluation.attribution,
            Err(AttributionError::MissingStep("scaler".to_string()))
        );
        assert_eq!(evaluation.attribution_error().unwrap().kind(), "attribution_failed");
    }

    #[test]
    fn test_missing_artifacts_block_evaluation() {
        let layout = testing::training_layout();
        let (dir, _) = resources_for(&layout, testing::pipeline_classifier);
        std::fs::remove_file(dir.path().join(DEFAULT_MODEL_FILE)).unwrap();

        let cache = ResourceCache::new(ArtifactPaths::in_dir(dir.path()));
        let err = cache.require()
            .and_then(|resources| evaluate(resources, &PatientInput::default()))
            .unwrap_err();
        assert_eq!(err.kind(), "resources_unavailable");
    }

    #[test]
    fn test_out_of_range_input_rejected() {
        let layout = testing::training_layout();
        let (_dir, resources) = resources_for(&layout, testing::pipeline_classifier);

        let input = PatientInput::default().with(FeatureId::Egfr, 400.0);
        let err = evaluate(&resources, &input).unwrap_err();
        assert_eq!(err.kind(), "invalid_input");
    }

    #[test]
    fn test_deterministic() {
        let layout = testing::training_layout();
        let (_dir, resources) = resources_for(&layout, testing::calibrated_classifier);
        let input = PatientInput::default().with(FeatureId::HsCrp, 42.0);

        let a = evaluate(&resources, &input).unwrap();
        let b = evaluate(&resources, &input).unwrap();
        assert_eq!(a.probability.to_bits(), b.probability.to_bits());
        assert_eq!(a.attribution, b.attribution);
    }

    #[test]
    fn test_layout_permutation_invariant() {
        let training = testing::training_layout();
        let form = FeatureLayout::form_order();
        let (_d1, r1) = resources_for(&training, testing::calibrated_classifier);
        let (_d2, r2) = resources_for(&form, testing::calibrated_classifier);
        let input = PatientInput::default().with(FeatureId::DDimer, 3.2);

        let a = evaluate(&r1, &input).unwrap();
        let b = evaluate(&r2, &input).unwrap();
        assert!((a.probability - b.probability).abs() < 1e-12);

        let (a, b) = (a.attribution.unwrap(), b.attribution.unwrap());
        for id in FeatureId::ALL {
            let diff = a.get(id).unwrap().contribution - b.get(id).unwrap().contribution;
            assert!(diff.abs() < 1e-12);
        }
    }
}
