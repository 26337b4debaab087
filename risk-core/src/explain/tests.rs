//! Attribution scenarios against the reference fixtures

use super::*;
use crate::features::{FeatureId, FeatureVector, PatientInput};
use crate::model::{Classifier, LogisticRegression, ProbabilisticClassifier};
use crate::testing;

fn assert_close(a: f64, b: f64) {
    let tol = 1e-6 * a.abs().max(b.abs()).max(1.0);
    assert!((a - b).abs() <= tol, "{} != {}", a, b);
}

#[test]
fn test_additivity_pipeline() {
    let layout = testing::training_layout();
    let data = testing::background(&layout, 40);
    let classifier = testing::pipeline_classifier(&layout, &data);

    let input = PatientInput::default().with(FeatureId::Egfr, 12.0).with(FeatureId::NtProbnp, 9000.0);
    let row = FeatureVector::arrange(&input, &layout);
    let attribution = explain(&classifier, data.view(), &row).unwrap();

    let scorer = classifier.linear_scorer().unwrap();
    let prepared = scorer.prepare(row.to_row().view()).unwrap();
    let score = scorer.score(prepared.view()).unwrap()[0];

    assert_eq!(attribution.contributions.len(), 10);
    assert_close(attribution.output(), score);
}

#[test]
fn test_additivity_calibrated() {
    let layout = testing::training_layout();
    let data = testing::background(&layout, 25);
    let classifier = testing::calibrated_classifier(&layout, &data);

    let row = FeatureVector::arrange(&PatientInput::default(), &layout);
    let attribution = explain(&classifier, data.view(), &row).unwrap();

    let scorer = classifier.linear_scorer().unwrap();
    let prepared = scorer.prepare(row.to_row().view()).unwrap();
    assert_close(attribution.output(), scorer.score(prepared.view()).unwrap()[0]);
}

#[test]
fn test_baseline_is_mean_score() {
    let layout = testing::training_layout();
    let data = testing::background(&layout, 30);
    let classifier = testing::pipeline_classifier(&layout, &data);

    let scorer = classifier.linear_scorer().unwrap();
    let explainer = LinearExplainer::new(scorer, data.view()).unwrap();
    let prepared = scorer.prepare(data.view()).unwrap();
    let mean_score = scorer.score(prepared.view()).unwrap().mean().unwrap();

    assert_close(explainer.expected_value(), mean_score);
}

#[test]
fn test_plain_estimator_untransformed() {
    let layout = testing::training_layout();
    let data = testing::background(&layout, 20);
    let classifier = Classifier::LogisticRegression(testing::linear(&layout));

    let input = PatientInput::default().with(FeatureId::HsCrp, 50.0);
    let row = FeatureVector::arrange(&input, &layout);
    let attribution = explain(&classifier, data.view(), &row).unwrap();

    // Raw-unit contribution: w * (x - mean)
    let column = layout.position(FeatureId::HsCrp).unwrap();
    let mean = data.column(column).mean().unwrap();
    let weight = testing::linear(&layout).coef[column];
    let hs_crp = attribution.get(FeatureId::HsCrp).unwrap();
    assert_close(hs_crp.contribution, weight * (50.0 - mean));
    assert_eq!(hs_crp.value, 50.0);
}

#[test]
fn test_attribution_is_deterministic() {
    let layout = testing::training_layout();
    let data = testing::background(&layout, 40);
    let classifier = testing::pipeline_classifier(&layout, &data);
    let row = FeatureVector::arrange(&PatientInput::default(), &layout);

    let first = explain(&classifier, data.view(), &row).unwrap();
    let second = explain(&classifier, data.view(), &row).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_layout_permutation_does_not_change_contributions() {
    let training = testing::training_layout();
    let reversed = {
        let mut names = training.names();
        names.reverse();
        crate::features::FeatureLayout::from_names(&names).unwrap()
    };

    let input = PatientInput::default().with(FeatureId::DDimer, 3.2);
    let explain_with = |layout: &crate::features::FeatureLayout| {
        let data = testing::background(layout, 33);
        let classifier = testing::pipeline_classifier(layout, &data);
        explain(&classifier, data.view(), &FeatureVector::arrange(&input, layout)).unwrap()
    };

    let a = explain_with(&training);
    let b = explain_with(&reversed);

    assert_close(a.baseline, b.baseline);
    for id in FeatureId::ALL {
        assert_close(a.get(id).unwrap().contribution, b.get(id).unwrap().contribution);
    }
}

#[test]
fn test_unnamed_pipeline_fails() {
    let layout = testing::training_layout();
    let data = testing::background(&layout, 10);
    let classifier = testing::unnamed_pipeline_classifier(&layout, &data);
    let row = FeatureVector::arrange(&PatientInput::default(), &layout);

    let err = explain(&classifier, data.view(), &row).unwrap_err();
    assert_eq!(err, AttributionError::MissingStep("scaler".to_string()));
}

#[test]
fn test_background_shape_mismatch() {
    let layout = testing::training_layout();
    let data = testing::background(&layout, 10);
    let classifier = testing::pipeline_classifier(&layout, &data);
    let narrow = data.slice(ndarray::s![.., ..9]).to_owned();
    let row = FeatureVector::arrange(&PatientInput::default(), &layout);

    let err = explain(&classifier, narrow.view(), &row).unwrap_err();
    assert_eq!(err, AttributionError::BackgroundShape { expected: 10, actual: 9 });
}

#[test]
fn test_empty_background() {
    let layout = testing::training_layout();
    let classifier = Classifier::LogisticRegression(LogisticRegression::new(vec![0.1; 10], 0.0));
    let empty = ndarray::Array2::<f64>::zeros((0, 10));
    let row = FeatureVector::arrange(&PatientInput::default(), &layout);

    assert_eq!(
        explain(&classifier, empty.view(), &row).unwrap_err(),
        AttributionError::EmptyBackground
    );
}

#[test]
fn test_top_prefers_first_on_ties() {
    let attribution = Attribution {
        baseline: 0.0,
        contributions: vec![
            FeatureContribution { feature: FeatureId::Egfr, value: 1.0, contribution: -0.5 },
            FeatureContribution { feature: FeatureId::HsCrp, value: 1.0, contribution: 0.5 },
            FeatureContribution { feature: FeatureId::DDimer, value: 1.0, contribution: 0.1 },
        ],
    };
    assert_eq!(attribution.top().unwrap().feature, FeatureId::Egfr);

    let order: Vec<FeatureId> = attribution.by_magnitude().iter().map(|c| c.feature).collect();
    assert_eq!(order, vec![FeatureId::Egfr, FeatureId::HsCrp, FeatureId::DDimer]);
}
